//! Template texts (`/api/templates`)

use crate::support::{assert_status, id_of, ids, liver_template, with_test_app};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn list_is_ordered_and_filtered() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, second) = app
                .json(Method::POST, "/api/templates", Some(&liver_template("b", 2)))
                .await?;
            let (_, first) = app
                .json(Method::POST, "/api/templates", Some(&liver_template("a", 1)))
                .await?;
            let (_, spleen) = app
                .json(
                    Method::POST,
                    "/api/templates",
                    Some(&json!({
                        "organ": "Baço",
                        "category": "finding",
                        "text": "Baço com nódulo.",
                        "order": 0
                    })),
                )
                .await?;

            let organ = urlencoding::encode("Fígado");
            let (status, liver) = app
                .json(Method::GET, &format!("/api/templates?organ={organ}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "list by organ");
            assert_eq!(ids(&liver)?, vec![id_of(&first)?, id_of(&second)?]);

            let (_, findings) = app
                .json(Method::GET, "/api/templates?category=finding", None)
                .await?;
            assert_eq!(ids(&findings)?, vec![id_of(&spleen)?]);

            let (_, all) = app.json(Method::GET, "/api/templates", None).await?;
            assert_eq!(ids(&all)?.len(), 3);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_and_delete() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, created) = app
                .json(Method::POST, "/api/templates", Some(&liver_template("a", 1)))
                .await?;
            let id = id_of(&created)?;

            let (status, updated) = app
                .json(
                    Method::PUT,
                    &format!("/api/templates/{id}"),
                    Some(&liver_template("Fígado normal.", 5)),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update");
            assert_eq!(updated["id"], json!(id));
            assert_eq!(updated["text"], json!("Fígado normal."));
            assert_eq!(updated["order"], json!(5));

            let (status, body) = app
                .json(Method::DELETE, &format!("/api/templates/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");
            assert_eq!(body["message"], json!("Template deleted successfully"));

            let (status, _) = app
                .json(Method::DELETE, &format!("/api/templates/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "delete missing");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_category_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let mut body = liver_template("x", 0);
            body["category"] = json!("other");
            let (status, _) = app.json(Method::POST, "/api/templates", Some(&body)).await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "bad category");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn blank_organ_or_text_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let blank_text = liver_template("  \n ", 0);
            let (status, _) = app
                .json(Method::POST, "/api/templates", Some(&blank_text))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "blank text");

            let mut blank_organ = liver_template("Fígado normal.", 0);
            blank_organ["organ"] = json!("  ");
            let (status, _) = app
                .json(Method::POST, "/api/templates", Some(&blank_organ))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "blank organ");

            let (_, all) = app.json(Method::GET, "/api/templates", None).await?;
            assert!(ids(&all)?.is_empty());
            Ok(())
        })
    })
    .await
}
