//! Reference ranges and measurement classification

use crate::support::{assert_status, id_of, ids, kidney_range, with_test_app};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

fn kidney_query(value: f64, size: &str) -> Value {
    json!({
        "organ": "Rim Esquerdo",
        "measurement_type": "comprimento",
        "species": "dog",
        "size": size,
        "value": value,
        "unit": "cm"
    })
}

#[tokio::test]
async fn classify_against_stored_range() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, range) = app
                .json(
                    Method::POST,
                    "/api/reference-values",
                    Some(&kidney_range("large", 6.5, 9.0)),
                )
                .await?;
            assert_status(status, StatusCode::OK, "create range");

            for (value, expected, abnormal) in [
                (5.0, "below", true),
                (6.5, "normal", false),
                (9.0, "normal", false),
                (9.4, "above", true),
            ] {
                let (status, result) = app
                    .json(
                        Method::POST,
                        "/api/reference-values/classify",
                        Some(&kidney_query(value, "large")),
                    )
                    .await?;
                assert_status(status, StatusCode::OK, "classify");
                assert_eq!(result["status"], json!(expected), "value {value}");
                assert_eq!(result["is_abnormal"], json!(abnormal), "value {value}");
                assert_eq!(result["reference"]["id"], range["id"]);
            }

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn classify_without_range_is_unknown() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.json(
                Method::POST,
                "/api/reference-values",
                Some(&kidney_range("large", 6.5, 9.0)),
            )
            .await?;

            let (status, result) = app
                .json(
                    Method::POST,
                    "/api/reference-values/classify",
                    Some(&kidney_query(4.0, "small")),
                )
                .await?;
            assert_status(status, StatusCode::OK, "classify");
            assert_eq!(result["status"], json!("unknown"));
            assert_eq!(result["is_abnormal"], json!(false));
            assert_eq!(result["reference"], json!(null));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn inverted_bounds_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _) = app
                .json(
                    Method::POST,
                    "/api/reference-values",
                    Some(&kidney_range("small", 5.5, 3.5)),
                )
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "min > max");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_filters_and_crud() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, small) = app
                .json(
                    Method::POST,
                    "/api/reference-values",
                    Some(&kidney_range("small", 3.5, 5.5)),
                )
                .await?;
            let (_, large) = app
                .json(
                    Method::POST,
                    "/api/reference-values",
                    Some(&kidney_range("large", 6.5, 9.0)),
                )
                .await?;

            let (_, only_large) = app
                .json(Method::GET, "/api/reference-values?size=large", None)
                .await?;
            assert_eq!(ids(&only_large)?, vec![id_of(&large)?]);

            let id = id_of(&small)?;
            let (status, updated) = app
                .json(
                    Method::PUT,
                    &format!("/api/reference-values/{id}"),
                    Some(&kidney_range("small", 3.0, 5.0)),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update");
            assert_eq!(updated["min_value"], json!(3.0));

            let (status, _) = app
                .json(Method::DELETE, &format!("/api/reference-values/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");

            let (status, _) = app
                .json(Method::GET, &format!("/api/reference-values/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "read deleted");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn blank_text_fields_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for field in ["organ", "measurement_type", "unit"] {
                let mut body = kidney_range("small", 3.5, 5.5);
                body[field] = json!("   ");
                let (status, _) = app
                    .json(Method::POST, "/api/reference-values", Some(&body))
                    .await?;
                assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, field);

                let mut query = kidney_query(4.0, "small");
                query[field] = json!(" ");
                let (status, _) = app
                    .json(Method::POST, "/api/reference-values/classify", Some(&query))
                    .await?;
                assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, field);
            }

            let (_, all) = app.json(Method::GET, "/api/reference-values", None).await?;
            assert!(ids(&all)?.is_empty());
            Ok(())
        })
    })
    .await
}
