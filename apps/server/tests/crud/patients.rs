//! Patient CRUD (`/api/patients`)

use crate::support::{
    assert_detail, assert_status, cat, create_patient, id_of, ids, rex, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_applies_defaults_and_round_trips() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let created = create_patient(app, &rex()).await?;
            let id = id_of(&created)?;

            assert_eq!(created["is_neutered"], json!(false));
            assert_eq!(created["owner_name"], json!(null));
            assert!(created["created_at"].as_str().is_some());

            let (status, read) = app
                .json(Method::GET, &format!("/api/patients/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "read");
            assert_eq!(read, created);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn ids_are_unique() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let a = id_of(&create_patient(app, &rex()).await?)?;
            let b = id_of(&create_patient(app, &rex()).await?)?;
            assert_ne!(a, b);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_filters_by_species_and_size() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let dog = id_of(&create_patient(app, &rex()).await?)?;
            let cat = id_of(&create_patient(app, &cat("Mia")).await?)?;

            let (_, all) = app.json(Method::GET, "/api/patients", None).await?;
            assert_eq!(ids(&all)?, vec![dog.clone(), cat.clone()]);

            let (_, cats) = app.json(Method::GET, "/api/patients?species=cat", None).await?;
            assert_eq!(ids(&cats)?, vec![cat]);

            let (_, large) = app.json(Method::GET, "/api/patients?size=large", None).await?;
            assert_eq!(ids(&large)?, vec![dog]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_replaces_fields_but_keeps_identity() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let created = create_patient(app, &rex()).await?;
            let id = id_of(&created)?;

            let mut body = rex();
            body["weight"] = json!(32.5);
            body["owner_name"] = json!("Carlos");
            let (status, updated) = app
                .json(Method::PUT, &format!("/api/patients/{id}"), Some(&body))
                .await?;
            assert_status(status, StatusCode::OK, "update");

            assert_eq!(updated["id"], created["id"]);
            assert_eq!(updated["created_at"], created["created_at"]);
            assert_eq!(updated["weight"], json!(32.5));
            assert_eq!(updated["owner_name"], json!("Carlos"));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_then_read_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = id_of(&create_patient(app, &rex()).await?)?;

            let (status, body) = app
                .json(Method::DELETE, &format!("/api/patients/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");
            assert_eq!(body["message"], json!("Patient deleted successfully"));

            let (status, body) = app
                .json(Method::GET, &format!("/api/patients/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "read deleted");
            assert_detail(&body, "Patient not found");

            let (status, _) = app
                .json(Method::DELETE, &format!("/api/patients/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "delete twice");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_of_missing_patient_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _) = app
                .json(Method::PUT, "/api/patients/does-not-exist", Some(&rex()))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "update missing");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_payloads_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let mut bad_species = rex();
            bad_species["species"] = json!("parrot");
            let (status, _) = app
                .json(Method::POST, "/api/patients", Some(&bad_species))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "unknown species");

            let mut blank = rex();
            blank["name"] = json!("");
            let (status, _) = app.json(Method::POST, "/api/patients", Some(&blank)).await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "blank name");

            blank["name"] = json!("   ");
            let (status, body) = app.json(Method::POST, "/api/patients", Some(&blank)).await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "whitespace name");
            assert!(body["detail"].as_str().is_some_and(|d| d.contains("name")));

            let id = id_of(&create_patient(app, &rex()).await?)?;
            let (status, _) = app
                .json(Method::PUT, &format!("/api/patients/{id}"), Some(&blank))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "replace with blank name");
            let (status, _) = app
                .json(Method::DELETE, &format!("/api/patients/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");

            let (status, _, _) = app
                .request(
                    Method::POST,
                    "/api/patients",
                    Some(axum::body::Bytes::from_static(b"{not json")),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "malformed json");

            let (_, all) = app.json(Method::GET, "/api/patients", None).await?;
            assert!(ids(&all)?.is_empty());

            Ok(())
        })
    })
    .await
}
