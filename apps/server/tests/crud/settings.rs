//! Clinic settings singleton (`/api/settings`)

use crate::support::{assert_status, with_test_app};
use axum::http::{Method, StatusCode};
use serde_json::json;
use sonovet::db::{Collection, DocumentStore as _, Filter};

#[tokio::test]
async fn first_read_creates_defaults() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let stored = Filter::by_id("global_settings");
            let before = app.state.store.find_one(Collection::Settings, &stored).await?;
            assert!(before.is_none());

            let (status, settings) = app.json(Method::GET, "/api/settings", None).await?;
            assert_status(status, StatusCode::OK, "get settings");
            assert_eq!(settings["id"], json!("global_settings"));
            assert_eq!(settings["clinic_name"], json!(null));

            let after = app.state.store.find_one(Collection::Settings, &stored).await?;
            assert_eq!(after, Some(settings));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn put_upserts_and_pins_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = json!({
                "id": "ignored",
                "clinic_name": "Clínica VetSom",
                "clinic_address": "Rua das Flores, 100",
                "veterinarian_name": "Dra. Ana",
                "crmv": "SP-12345"
            });
            let (status, saved) = app.json(Method::PUT, "/api/settings", Some(&body)).await?;
            assert_status(status, StatusCode::OK, "put settings");
            assert_eq!(saved["id"], json!("global_settings"));

            let (_, read) = app.json(Method::GET, "/api/settings", None).await?;
            assert_eq!(read, saved);
            assert_eq!(read["clinic_name"], json!("Clínica VetSom"));

            let (_, cleared) = app
                .json(Method::PUT, "/api/settings", Some(&json!({ "crmv": "SP-1" })))
                .await?;
            assert_eq!(cleared["clinic_name"], json!(null));
            assert_eq!(cleared["crmv"], json!("SP-1"));

            Ok(())
        })
    })
    .await
}
