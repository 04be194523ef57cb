//! Service endpoints and cross-cutting middleware

use crate::support::{assert_status, with_test_app};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn health_and_root() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, health) = app.json(Method::GET, "/health", None).await?;
            assert_status(status, StatusCode::OK, "health");
            assert_eq!(health, json!({ "status": "ok", "service": "sonovet" }));

            let (status, root) = app.json(Method::GET, "/", None).await?;
            assert_status(status, StatusCode::OK, "root");
            assert_eq!(root["store"], json!("memory"));

            let (status, _, _) = app.request(Method::GET, "/favicon.ico", None).await?;
            assert_status(status, StatusCode::NO_CONTENT, "favicon");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, headers, _) = app.request(Method::GET, "/api/patients", None).await?;
            assert!(headers.contains_key("x-request-id"));
            assert_eq!(headers["x-content-type-options"], "nosniff");
            assert_eq!(headers["x-frame-options"], "DENY");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn metrics_are_exposed() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.request(Method::GET, "/api/patients", None).await?;

            let (status, _, body) = app.request(Method::GET, "/metrics", None).await?;
            assert_status(status, StatusCode::OK, "metrics");
            let text = String::from_utf8(body.to_vec())?;
            assert!(text.contains("sonovet_http_requests_total"));
            assert!(text.contains("sonovet_server_info"));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_routes_are_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, _) = app.request(Method::GET, "/api/unknown", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown route");
            Ok(())
        })
    })
    .await
}
