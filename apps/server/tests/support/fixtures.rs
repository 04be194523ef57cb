use anyhow::Context as _;
use axum::{body::Bytes, http::Method};
use serde_json::{json, Value};

use super::TestApp;

/// 1x1 transparent PNG
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// Large male Labrador without owner or neutering status.
pub fn rex() -> Value {
    json!({
        "name": "Rex",
        "species": "dog",
        "breed": "Labrador",
        "weight": 30.0,
        "size": "large",
        "sex": "male"
    })
}

pub fn cat(name: &str) -> Value {
    json!({
        "name": name,
        "species": "cat",
        "breed": "SRD",
        "weight": 4.2,
        "size": "small",
        "sex": "female",
        "is_neutered": true,
        "owner_name": "Ana"
    })
}

pub fn kidney_range(size: &str, min: f64, max: f64) -> Value {
    json!({
        "organ": "Rim Esquerdo",
        "measurement_type": "comprimento",
        "species": "dog",
        "size": size,
        "min_value": min,
        "max_value": max,
        "unit": "cm"
    })
}

pub fn liver_template(text: &str, order: i64) -> Value {
    json!({
        "organ": "Fígado",
        "category": "normal",
        "text": text,
        "order": order
    })
}

pub fn id_of(value: &Value) -> anyhow::Result<String> {
    value["id"]
        .as_str()
        .map(str::to_string)
        .context("response has a string id")
}

pub async fn create_patient(app: &TestApp, body: &Value) -> anyhow::Result<Value> {
    let (status, created) = app.json(Method::POST, "/api/patients", Some(body)).await?;
    super::assert_status(status, axum::http::StatusCode::OK, "create patient");
    Ok(created)
}

pub async fn create_exam(
    app: &TestApp,
    patient_id: &str,
    exam_date: Option<&str>,
) -> anyhow::Result<Value> {
    let mut body = json!({ "patient_id": patient_id });
    if let Some(date) = exam_date {
        body["exam_date"] = json!(date);
    }
    let (status, created) = app.json(Method::POST, "/api/exams", Some(&body)).await?;
    super::assert_status(status, axum::http::StatusCode::OK, "create exam");
    Ok(created)
}
