//! Exam CRUD (`/api/exams`)

use crate::support::{
    assert_status, create_exam, create_patient, id_of, ids, rex, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_defaults_exam_date_and_empty_collections() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient = id_of(&create_patient(app, &rex()).await?)?;
            let exam = create_exam(app, &patient, None).await?;

            assert_eq!(exam["patient_id"], json!(patient));
            assert!(exam["exam_date"].as_str().is_some());
            assert_eq!(exam["organs_data"], json!([]));
            assert_eq!(exam["images"], json!([]));
            assert_eq!(exam["final_report"], json!(""));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_filters_by_patient_newest_first() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let rex_id = id_of(&create_patient(app, &rex()).await?)?;
            let other_id = id_of(&create_patient(app, &rex()).await?)?;

            let older = id_of(&create_exam(app, &rex_id, Some("2024-01-10T10:00:00Z")).await?)?;
            let newer = id_of(&create_exam(app, &rex_id, Some("2024-03-05T08:30:00Z")).await?)?;
            let foreign = id_of(&create_exam(app, &other_id, Some("2024-02-01")).await?)?;

            let (status, list) = app
                .json(Method::GET, &format!("/api/exams?patient_id={rex_id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "list by patient");
            assert_eq!(ids(&list)?, vec![newer.clone(), older.clone()]);

            let (_, all) = app.json(Method::GET, "/api/exams", None).await?;
            assert_eq!(ids(&all)?, vec![newer, foreign, older]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_touches_only_supplied_fields() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient = id_of(&create_patient(app, &rex()).await?)?;
            let exam = create_exam(app, &patient, None).await?;
            let id = id_of(&exam)?;

            let organs = json!([{
                "organ_name": "Fígado",
                "measurements": { "espessura": { "value": 5.1, "unit": "cm" } },
                "selected_findings": ["t1", "t1", "t2"],
                "report_text": "Fígado com dimensões preservadas."
            }]);
            let (status, updated) = app
                .json(
                    Method::PUT,
                    &format!("/api/exams/{id}"),
                    Some(&json!({ "organs_data": organs })),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update organs");
            assert_eq!(updated["organs_data"][0]["selected_findings"], json!(["t1", "t2"]));
            assert_eq!(
                updated["organs_data"][0]["measurements"]["espessura"]["is_abnormal"],
                json!(false)
            );
            assert_eq!(updated["final_report"], json!(""));

            let (_, updated) = app
                .json(
                    Method::PUT,
                    &format!("/api/exams/{id}"),
                    Some(&json!({ "final_report": "Sem alterações." })),
                )
                .await?;
            assert_eq!(updated["final_report"], json!("Sem alterações."));
            assert_eq!(updated["organs_data"][0]["organ_name"], json!("Fígado"));
            assert_eq!(updated["exam_date"], exam["exam_date"]);
            assert_eq!(updated["created_at"], exam["created_at"]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_update_returns_current_exam() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient = id_of(&create_patient(app, &rex()).await?)?;
            let exam = create_exam(app, &patient, None).await?;
            let id = id_of(&exam)?;

            let (status, same) = app
                .json(Method::PUT, &format!("/api/exams/{id}"), Some(&json!({})))
                .await?;
            assert_status(status, StatusCode::OK, "empty update");
            assert_eq!(same, exam);

            let (status, _) = app
                .json(Method::PUT, "/api/exams/missing", Some(&json!({})))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "empty update of missing exam");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_missing_exam_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _) = app.json(Method::DELETE, "/api/exams/nope", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "delete missing");

            let patient = id_of(&create_patient(app, &rex()).await?)?;
            let id = id_of(&create_exam(app, &patient, None).await?)?;
            let (status, body) = app
                .json(Method::DELETE, &format!("/api/exams/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");
            assert_eq!(body["message"], json!("Exam deleted successfully"));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn blank_organ_name_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient = id_of(&create_patient(app, &rex()).await?)?;
            let id = id_of(&create_exam(app, &patient, None).await?)?;

            let (status, _) = app
                .json(
                    Method::PUT,
                    &format!("/api/exams/{id}"),
                    Some(&json!({ "organs_data": [{ "organ_name": "  " }] })),
                )
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "blank organ");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn blank_patient_id_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for patient_id in ["", "   "] {
                let (status, _) = app
                    .json(
                        Method::POST,
                        "/api/exams",
                        Some(&json!({ "patient_id": patient_id })),
                    )
                    .await?;
                assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "blank patient_id");
            }

            let (_, all) = app.json(Method::GET, "/api/exams", None).await?;
            assert!(ids(&all)?.is_empty());
            Ok(())
        })
    })
    .await
}
