//! `/api` routes

use crate::api::handlers::{
    admin, exams, images, patients, reference_values, reports, settings, templates,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Patients
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        // Exams
        .route("/exams", get(exams::list_exams).post(exams::create_exam))
        .route(
            "/exams/:id",
            get(exams::get_exam)
                .put(exams::update_exam)
                .delete(exams::delete_exam),
        )
        .route("/exams/:id/export", get(reports::export_exam))
        .route("/exams/:id/images", post(images::upload_image))
        .route("/exams/:id/images/:image_id", delete(images::delete_image))
        .route("/images/:id", get(images::get_image))
        // Templates
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/templates/:id",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        // Reference values (the literal `classify` route is matched before `:id`)
        .route(
            "/reference-values",
            get(reference_values::list_reference_values)
                .post(reference_values::create_reference_value),
        )
        .route(
            "/reference-values/classify",
            post(reference_values::classify_measurement),
        )
        .route(
            "/reference-values/:id",
            get(reference_values::get_reference_value)
                .put(reference_values::update_reference_value)
                .delete(reference_values::delete_reference_value),
        )
        // Settings
        .route(
            "/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        // Seeding and backup
        .route("/initialize-defaults", post(admin::initialize_defaults))
        .route(
            "/backup",
            get(admin::export_backup).post(admin::restore_backup),
        )
}
