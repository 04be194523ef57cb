use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid timestamp '{0}': expected ISO-8601")]
    InvalidTimestamp(String),

    #[error("{}", format_validation_errors(.0))]
    Validation(#[from] validator::ValidationErrors),
}

/// Flattens `validator` output into `field: message` pairs.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            if field == "__all__" {
                parts.push(message);
            } else {
                parts.push(format!("{field}: {message}"));
            }
        }
    }
    parts.sort();
    if parts.is_empty() {
        "invalid input".to_string()
    } else {
        parts.join("; ")
    }
}
