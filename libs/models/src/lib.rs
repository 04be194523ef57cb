//! Record types for the sonovet ultrasound record keeper.
//!
//! Every stored entity comes in two shapes:
//! - the full record (`Patient`, `Exam`, ...) as persisted and returned by the API
//! - an input payload (`PatientInput`, `ExamInput`, ...) without server-owned fields
//!
//! Server-owned fields (identifier, creation timestamp) are never derived from
//! serde defaults. Callers obtain them from [`RecordMeta::generate`] and pass them
//! to the explicit constructors.
//!
//! Unknown JSON fields are ignored on both shapes so that clients may send back
//! a record they previously fetched. Enumerated codes are strict.

pub mod error;
pub mod exam;
pub mod patient;
pub mod reference;
pub mod settings;
pub mod template;
pub mod timestamp;

pub use error::{ModelError, Result};
pub use exam::{Exam, ExamImage, ExamInput, ExamUpdate, OrganData, OrganMeasurement};
pub use patient::{Patient, PatientInput, Sex, SizeClass, Species};
pub use reference::{
    classify_measurement, Classification, MeasurementQuery, RangeStatus, ReferenceValue,
    ReferenceValueInput,
};
pub use settings::{Settings, SETTINGS_ID};
pub use template::{TemplateCategory, TemplateInput, TemplateText};

use chrono::{DateTime, Utc};

/// Server-assigned identity of a freshly created record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMeta {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl RecordMeta {
    /// New random UUID v4 identifier stamped with the current time.
    pub fn generate() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: timestamp::now(),
        }
    }
}

/// Validates an input payload, folding `validator` errors into [`ModelError`].
pub fn validate<T: validator::Validate>(input: &T) -> Result<()> {
    input.validate().map_err(ModelError::from)
}

/// Rejects strings that are empty once surrounding whitespace is removed.
///
/// Used as a `validator` custom rule on required text fields, since the
/// constructors trim those fields before storing them.
pub(crate) fn not_blank(
    value: &str,
) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Trims an optional free-text field, mapping blank values to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
