use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganMeasurement {
    pub value: f64,
    /// Usually "cm" or "mm".
    pub unit: String,
    #[serde(default)]
    pub is_abnormal: bool,
}

/// Measurements, findings and composed report text for one organ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganData {
    pub organ_name: String,
    /// Keyed by measurement type (e.g. "comprimento").
    #[serde(default)]
    pub measurements: BTreeMap<String, OrganMeasurement>,
    /// Identifiers of the template texts picked for this organ.
    #[serde(default)]
    pub selected_findings: Vec<String>,
    #[serde(default)]
    pub custom_notes: String,
    #[serde(default)]
    pub report_text: String,
}

impl OrganData {
    pub fn has_report_text(&self) -> bool {
        !self.report_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamImage {
    pub id: String,
    /// Stored filename: `<id><original extension>`.
    pub filename: String,
    #[serde(default)]
    pub organ: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub patient_id: String,
    #[serde(with = "crate::timestamp")]
    pub exam_date: DateTime<Utc>,
    #[serde(default)]
    pub organs_data: Vec<OrganData>,
    #[serde(default)]
    pub images: Vec<ExamImage>,
    #[serde(default)]
    pub final_report: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExamInput {
    #[validate(custom(function = "crate::not_blank", message = "patient_id must not be empty"))]
    pub patient_id: String,
    #[serde(default, with = "crate::timestamp::option")]
    pub exam_date: Option<DateTime<Utc>>,
}

/// Partial update: each present field replaces the stored one wholesale.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_organs"))]
pub struct ExamUpdate {
    #[serde(default)]
    pub organs_data: Option<Vec<OrganData>>,
    #[serde(default)]
    pub final_report: Option<String>,
}

fn validate_organs(update: &ExamUpdate) -> Result<(), ValidationError> {
    let Some(organs) = &update.organs_data else {
        return Ok(());
    };
    if organs.iter().any(|o| o.organ_name.trim().is_empty()) {
        let mut err = ValidationError::new("organ_name");
        err.message = Some("organs_data: organ_name must not be empty".into());
        return Err(err);
    }
    Ok(())
}

impl ExamUpdate {
    pub fn is_empty(&self) -> bool {
        self.organs_data.is_none() && self.final_report.is_none()
    }

    /// Drops repeated finding identifiers, keeping first occurrences in order.
    pub fn normalized(mut self) -> Self {
        if let Some(organs) = self.organs_data.as_mut() {
            for organ in organs.iter_mut() {
                let mut seen = std::collections::HashSet::new();
                organ.selected_findings.retain(|id| seen.insert(id.clone()));
            }
        }
        self
    }
}

impl Exam {
    pub fn new(id: String, created_at: DateTime<Utc>, input: ExamInput) -> Self {
        Self {
            id,
            patient_id: input.patient_id.trim().to_string(),
            exam_date: input.exam_date.unwrap_or(created_at),
            organs_data: Vec::new(),
            images: Vec::new(),
            final_report: String::new(),
            created_at,
        }
    }

    pub fn image(&self, image_id: &str) -> Option<&ExamImage> {
        self.images.iter().find(|img| img.id == image_id)
    }
}
