use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::patient::{SizeClass, Species};

/// Normal range for one measurement of one organ, per species and size class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValue {
    pub id: String,
    pub organ: String,
    pub measurement_type: String,
    pub species: Species,
    pub size: SizeClass,
    pub min_value: f64,
    pub max_value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_bounds"))]
pub struct ReferenceValueInput {
    #[validate(custom(function = "crate::not_blank", message = "organ must not be empty"))]
    pub organ: String,
    #[validate(custom(function = "crate::not_blank", message = "measurement_type must not be empty"))]
    pub measurement_type: String,
    pub species: Species,
    pub size: SizeClass,
    pub min_value: f64,
    pub max_value: f64,
    #[validate(custom(function = "crate::not_blank", message = "unit must not be empty"))]
    pub unit: String,
}

fn validate_bounds(input: &ReferenceValueInput) -> Result<(), ValidationError> {
    if input.min_value > input.max_value {
        let mut err = ValidationError::new("range");
        err.message = Some("min_value must not exceed max_value".into());
        return Err(err);
    }
    Ok(())
}

impl ReferenceValue {
    pub fn new(id: String, input: ReferenceValueInput) -> Self {
        Self {
            id,
            organ: input.organ.trim().to_string(),
            measurement_type: input.measurement_type.trim().to_string(),
            species: input.species,
            size: input.size,
            min_value: input.min_value,
            max_value: input.max_value,
            unit: input.unit.trim().to_string(),
        }
    }

    /// Position of `value` relative to the inclusive range.
    pub fn classify(&self, value: f64) -> RangeStatus {
        if value < self.min_value {
            RangeStatus::Below
        } else if value > self.max_value {
            RangeStatus::Above
        } else {
            RangeStatus::Normal
        }
    }

    fn applies_to(&self, query: &MeasurementQuery) -> bool {
        self.organ == query.organ
            && self.measurement_type == query.measurement_type
            && self.species == query.species
            && self.size == query.size
            && self.unit.trim().eq_ignore_ascii_case(query.unit.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    Normal,
    Below,
    Above,
    /// No range on file for the measurement.
    Unknown,
}

impl RangeStatus {
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::Below | Self::Above)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MeasurementQuery {
    #[validate(custom(function = "crate::not_blank", message = "organ must not be empty"))]
    pub organ: String,
    #[validate(custom(function = "crate::not_blank", message = "measurement_type must not be empty"))]
    pub measurement_type: String,
    pub species: Species,
    pub size: SizeClass,
    pub value: f64,
    #[validate(custom(function = "crate::not_blank", message = "unit must not be empty"))]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub status: RangeStatus,
    pub is_abnormal: bool,
    pub reference: Option<ReferenceValue>,
}

/// Classifies a measurement against the first range that applies to it.
pub fn classify_measurement<'a, I>(ranges: I, query: &MeasurementQuery) -> Classification
where
    I: IntoIterator<Item = &'a ReferenceValue>,
{
    match ranges.into_iter().find(|r| r.applies_to(query)) {
        Some(reference) => {
            let status = reference.classify(query.value);
            Classification {
                status,
                is_abnormal: status.is_abnormal(),
                reference: Some(reference.clone()),
            }
        }
        None => Classification {
            status: RangeStatus::Unknown,
            is_abnormal: false,
            reference: None,
        },
    }
}
