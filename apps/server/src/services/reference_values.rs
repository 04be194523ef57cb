//! Reference ranges and measurement classification

use crate::db::{Filter, Repository};
use crate::{Error, Result};
use serde::Deserialize;
use sonovet_models::{
    classify_measurement, Classification, MeasurementQuery, RecordMeta, ReferenceValue,
    ReferenceValueInput, SizeClass, Species,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceValueFilter {
    pub organ: Option<String>,
    pub measurement_type: Option<String>,
    pub species: Option<Species>,
    pub size: Option<SizeClass>,
}

impl ReferenceValueFilter {
    fn to_filter(&self) -> Filter {
        Filter::all()
            .eq_opt("organ", self.organ.as_deref())
            .eq_opt("measurement_type", self.measurement_type.as_deref())
            .eq_opt("species", self.species.map(|s| s.as_str()))
            .eq_opt("size", self.size.map(|s| s.as_str()))
    }
}

#[derive(Clone)]
pub struct ReferenceValueService {
    values: Repository<ReferenceValue>,
}

impl ReferenceValueService {
    pub fn new(values: Repository<ReferenceValue>) -> Self {
        Self { values }
    }

    pub async fn create(&self, input: ReferenceValueInput) -> Result<ReferenceValue> {
        sonovet_models::validate(&input)?;
        let value = ReferenceValue::new(RecordMeta::generate().id, input);
        self.values.insert(&value).await?;
        tracing::info!(
            reference_id = %value.id,
            organ = %value.organ,
            measurement_type = %value.measurement_type,
            "Reference value created"
        );
        Ok(value)
    }

    pub async fn list(&self, filter: &ReferenceValueFilter) -> Result<Vec<ReferenceValue>> {
        self.values.find(&filter.to_filter(), None).await
    }

    pub async fn get(&self, id: &str) -> Result<ReferenceValue> {
        self.values.require(id).await
    }

    pub async fn update(&self, id: &str, input: ReferenceValueInput) -> Result<ReferenceValue> {
        sonovet_models::validate(&input)?;
        let value = ReferenceValue::new(id.to_string(), input);
        if !self.values.replace(&value).await? {
            return Err(Error::not_found("Reference value", id));
        }
        tracing::info!(reference_id = %id, "Reference value updated");
        Ok(value)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.values.delete(id).await? {
            return Err(Error::not_found("Reference value", id));
        }
        tracing::info!(reference_id = %id, "Reference value deleted");
        Ok(())
    }

    /// Classifies a measured value against the matching stored range.
    pub async fn classify(&self, mut query: MeasurementQuery) -> Result<Classification> {
        query.organ = query.organ.trim().to_string();
        query.measurement_type = query.measurement_type.trim().to_string();
        sonovet_models::validate(&query)?;
        let candidates = self
            .list(&ReferenceValueFilter {
                organ: Some(query.organ.clone()),
                measurement_type: Some(query.measurement_type.clone()),
                species: Some(query.species),
                size: Some(query.size),
            })
            .await?;
        let classification = classify_measurement(&candidates, &query);
        tracing::debug!(
            organ = %query.organ,
            measurement_type = %query.measurement_type,
            value = query.value,
            status = ?classification.status,
            "Measurement classified"
        );
        Ok(classification)
    }
}
