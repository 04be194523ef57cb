//! Patient records

use crate::db::{Filter, Repository};
use crate::{Error, Result};
use serde::Deserialize;
use sonovet_models::{Patient, PatientInput, RecordMeta, SizeClass, Species};

/// Optional list filters; absent fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientFilter {
    pub species: Option<Species>,
    pub size: Option<SizeClass>,
}

#[derive(Clone)]
pub struct PatientService {
    patients: Repository<Patient>,
}

impl PatientService {
    pub fn new(patients: Repository<Patient>) -> Self {
        Self { patients }
    }

    pub async fn create(&self, input: PatientInput) -> Result<Patient> {
        sonovet_models::validate(&input)?;
        let meta = RecordMeta::generate();
        let patient = Patient::new(meta.id, meta.created_at, input);
        self.patients.insert(&patient).await?;
        tracing::info!(patient_id = %patient.id, species = %patient.species, "Patient created");
        Ok(patient)
    }

    pub async fn list(&self, filter: &PatientFilter) -> Result<Vec<Patient>> {
        let filter = Filter::all()
            .eq_opt("species", filter.species.map(|s| s.as_str()))
            .eq_opt("size", filter.size.map(|s| s.as_str()));
        self.patients.find(&filter, None).await
    }

    pub async fn get(&self, id: &str) -> Result<Patient> {
        self.patients.require(id).await
    }

    /// Replaces every client-owned field; `id` and `created_at` are kept.
    pub async fn update(&self, id: &str, input: PatientInput) -> Result<Patient> {
        sonovet_models::validate(&input)?;
        let current = self.patients.require(id).await?;
        let updated = current.replace_with(input);
        if !self.patients.replace(&updated).await? {
            return Err(Error::not_found("Patient", id));
        }
        tracing::info!(patient_id = %id, "Patient updated");
        Ok(updated)
    }

    /// Exams referencing the patient are left in place.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.patients.delete(id).await? {
            return Err(Error::not_found("Patient", id));
        }
        tracing::info!(patient_id = %id, "Patient deleted");
        Ok(())
    }
}
