use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body size class used to select reference ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub species: Species,
    pub breed: String,
    /// Body weight in kilograms.
    pub weight: f64,
    pub size: SizeClass,
    pub sex: Sex,
    #[serde(default)]
    pub is_neutered: bool,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Create/replace payload for a patient.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatientInput {
    #[validate(custom(function = "crate::not_blank", message = "name must not be empty"))]
    pub name: String,
    pub species: Species,
    pub breed: String,
    #[validate(range(min = 0.0, message = "weight must be a non-negative number of kilograms"))]
    pub weight: f64,
    pub size: SizeClass,
    pub sex: Sex,
    #[serde(default)]
    pub is_neutered: bool,
    #[serde(default)]
    pub owner_name: Option<String>,
}

impl Patient {
    pub fn new(id: String, created_at: DateTime<Utc>, input: PatientInput) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            species: input.species,
            breed: input.breed.trim().to_string(),
            weight: input.weight,
            size: input.size,
            sex: input.sex,
            is_neutered: input.is_neutered,
            owner_name: crate::non_blank(input.owner_name),
            created_at,
        }
    }

    /// Whole-record replacement that keeps the server-assigned fields.
    pub fn replace_with(&self, input: PatientInput) -> Self {
        Self::new(self.id.clone(), self.created_at, input)
    }
}
