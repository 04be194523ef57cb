use serde::{Deserialize, Serialize};

/// Fixed identifier of the singleton settings record.
pub const SETTINGS_ID: &str = "global_settings";

/// Clinic letterhead and veterinarian identification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub id: String,
    pub letterhead_path: Option<String>,
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub veterinarian_name: Option<String>,
    /// Veterinary council registration code.
    pub crmv: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ID.to_string(),
            letterhead_path: None,
            clinic_name: None,
            clinic_address: None,
            veterinarian_name: None,
            crmv: None,
        }
    }
}

impl Settings {
    /// Pins the singleton id and folds blank strings to `None`.
    pub fn normalized(self) -> Self {
        Self {
            id: SETTINGS_ID.to_string(),
            letterhead_path: crate::non_blank(self.letterhead_path),
            clinic_name: crate::non_blank(self.clinic_name),
            clinic_address: crate::non_blank(self.clinic_address),
            veterinarian_name: crate::non_blank(self.veterinarian_name),
            crmv: crate::non_blank(self.crmv),
        }
    }

    pub fn has_letterhead(&self) -> bool {
        self.clinic_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}
