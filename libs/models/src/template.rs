use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Normal,
    Finding,
    Conclusion,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Finding => "finding",
            Self::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canned report sentence offered for an organ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateText {
    pub id: String,
    pub organ: String,
    pub category: TemplateCategory,
    pub text: String,
    /// Ascending display order.
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateInput {
    #[validate(custom(function = "crate::not_blank", message = "organ must not be empty"))]
    pub organ: String,
    pub category: TemplateCategory,
    #[validate(custom(function = "crate::not_blank", message = "text must not be empty"))]
    pub text: String,
    #[serde(default)]
    pub order: i64,
}

impl TemplateText {
    pub fn new(id: String, input: TemplateInput) -> Self {
        Self {
            id,
            organ: input.organ.trim().to_string(),
            category: input.category,
            text: input.text,
            order: input.order,
        }
    }
}
