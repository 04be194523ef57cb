//! Default template texts and reference ranges

use crate::db::{Filter, Repository};
use crate::Result;
use serde::Serialize;
use sonovet_models::{
    RecordMeta, ReferenceValue, ReferenceValueInput, SizeClass, Species, TemplateCategory,
    TemplateInput, TemplateText,
};

pub const DEFAULT_ORGANS: [&str; 14] = [
    "Estômago",
    "Fígado",
    "Baço",
    "Rim Esquerdo",
    "Rim Direito",
    "Vesícula Urinária",
    "Adrenal Esquerda",
    "Adrenal Direita",
    "Duodeno",
    "Jejuno",
    "Cólon",
    "Ceco",
    "Íleo",
    "Linfonodos",
];

/// (organ, measurement type, size, min, max), canine, centimetres.
const CANINE_RANGES: [(&str, &str, SizeClass, f64, f64); 12] = [
    ("Rim Esquerdo", "comprimento", SizeClass::Small, 3.5, 5.5),
    ("Rim Esquerdo", "comprimento", SizeClass::Medium, 5.0, 7.0),
    ("Rim Esquerdo", "comprimento", SizeClass::Large, 6.5, 9.0),
    ("Rim Direito", "comprimento", SizeClass::Small, 3.5, 5.5),
    ("Rim Direito", "comprimento", SizeClass::Medium, 5.0, 7.0),
    ("Rim Direito", "comprimento", SizeClass::Large, 6.5, 9.0),
    ("Fígado", "espessura", SizeClass::Small, 2.0, 4.0),
    ("Fígado", "espessura", SizeClass::Medium, 3.0, 5.5),
    ("Fígado", "espessura", SizeClass::Large, 4.0, 7.0),
    ("Baço", "espessura", SizeClass::Small, 0.5, 1.5),
    ("Baço", "espessura", SizeClass::Medium, 1.0, 2.0),
    ("Baço", "espessura", SizeClass::Large, 1.5, 2.5),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedOutcome {
    pub message: String,
    pub seeded: bool,
    pub templates: usize,
    pub reference_values: usize,
}

/// Three templates per organ: one normal line and two findings.
pub fn default_templates() -> Vec<TemplateInput> {
    DEFAULT_ORGANS
        .iter()
        .enumerate()
        .flat_map(|(i, organ)| {
            let base = i as i64 * 10;
            [
                (
                    TemplateCategory::Normal,
                    format!("{organ} com dimensões, contornos, ecogenicidade e ecotextura preservados."),
                    base,
                ),
                (
                    TemplateCategory::Finding,
                    format!("{organ} apresenta alteração de ecogenicidade."),
                    base + 1,
                ),
                (
                    TemplateCategory::Finding,
                    format!("{organ} com aumento de dimensões."),
                    base + 2,
                ),
            ]
            .into_iter()
            .map(move |(category, text, order)| TemplateInput {
                organ: organ.to_string(),
                category,
                text,
                order,
            })
        })
        .collect()
}

pub fn default_reference_values() -> Vec<ReferenceValueInput> {
    CANINE_RANGES
        .iter()
        .map(|&(organ, measurement_type, size, min, max)| ReferenceValueInput {
            organ: organ.to_string(),
            measurement_type: measurement_type.to_string(),
            species: Species::Dog,
            size,
            min_value: min,
            max_value: max,
            unit: "cm".to_string(),
        })
        .collect()
}

#[derive(Clone)]
pub struct SeedService {
    templates: Repository<TemplateText>,
    reference_values: Repository<ReferenceValue>,
}

impl SeedService {
    pub fn new(
        templates: Repository<TemplateText>,
        reference_values: Repository<ReferenceValue>,
    ) -> Self {
        Self {
            templates,
            reference_values,
        }
    }

    /// Inserts the default catalog unless any template already exists.
    ///
    /// Only the templates collection is inspected. Reference values are not
    /// seeded when templates were created by other means.
    pub async fn initialize(&self) -> Result<SeedOutcome> {
        if self.templates.count(&Filter::all()).await? > 0 {
            tracing::info!("Defaults already initialized, skipping seed");
            return Ok(SeedOutcome {
                message: "Defaults already initialized".to_string(),
                seeded: false,
                templates: 0,
                reference_values: 0,
            });
        }

        let templates = default_templates();
        for input in &templates {
            let template = TemplateText::new(RecordMeta::generate().id, input.clone());
            self.templates.insert(&template).await?;
        }

        let ranges = default_reference_values();
        for input in &ranges {
            let value = ReferenceValue::new(RecordMeta::generate().id, input.clone());
            self.reference_values.insert(&value).await?;
        }

        tracing::info!(
            templates = templates.len(),
            reference_values = ranges.len(),
            "Default data initialized"
        );
        Ok(SeedOutcome {
            message: "Default data initialized successfully".to_string(),
            seeded: true,
            templates: templates.len(),
            reference_values: ranges.len(),
        })
    }
}
