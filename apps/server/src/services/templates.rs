//! Report template texts

use crate::db::{Filter, Repository, Sort};
use crate::{Error, Result};
use serde::Deserialize;
use sonovet_models::{RecordMeta, TemplateCategory, TemplateInput, TemplateText};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    pub organ: Option<String>,
    pub category: Option<TemplateCategory>,
}

#[derive(Clone)]
pub struct TemplateService {
    templates: Repository<TemplateText>,
}

impl TemplateService {
    pub fn new(templates: Repository<TemplateText>) -> Self {
        Self { templates }
    }

    pub async fn create(&self, input: TemplateInput) -> Result<TemplateText> {
        sonovet_models::validate(&input)?;
        let template = TemplateText::new(RecordMeta::generate().id, input);
        self.templates.insert(&template).await?;
        tracing::info!(template_id = %template.id, organ = %template.organ, "Template created");
        Ok(template)
    }

    /// Ordered by `order`, ascending.
    pub async fn list(&self, filter: &TemplateFilter) -> Result<Vec<TemplateText>> {
        let filter = Filter::all()
            .eq_opt("organ", filter.organ.as_deref())
            .eq_opt("category", filter.category.map(|c| c.as_str()));
        self.templates
            .find(&filter, Some(Sort::asc("order")))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<TemplateText> {
        self.templates.require(id).await
    }

    pub async fn update(&self, id: &str, input: TemplateInput) -> Result<TemplateText> {
        sonovet_models::validate(&input)?;
        let template = TemplateText::new(id.to_string(), input);
        if !self.templates.replace(&template).await? {
            return Err(Error::not_found("Template", id));
        }
        tracing::info!(template_id = %id, "Template updated");
        Ok(template)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.templates.delete(id).await? {
            return Err(Error::not_found("Template", id));
        }
        tracing::info!(template_id = %id, "Template deleted");
        Ok(())
    }
}
