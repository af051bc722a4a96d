//! Admin form contract for the block.
//!
//! The host renders the widgets; this module describes the fields, validates
//! a submission and turns it into a [`BlockConfiguration`].

use crate::config::{BlockConfiguration, ServiceSelection};
use crate::link::validate_internal_path;
use crate::model::{SERVICES_LANDING_TYPE, ServiceId};
use crate::repository::{EntityRepository, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const LINK_TEXT_FIELD: &str = "service_status_link_text";
pub const LINK_FIELD: &str = "service_status_link";
pub const SERVICES_FIELD: &str = "service_status_services";

/// Link target shown in the form when none is configured yet.
pub const DEFAULT_LINK_TARGET: &str = "/service-status";
pub const LINK_MAX_LENGTH: usize = 256;

pub const INVALID_LINK_MESSAGE: &str = "Not a valid internal URL.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    TextField {
        max_length: Option<usize>,
        placeholder: Option<String>,
    },
    Checkboxes {
        options: Vec<(ServiceId, String)>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Selection(Vec<ServiceId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub required: bool,
    pub kind: FieldKind,
    pub default_value: FieldValue,
}

/// Raw values posted by the host's form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(rename = "service_status_link_text", default)]
    pub link_text: String,
    #[serde(rename = "service_status_link", default)]
    pub link_target: String,
    /// Checkbox values in option order; unchecked options carry `"0"`.
    #[serde(rename = "service_status_services", default)]
    pub services: Vec<(String, String)>,
}

/// Field-level validation errors, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.0))]
pub struct FormErrors(BTreeMap<&'static str, String>);

fn describe(errors: &BTreeMap<&'static str, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormErrors {
    pub fn set(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct BlockForm {
    repository: Arc<dyn EntityRepository>,
    content_type: String,
}

impl BlockForm {
    pub fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self {
            repository,
            content_type: SERVICES_LANDING_TYPE.to_string(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Configuration of a freshly placed block.
    pub fn default_configuration() -> BlockConfiguration {
        BlockConfiguration::default()
    }

    /// Service checkbox options: every published service of the content type.
    pub async fn service_options(&self) -> StoreResult<Vec<(ServiceId, String)>> {
        Ok(self
            .repository
            .query_published_by_type(&self.content_type)
            .await?
            .into_iter()
            .map(|service| (service.id, service.name))
            .collect())
    }

    pub async fn fields(&self, config: &BlockConfiguration) -> StoreResult<Vec<FormField>> {
        let options = self.service_options().await?;

        Ok(vec![
            FormField {
                name: LINK_TEXT_FIELD,
                title: "More detail link label",
                description: Some(
                    "What text do you want as label for link to detailed status updates page?",
                ),
                required: false,
                kind: FieldKind::TextField {
                    max_length: None,
                    placeholder: None,
                },
                default_value: FieldValue::Text(config.link_text().to_string()),
            },
            FormField {
                name: LINK_FIELD,
                title: "Link target",
                description: Some(
                    "Relative (internal) URL to page that has a detailed list of all current Service Statuses. Requires leading slash",
                ),
                required: true,
                kind: FieldKind::TextField {
                    max_length: Some(LINK_MAX_LENGTH),
                    placeholder: Some("Detailed status overview page".to_string()),
                },
                default_value: FieldValue::Text(
                    config
                        .link_target
                        .clone()
                        .unwrap_or_else(|| DEFAULT_LINK_TARGET.to_string()),
                ),
            },
            FormField {
                name: SERVICES_FIELD,
                title: "Select services to display",
                description: None,
                required: false,
                kind: FieldKind::Checkboxes { options },
                default_value: FieldValue::Selection(config.services.ids().to_vec()),
            },
        ])
    }

    pub fn validate(submission: &FormSubmission) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        let target = submission.link_target.trim();

        if target.is_empty() {
            errors.set(LINK_FIELD, "Link target field is required.");
        } else if target.chars().count() > LINK_MAX_LENGTH {
            errors.set(
                LINK_FIELD,
                format!("Link target cannot be longer than {} characters.", LINK_MAX_LENGTH),
            );
        } else if validate_internal_path(target).is_err() {
            errors.set(LINK_FIELD, INVALID_LINK_MESSAGE);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Stores the submitted values. Unchecked services are dropped.
    pub fn submit(submission: &FormSubmission) -> BlockConfiguration {
        BlockConfiguration {
            link_text: Some(submission.link_text.clone()),
            link_target: Some(submission.link_target.trim().to_string()),
            services: ServiceSelection::from_checkboxes(submission.services.iter().cloned()),
        }
    }

    /// Validate then submit.
    pub fn process(submission: &FormSubmission) -> Result<BlockConfiguration, FormErrors> {
        Self::validate(submission)?;
        Ok(Self::submit(submission))
    }
}
