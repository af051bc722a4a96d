//! Block configuration and composition settings.
//!
//! `BlockConfiguration` is the per-instance configuration persisted by the
//! host under the `service_status_*` keys. `StatusBlockSettings` holds the
//! site-level choices made once when the builder is composed.

use crate::model::{PublicationPolicy, SERVICES_LANDING_TYPE, ServiceId, UNSELECTED_SENTINEL};
use crate::routing::PathRouter;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Label used when no link text is configured.
pub const DEFAULT_LINK_TEXT: &str = "More detail about status updates.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-instance block configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfiguration {
    #[serde(
        rename = "service_status_link_text",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub link_text: Option<String>,

    #[serde(
        rename = "service_status_link",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub link_target: Option<String>,

    /// Selected services; empty means "all published services".
    #[serde(rename = "service_status_services", default)]
    pub services: ServiceSelection,
}

impl Default for BlockConfiguration {
    fn default() -> Self {
        Self {
            link_text: Some(DEFAULT_LINK_TEXT.to_string()),
            link_target: None,
            services: ServiceSelection::default(),
        }
    }
}

impl BlockConfiguration {
    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.link_target = Some(target.into());
        self
    }

    pub fn with_link_text(mut self, text: impl Into<String>) -> Self {
        self.link_text = Some(text.into());
        self
    }

    pub fn with_services<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ServiceId>,
    {
        self.services = ServiceSelection::from_ids(ids);
        self
    }

    /// Link text, falling back to [`DEFAULT_LINK_TEXT`] when unset or empty.
    pub fn link_text(&self) -> &str {
        self.link_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_LINK_TEXT)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads a `.json` or `.toml` file; any other extension is read as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }
}

/// Ordered set of selected service ids.
///
/// Deserializes from either a plain list of ids or the host's checkbox map
/// (`{"5": "5", "7": "0"}`), where a `"0"` value marks an unchecked option.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ServiceSelection(Vec<ServiceId>);

impl ServiceSelection {
    /// Keeps ids as given, minus duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ServiceId>,
    {
        let mut selected: Vec<ServiceId> = Vec::new();
        for id in ids.into_iter().map(Into::into) {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        Self(selected)
    }

    /// Converts checkbox pairs `(option, value)` into a selection, dropping
    /// unchecked options.
    pub fn from_checkboxes<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::from_ids(
            pairs
                .into_iter()
                .filter(|(_, value)| is_checked(value.as_ref()))
                .map(|(key, _)| ServiceId::new(key)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[ServiceId] {
        &self.0
    }
}

fn is_checked(value: &str) -> bool {
    !value.is_empty() && value != UNSELECTED_SENTINEL
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Text(text) => text,
            RawValue::Number(n) => n.to_string(),
            RawValue::Flag(true) => "1".to_string(),
            RawValue::Flag(false) => UNSELECTED_SENTINEL.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SelectionVisitor;

        impl<'de> Visitor<'de> for SelectionVisitor {
            type Value = ServiceSelection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of service ids or a map of checkbox values")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut ids = Vec::new();
                while let Some(raw) = seq.next_element::<RawValue>()? {
                    ids.push(raw.into_text());
                }
                Ok(ServiceSelection::from_ids(ids))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, RawValue>()? {
                    pairs.push((key, value.into_text()));
                }
                Ok(ServiceSelection::from_checkboxes(pairs))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ServiceSelection::default())
            }
        }

        deserializer.deserialize_any(SelectionVisitor)
    }
}

/// Site-level settings chosen when composing the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBlockSettings {
    /// Content type queried when no services are selected.
    pub content_type: String,
    pub publication_policy: PublicationPolicy,
    /// Canonical path pattern for service pages; `{id}` is substituted.
    pub canonical_route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

impl Default for StatusBlockSettings {
    fn default() -> Self {
        Self {
            content_type: SERVICES_LANDING_TYPE.to_string(),
            publication_policy: PublicationPolicy::default(),
            canonical_route: PathRouter::DEFAULT_PATTERN.to_string(),
            database_url: None,
        }
    }
}

impl StatusBlockSettings {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }

    pub fn router(&self) -> PathRouter {
        PathRouter::new(self.canonical_route.clone())
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
