//! Domain model for the status summary block.
//!
//! Services and their status records are owned by the host content system;
//! everything here is a read-only view of that data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value the host's checkbox widget stores for an unchecked option.
pub const UNSELECTED_SENTINEL: &str = "0";

/// Content type of top-level service landing pages.
pub const SERVICES_LANDING_TYPE: &str = "localgov_services_landing";

/// Workflow state that counts as published under content moderation.
pub const PUBLISHED_STATE: &str = "published";

/// Opaque service identifier, kept in the host's string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the checkbox placeholder that means "not selected".
    pub fn is_unselected(&self) -> bool {
        self.0 == UNSELECTED_SENTINEL
    }

    /// Numeric node id, when the identifier is one in canonical form.
    ///
    /// `"05"` and `"+5"` are not node ids, so they never alias node 5.
    pub fn as_node_id(&self) -> Option<i64> {
        let nid: i64 = self.0.parse().ok()?;
        (nid.to_string() == self.0).then_some(nid)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ServiceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for ServiceId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// A service landing page as loaded from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    /// Simple published flag.
    pub published: bool,
    /// Workflow state when content moderation is enabled on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_state: Option<String>,
}

impl Service {
    pub fn new(id: impl Into<ServiceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            published: true,
            moderation_state: None,
        }
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    pub fn with_moderation_state(mut self, state: impl Into<String>) -> Self {
        self.moderation_state = Some(state.into());
        self
    }
}

/// One status entry attached to a sub-page of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub parent_service_id: ServiceId,
    /// Raw status value as stored by the host (e.g. `0-severe-impact`).
    pub status_value: String,
    /// Whether the page owning this record is published.
    pub owner_published: bool,
}

impl StatusRecord {
    pub fn new(
        parent: impl Into<ServiceId>,
        status_value: impl Into<String>,
        owner_published: bool,
    ) -> Self {
        Self {
            parent_service_id: parent.into(),
            status_value: status_value.into(),
            owner_published,
        }
    }
}

/// Status codes, ordered most severe first.
///
/// Unrecognized values rank below every known code, whatever their raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum StatusCode {
    SevereImpact,
    HasIssues,
    Unrecognized(String),
}

impl StatusCode {
    pub const SEVERE_IMPACT: &'static str = "0-severe-impact";
    pub const HAS_ISSUES: &'static str = "1-has-issues";

    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::SEVERE_IMPACT => StatusCode::SevereImpact,
            Self::HAS_ISSUES => StatusCode::HasIssues,
            other => StatusCode::Unrecognized(other.to_string()),
        }
    }

    /// Lower is more severe.
    pub fn severity_rank(&self) -> u8 {
        match self {
            StatusCode::SevereImpact => 0,
            StatusCode::HasIssues => 1,
            StatusCode::Unrecognized(_) => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusCode::SevereImpact => Self::SEVERE_IMPACT,
            StatusCode::HasIssues => Self::HAS_ISSUES,
            StatusCode::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for StatusCode {
    fn from(value: String) -> Self {
        StatusCode::parse(&value)
    }
}

impl From<StatusCode> for String {
    fn from(value: StatusCode) -> Self {
        value.as_str().to_string()
    }
}

/// Icon shown in front of each service in the summary list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Normal,
    Issues,
    Severe,
}

impl StatusBadge {
    /// Badge for the most severe status of a service; anything unknown is
    /// shown as normal.
    pub fn for_status(status: Option<&StatusCode>) -> Self {
        match status {
            Some(StatusCode::SevereImpact) => StatusBadge::Severe,
            Some(StatusCode::HasIssues) => StatusBadge::Issues,
            Some(StatusCode::Unrecognized(_)) | None => StatusBadge::Normal,
        }
    }

    /// Severity-specific CSS class.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBadge::Normal => "status-normal",
            StatusBadge::Issues => "status-issues",
            StatusBadge::Severe => "status-severe",
        }
    }

    /// Icon font classes for the glyph.
    pub fn icon_classes(&self) -> &'static str {
        match self {
            StatusBadge::Normal => "fa-sharp fa-solid fa-circle-check",
            StatusBadge::Issues => "fa-solid fa-circle-info",
            StatusBadge::Severe => "fa-sharp fa-solid fa-triangle-exclamation",
        }
    }

    /// Visible label inside the icon element.
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Normal => "",
            StatusBadge::Issues => "Issues",
            StatusBadge::Severe => "Severe",
        }
    }
}

/// How publication state is decided for a loaded service.
///
/// Chosen once when the builder is composed, depending on whether the host
/// runs a moderation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationPolicy {
    /// Published when the workflow state is `published`.
    ContentModeration,
    /// Published when the simple published flag is set.
    #[default]
    PublishedFlag,
}

impl PublicationPolicy {
    pub fn is_published(&self, service: &Service) -> bool {
        match self {
            PublicationPolicy::ContentModeration => {
                service.moderation_state.as_deref() == Some(PUBLISHED_STATE)
            }
            PublicationPolicy::PublishedFlag => service.published,
        }
    }
}
