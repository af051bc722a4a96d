//! Detail link validation.
//!
//! The configured call-to-action target must stay on the site: a rooted,
//! relative path with no scheme and no host. Anything else is replaced by a
//! self-link placeholder when rendering.

use crate::config::BlockConfiguration;
use crate::notice::NoticeLog;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Target used when the configured link is rejected.
pub const PLACEHOLDER_HREF: &str = "#";

/// Schemes that survive dangerous-protocol stripping.
pub const ALLOWED_PROTOCOLS: &[&str] = &[
    "ftp", "http", "https", "irc", "mailto", "news", "nntp", "rtsp", "sftp", "ssh", "tel",
    "telnet", "webcal",
];

static RELATIVE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[A-Za-z0-9_#!:.?+=&@$'~*,;/()\[\]\-]|%[0-9a-f]{2})+$")
        .expect("relative URL pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Link target is empty")]
    Empty,

    #[error("Link target is not a well-formed URL: {0}")]
    Malformed(String),

    #[error("Link target points off-site: {0}")]
    External(String),

    #[error("Link target must start with '/': {0}")]
    NotRooted(String),
}

/// Character-level validity of a relative URL.
pub fn is_valid_relative_url(target: &str) -> bool {
    RELATIVE_URL.is_match(target)
}

/// Accepts only rooted site paths such as `/service-status`.
pub fn validate_internal_path(target: &str) -> Result<(), LinkError> {
    if target.is_empty() {
        return Err(LinkError::Empty);
    }
    if !is_valid_relative_url(target) {
        return Err(LinkError::Malformed(target.to_string()));
    }
    // Parsing without a base only succeeds when a scheme is present.
    if url::Url::parse(target).is_ok() || target.starts_with("//") {
        return Err(LinkError::External(target.to_string()));
    }
    if !target.starts_with('/') {
        return Err(LinkError::NotRooted(target.to_string()));
    }
    Ok(())
}

/// Removes scheme prefixes that are not in [`ALLOWED_PROTOCOLS`], repeatedly,
/// so that `javascript:javascript:alert(1)` loses both prefixes.
pub fn strip_dangerous_protocols(uri: &str) -> String {
    let mut uri = uri.to_string();
    loop {
        let before = uri.clone();
        if let Some(colon) = uri.find(':').filter(|pos| *pos > 0) {
            let protocol = &uri[..colon];
            // A colon after '/', '?' or '#' is part of a relative path.
            if protocol.contains(['/', '?', '#']) {
                break;
            }
            if !ALLOWED_PROTOCOLS.contains(&protocol.to_ascii_lowercase().as_str()) {
                uri = uri[colon + 1..].to_string();
            }
        }
        if before == uri {
            break;
        }
    }
    uri
}

/// The single "more detail" link shown under the status list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLink {
    pub text: String,
    pub href: String,
}

impl DetailLink {
    /// Builds the link from configuration. A rejected target becomes `#` and a
    /// notice is reported; the text is always kept.
    pub fn from_config(config: &BlockConfiguration, log: &dyn NoticeLog) -> Self {
        let text = config.link_text().to_string();
        let target = config.link_target.as_deref().unwrap_or_default();

        let href = match validate_internal_path(target) {
            Ok(()) => strip_dangerous_protocols(target),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected detail link target");
                log.notice(&format!("Invalid link: {}", target));
                PLACEHOLDER_HREF.to_string()
            }
        };

        Self { text, href }
    }

    pub fn is_placeholder(&self) -> bool {
        self.href == PLACEHOLDER_HREF
    }
}
