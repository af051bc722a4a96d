//! Snapshot format written next to the rendered fragment.

use chrono::{DateTime, Utc};
use service_status_core::StatusSummary;
use serde::{Deserialize, Serialize};

/// summary.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySnapshot {
    /// Format version
    pub version: String,
    /// Render time
    pub generated_at: DateTime<Utc>,
    pub summary: StatusSummary,
}

impl SummarySnapshot {
    pub fn new(summary: StatusSummary) -> Self {
        Self {
            version: "1.0".to_string(),
            generated_at: Utc::now(),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_status_core::link::DetailLink;
    use service_status_core::{ServiceId, ServiceLink, StatusBadge, SummaryEntry};

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = SummarySnapshot::new(StatusSummary {
            entries: vec![SummaryEntry {
                service_id: ServiceId::from("1"),
                badge: StatusBadge::Issues,
                link: ServiceLink {
                    name: "Bins".to_string(),
                    url: "/node/1".to_string(),
                },
            }],
            detail_link: DetailLink {
                text: "More".to_string(),
                href: "/status".to_string(),
            },
        });

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["summary"]["entries"][0]["badge"], "issues");
        assert_eq!(json["summary"]["entries"][0]["service_id"], "1");
        assert_eq!(json["summary"]["detail_link"]["href"], "/status");
    }
}
