//! Summary renderer
//!
//! Renders the block fragment and optionally writes it to disk together with
//! a JSON snapshot of the summary.

use crate::data::SummarySnapshot;
use crate::templates;
use anyhow::{Context, Result};
use service_status_core::link::DetailLink;
use service_status_core::{StatusSummary, SummaryEntry};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Full block fragment.
    pub fn render_fragment(&self, summary: &StatusSummary) -> String {
        let items = self.render_entries(&summary.entries);
        let detail = self.render_detail_link(&summary.detail_link);
        templates::generate_fragment(&items, &detail)
    }

    fn render_entries(&self, entries: &[SummaryEntry]) -> String {
        entries
            .iter()
            .map(|entry| templates::list_item(entry.badge, &entry.link.name, &entry.link.url))
            .collect::<Vec<_>>()
            .join("")
    }

    fn render_detail_link(&self, link: &DetailLink) -> String {
        templates::detail_link(&link.href, &link.text)
    }

    /// Writes `service-status.html` and `summary.json` into `output_dir`.
    pub fn generate(
        &self,
        summary: &StatusSummary,
        output_dir: impl AsRef<Path>,
    ) -> Result<GeneratedFiles> {
        let output_path = output_dir.as_ref();
        fs::create_dir_all(output_path).context("Failed to create output directory")?;

        let snapshot = SummarySnapshot::new(summary.clone());
        let json =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize summary")?;
        let json_file = output_path.join("summary.json");
        fs::write(&json_file, json).context("Failed to write summary.json")?;

        let html_file = output_path.join("service-status.html");
        fs::write(&html_file, self.render_fragment(summary))
            .context("Failed to write service-status.html")?;

        tracing::info!(output = %output_path.display(), entries = summary.entries.len(), "Rendered status summary");

        Ok(GeneratedFiles {
            html_path: html_file,
            summary_json_path: json_file,
        })
    }
}

/// Paths written by [`SummaryRenderer::generate`].
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    pub html_path: PathBuf,
    pub summary_json_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_status_core::{ServiceId, ServiceLink, StatusBadge};
    use tempfile::tempdir;

    fn entry(id: &str, name: &str, badge: StatusBadge) -> SummaryEntry {
        SummaryEntry {
            service_id: ServiceId::from(id),
            badge,
            link: ServiceLink {
                name: name.to_string(),
                url: format!("/node/{id}"),
            },
        }
    }

    fn summary() -> StatusSummary {
        StatusSummary {
            entries: vec![
                entry("1", "S1", StatusBadge::Issues),
                entry("2", "S2", StatusBadge::Normal),
            ],
            detail_link: DetailLink {
                text: "See more".to_string(),
                href: "/status".to_string(),
            },
        }
    }

    #[test]
    fn test_render_fragment() {
        let html = SummaryRenderer::new().render_fragment(&summary());
        assert_eq!(
            html,
            concat!(
                r#"<div class="service-status-tl"><ul>"#,
                r#"<li><i class="status-issues fa-solid fa-circle-info">Issues</i> <a href="/node/1">S1</a></li>"#,
                r#"<li><i class="status-normal fa-sharp fa-solid fa-circle-check"></i> <a href="/node/2">S2</a></li>"#,
                r#"</ul><div class="status-detail btn"><a href="/status" class="call-out-box__link" title="See more">See more</a></div></div>"#,
            )
        );
    }

    #[test]
    fn test_empty_list_still_has_detail_link() {
        let summary = StatusSummary {
            entries: Vec::new(),
            detail_link: DetailLink {
                text: "More".to_string(),
                href: "#".to_string(),
            },
        };
        let html = SummaryRenderer::new().render_fragment(&summary);
        assert!(html.contains("<ul></ul>"));
        assert!(html.contains(r##"<a href="#" class="call-out-box__link" title="More">More</a>"##));
    }

    #[test]
    fn test_names_are_escaped() {
        let summary = StatusSummary {
            entries: vec![entry("3", "Roads & <Transport>", StatusBadge::Severe)],
            detail_link: DetailLink {
                text: "\"More\"".to_string(),
                href: "/status".to_string(),
            },
        };
        let html = SummaryRenderer::new().render_fragment(&summary);
        assert!(html.contains(">Roads &amp; &lt;Transport&gt;</a>"));
        assert!(html.contains(r#"title="&quot;More&quot;""#));
    }

    #[test]
    fn test_generate_files() {
        let temp_dir = tempdir().unwrap();
        let result = SummaryRenderer::new()
            .generate(&summary(), temp_dir.path())
            .unwrap();

        assert!(result.html_path.exists());
        assert!(result.summary_json_path.exists());

        let html = fs::read_to_string(&result.html_path).unwrap();
        assert!(html.contains("S1"));

        let snapshot: SummarySnapshot =
            serde_json::from_str(&fs::read_to_string(&result.summary_json_path).unwrap())
                .unwrap();
        assert_eq!(snapshot.summary, summary());
    }
}
