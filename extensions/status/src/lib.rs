//! # Service Status Render
//!
//! Turns a [`StatusSummary`](service_status_core::StatusSummary) into the
//! block's HTML fragment: a list of services, each prefixed by its status
//! icon, followed by the "more detail" call-to-action.
//!
//! ## Output files
//!
//! - **service-status.html**: the rendered fragment
//! - **summary.json**: snapshot of the summary it was rendered from

pub mod data;
pub mod generator;
mod templates;

pub use data::SummarySnapshot;
pub use generator::{GeneratedFiles, SummaryRenderer};
pub use templates::escape_html;
