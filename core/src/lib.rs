//! # Service Status Core
//!
//! Builds the summary shown by the service status block: which services to
//! list, each one's most severe current status, and the validated "more
//! detail" link. Storage, routing and logging are supplied by the host
//! through the traits in [`repository`], [`routing`] and [`notice`].

pub mod config;
pub mod form;
pub mod link;
pub mod memory;
pub mod model;
pub mod notice;
pub mod repository;
pub mod routing;
pub mod summary;
pub mod telemetry;

pub use config::{BlockConfiguration, ConfigError, ServiceSelection, StatusBlockSettings};
pub use form::{BlockForm, FormErrors, FormSubmission};
pub use link::{DetailLink, LinkError};
pub use memory::MemoryStore;
pub use model::{
    PublicationPolicy, Service, ServiceId, StatusBadge, StatusCode, StatusRecord,
};
pub use notice::{NoticeLog, RecordingNoticeLog, TracingNoticeLog};
pub use repository::{EntityRepository, StatusLookup, StoreError, StoreResult};
pub use routing::{PathRouter, RouteError, Router, find_route};
pub use summary::{ServiceLink, StatusSummary, StatusSummaryBuilder, SummaryEntry};

pub mod prelude {
    pub use crate::config::{BlockConfiguration, StatusBlockSettings};
    pub use crate::model::{PublicationPolicy, Service, ServiceId, StatusBadge, StatusCode};
    pub use crate::repository::{EntityRepository, StatusLookup};
    pub use crate::summary::{StatusSummary, StatusSummaryBuilder};
}
