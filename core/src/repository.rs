//! Read-only collaborator contracts implemented by host adapters.

use crate::model::{Service, ServiceId, StatusCode};
use async_trait::async_trait;

/// Failures reported by a storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Store not available: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Access to service entities.
#[async_trait]
pub trait EntityRepository: Send + Sync + 'static {
    /// Load a single service. `Ok(None)` when the entity no longer exists.
    async fn load_by_id(&self, id: &ServiceId) -> StoreResult<Option<Service>>;

    /// All published services of the given content type, in no particular order.
    async fn query_published_by_type(&self, type_name: &str) -> StoreResult<Vec<Service>>;
}

/// Status lookup across a service's sub-pages.
#[async_trait]
pub trait StatusLookup: Send + Sync + 'static {
    /// Most severe status among the records attached to `service_id` whose
    /// owning page is published. `Ok(None)` when no record qualifies.
    async fn most_severe_status(&self, service_id: &ServiceId) -> StoreResult<Option<StatusCode>>;
}
