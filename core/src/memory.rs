//! In-memory content store.
//!
//! Useful for hosts that preload their data and for exercising the builder
//! without a database.

use crate::model::{Service, ServiceId, StatusCode, StatusRecord};
use crate::repository::{EntityRepository, StatusLookup, StoreResult};
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    services: Vec<(String, Service)>,
    records: Vec<StatusRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service of the given content type.
    pub fn with_service(mut self, content_type: impl Into<String>, service: Service) -> Self {
        self.services.push((content_type.into(), service));
        self
    }

    pub fn with_record(mut self, record: StatusRecord) -> Self {
        self.records.push(record);
        self
    }
}

#[async_trait]
impl EntityRepository for MemoryStore {
    async fn load_by_id(&self, id: &ServiceId) -> StoreResult<Option<Service>> {
        Ok(self
            .services
            .iter()
            .find(|(_, service)| &service.id == id)
            .map(|(_, service)| service.clone()))
    }

    async fn query_published_by_type(&self, type_name: &str) -> StoreResult<Vec<Service>> {
        Ok(self
            .services
            .iter()
            .filter(|(content_type, service)| content_type == type_name && service.published)
            .map(|(_, service)| service.clone())
            .collect())
    }
}

#[async_trait]
impl StatusLookup for MemoryStore {
    async fn most_severe_status(&self, service_id: &ServiceId) -> StoreResult<Option<StatusCode>> {
        Ok(self
            .records
            .iter()
            .filter(|record| &record.parent_service_id == service_id && record.owner_published)
            .map(|record| StatusCode::parse(&record.status_value))
            .min_by_key(StatusCode::severity_rank))
    }
}
