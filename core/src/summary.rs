//! Status summary assembly.
//!
//! A single read-only pass per render: resolve which services to show, drop
//! the ones that are gone or unpublished, look up each one's most severe
//! status and pair it with a link. Collaborator failures degrade the output
//! and are logged; they never fail the render.

use crate::config::{BlockConfiguration, StatusBlockSettings};
use crate::link::DetailLink;
use crate::model::{PublicationPolicy, SERVICES_LANDING_TYPE, ServiceId, StatusBadge, StatusCode};
use crate::notice::{NoticeLog, TracingNoticeLog};
use crate::repository::{EntityRepository, StatusLookup};
use crate::routing::{PathRouter, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Link to a service page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLink {
    pub name: String,
    pub url: String,
}

/// One row of the summary list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub service_id: ServiceId,
    pub badge: StatusBadge,
    pub link: ServiceLink,
}

/// Everything needed to render the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub entries: Vec<SummaryEntry>,
    pub detail_link: DetailLink,
}

pub struct StatusSummaryBuilder {
    repository: Arc<dyn EntityRepository>,
    lookup: Arc<dyn StatusLookup>,
    router: Arc<dyn Router>,
    notices: Arc<dyn NoticeLog>,
    policy: PublicationPolicy,
    content_type: String,
}

impl StatusSummaryBuilder {
    /// Builder with the default router, tracing notices, the published-flag
    /// policy and the service landing page content type.
    pub fn new(repository: Arc<dyn EntityRepository>, lookup: Arc<dyn StatusLookup>) -> Self {
        Self {
            repository,
            lookup,
            router: Arc::new(PathRouter::default()),
            notices: Arc::new(TracingNoticeLog),
            policy: PublicationPolicy::default(),
            content_type: SERVICES_LANDING_TYPE.to_string(),
        }
    }

    /// Builder configured from site settings.
    pub fn from_settings(
        settings: &StatusBlockSettings,
        repository: Arc<dyn EntityRepository>,
        lookup: Arc<dyn StatusLookup>,
    ) -> Self {
        Self::new(repository, lookup)
            .with_router(Arc::new(settings.router()))
            .with_policy(settings.publication_policy)
            .with_content_type(settings.content_type.clone())
    }

    pub fn with_router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = router;
        self
    }

    pub fn with_notices(mut self, notices: Arc<dyn NoticeLog>) -> Self {
        self.notices = notices;
        self
    }

    pub fn with_policy(mut self, policy: PublicationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Services to display: the configured selection as-is, or every
    /// published service of the content type when nothing is selected.
    pub async fn resolve_service_list(&self, config: &BlockConfiguration) -> Vec<ServiceId> {
        if !config.services.is_empty() {
            return config.services.ids().to_vec();
        }

        match self
            .repository
            .query_published_by_type(&self.content_type)
            .await
        {
            Ok(services) => services.into_iter().map(|service| service.id).collect(),
            Err(err) => {
                tracing::warn!(
                    content_type = %self.content_type,
                    error = %err,
                    "Failed to query services; rendering an empty list"
                );
                Vec::new()
            }
        }
    }

    pub async fn build_summary(&self, config: &BlockConfiguration) -> StatusSummary {
        let mut entries = Vec::new();

        for id in self.resolve_service_list(config).await {
            if id.is_unselected() {
                continue;
            }
            if let Some(entry) = self.build_entry(&id).await {
                entries.push(entry);
            }
        }

        tracing::debug!(entries = entries.len(), "Built service status summary");

        StatusSummary {
            entries,
            detail_link: self.build_detail_link(config),
        }
    }

    pub fn build_detail_link(&self, config: &BlockConfiguration) -> DetailLink {
        DetailLink::from_config(config, self.notices.as_ref())
    }

    async fn build_entry(&self, id: &ServiceId) -> Option<SummaryEntry> {
        let service = match self.repository.load_by_id(id).await {
            Ok(Some(service)) => service,
            Ok(None) => {
                tracing::debug!(service_id = %id, "Skipping stale service reference");
                return None;
            }
            Err(err) => {
                tracing::warn!(service_id = %id, error = %err, "Failed to load service");
                return None;
            }
        };

        if !self.policy.is_published(&service) {
            return None;
        }

        let link = ServiceLink {
            url: self.router.canonical_url(id),
            name: service.name,
        };

        let status = match self.lookup.most_severe_status(id).await {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(service_id = %id, error = %err, "Status lookup failed");
                None
            }
        };
        if let Some(StatusCode::Unrecognized(raw)) = &status {
            tracing::warn!(service_id = %id, status = %raw, "Unrecognized status value");
        }

        Some(SummaryEntry {
            service_id: id.clone(),
            badge: StatusBadge::for_status(status.as_ref()),
            link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::{Service, StatusRecord};
    use crate::notice::RecordingNoticeLog;
    use crate::repository::{StoreError, StoreResult};
    use async_trait::async_trait;

    fn builder(store: MemoryStore) -> StatusSummaryBuilder {
        let store = Arc::new(store);
        StatusSummaryBuilder::new(store.clone(), store)
    }

    fn badges(summary: &StatusSummary) -> Vec<(&str, StatusBadge)> {
        summary
            .entries
            .iter()
            .map(|entry| (entry.link.name.as_str(), entry.badge))
            .collect()
    }

    #[tokio::test]
    async fn test_selection_is_returned_verbatim() {
        let config = BlockConfiguration::default().with_services(["7", "99", "3"]);
        let ids = builder(MemoryStore::new()).resolve_service_list(&config).await;
        assert_eq!(
            ids,
            vec![ServiceId::from("7"), ServiceId::from("99"), ServiceId::from("3")]
        );
    }

    #[tokio::test]
    async fn test_fallback_lists_published_services_of_type() {
        let store = MemoryStore::new()
            .with_service(SERVICES_LANDING_TYPE, Service::new("1", "Bins"))
            .with_service(SERVICES_LANDING_TYPE, Service::new("2", "Roads").unpublished())
            .with_service("article", Service::new("3", "News"));

        let ids = builder(store)
            .resolve_service_list(&BlockConfiguration::default())
            .await;
        assert_eq!(ids, vec![ServiceId::from("1")]);
    }

    #[tokio::test]
    async fn test_severe_wins_over_issues() {
        let store = MemoryStore::new()
            .with_service(SERVICES_LANDING_TYPE, Service::new("1", "Bins"))
            .with_record(StatusRecord::new("1", StatusCode::HAS_ISSUES, true))
            .with_record(StatusRecord::new("1", StatusCode::SEVERE_IMPACT, true));

        let summary = builder(store)
            .build_summary(&BlockConfiguration::default())
            .await;
        assert_eq!(badges(&summary), vec![("Bins", StatusBadge::Severe)]);
    }

    #[tokio::test]
    async fn test_unrecognized_status_is_normal() {
        let store = MemoryStore::new()
            .with_service(SERVICES_LANDING_TYPE, Service::new("1", "Bins"))
            .with_record(StatusRecord::new("1", "2-no-issues", true));

        let summary = builder(store)
            .build_summary(&BlockConfiguration::default())
            .await;
        assert_eq!(badges(&summary), vec![("Bins", StatusBadge::Normal)]);
    }

    #[tokio::test]
    async fn test_moderation_policy_filters_drafts() {
        let store = MemoryStore::new()
            .with_service(
                SERVICES_LANDING_TYPE,
                Service::new("1", "Bins").with_moderation_state("published"),
            )
            .with_service(
                SERVICES_LANDING_TYPE,
                Service::new("2", "Roads").with_moderation_state("draft"),
            );

        let summary = builder(store)
            .with_policy(PublicationPolicy::ContentModeration)
            .build_summary(&BlockConfiguration::default().with_services(["1", "2"]))
            .await;
        assert_eq!(badges(&summary), vec![("Bins", StatusBadge::Normal)]);
    }

    #[tokio::test]
    async fn test_order_follows_selection() {
        let store = MemoryStore::new()
            .with_service(SERVICES_LANDING_TYPE, Service::new("1", "Bins"))
            .with_service(SERVICES_LANDING_TYPE, Service::new("2", "Roads"))
            .with_record(StatusRecord::new("1", StatusCode::SEVERE_IMPACT, true));

        let summary = builder(store)
            .build_summary(&BlockConfiguration::default().with_services(["2", "1"]))
            .await;
        assert_eq!(
            badges(&summary),
            vec![("Roads", StatusBadge::Normal), ("Bins", StatusBadge::Severe)]
        );
    }

    struct FailingStore;

    #[async_trait]
    impl EntityRepository for FailingStore {
        async fn load_by_id(&self, _id: &ServiceId) -> StoreResult<Option<Service>> {
            Ok(Some(Service::new("1", "Bins")))
        }

        async fn query_published_by_type(&self, _type_name: &str) -> StoreResult<Vec<Service>> {
            Err(StoreError::Unavailable("database offline".to_string()))
        }
    }

    #[async_trait]
    impl StatusLookup for FailingStore {
        async fn most_severe_status(&self, _id: &ServiceId) -> StoreResult<Option<StatusCode>> {
            Err(StoreError::QueryFailed("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failures_degrade() {
        let store = Arc::new(FailingStore);
        let notices = Arc::new(RecordingNoticeLog::new());
        let builder =
            StatusSummaryBuilder::new(store.clone(), store).with_notices(notices.clone());

        let empty = builder
            .build_summary(&BlockConfiguration::default().with_link("/status"))
            .await;
        assert!(empty.entries.is_empty());
        assert_eq!(empty.detail_link.href, "/status");

        let selected = builder
            .build_summary(&BlockConfiguration::default().with_services(["1"]))
            .await;
        assert_eq!(badges(&selected), vec![("Bins", StatusBadge::Normal)]);
        assert_eq!(notices.entries(), vec!["Invalid link: "]);
    }

    #[tokio::test]
    async fn test_from_settings_uses_route_pattern() {
        let settings = StatusBlockSettings {
            canonical_route: "/services/{id}".to_string(),
            ..StatusBlockSettings::default()
        };
        let store = Arc::new(
            MemoryStore::new().with_service(SERVICES_LANDING_TYPE, Service::new("4", "Libraries")),
        );

        let summary = StatusSummaryBuilder::from_settings(&settings, store.clone(), store)
            .build_summary(&BlockConfiguration::default())
            .await;
        assert_eq!(summary.entries[0].link.url, "/services/4");
    }
}
