//! SQL implementation of the read-only content contracts.

use crate::pool::ContentPool;
use async_trait::async_trait;
use service_status_core::model::{Service, ServiceId, StatusCode};
use service_status_core::repository::{EntityRepository, StatusLookup, StoreError, StoreResult};

const LOAD_SERVICE: &str = "SELECT n.nid, n.title, n.status, m.moderation_state
    FROM node_field_data n
    LEFT JOIN content_moderation_state_field_data m
        ON m.content_entity_type_id = 'node' AND m.content_entity_id = n.nid
    WHERE n.nid = ?";

const PUBLISHED_BY_TYPE: &str = "SELECT n.nid, n.title, n.status, m.moderation_state
    FROM node_field_data n
    LEFT JOIN content_moderation_state_field_data m
        ON m.content_entity_type_id = 'node' AND m.content_entity_id = n.nid
    WHERE n.type = ? AND n.status = 1";

// Known codes rank ahead of anything unrecognized, matching
// `StatusCode::severity_rank`.
const MOST_SEVERE_STATUS: &str = "SELECT s.localgov_service_status_value
    FROM node__localgov_service_status s
    JOIN node__localgov_services_parent p ON p.entity_id = s.entity_id
    JOIN node_field_data n ON p.entity_id = n.nid
    WHERE p.localgov_services_parent_target_id = ? AND n.status = 1
    ORDER BY CASE s.localgov_service_status_value
            WHEN '0-severe-impact' THEN 0
            WHEN '1-has-issues' THEN 1
            ELSE 2
        END ASC,
        s.localgov_service_status_value ASC
    LIMIT 1";

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    nid: i64,
    title: String,
    status: i64,
    moderation_state: Option<String>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: ServiceId::from(row.nid),
            name: row.title,
            published: row.status == 1,
            moderation_state: row.moderation_state,
        }
    }
}

fn query_failed(err: sqlx::Error) -> StoreError {
    StoreError::QueryFailed(err.to_string())
}

/// Content store backed by the host's node tables.
#[derive(Clone)]
pub struct SqlContentStore {
    pool: ContentPool,
}

impl SqlContentStore {
    pub fn new(pool: ContentPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &ContentPool {
        &self.pool
    }
}

#[async_trait]
impl EntityRepository for SqlContentStore {
    async fn load_by_id(&self, id: &ServiceId) -> StoreResult<Option<Service>> {
        // Node ids are numeric; anything else cannot exist.
        let Some(nid) = id.as_node_id() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ServiceRow>(LOAD_SERVICE)
            .bind(nid)
            .fetch_optional(self.pool.inner())
            .await
            .map_err(query_failed)?;
        Ok(row.map(Service::from))
    }

    async fn query_published_by_type(&self, type_name: &str) -> StoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, ServiceRow>(PUBLISHED_BY_TYPE)
            .bind(type_name)
            .fetch_all(self.pool.inner())
            .await
            .map_err(query_failed)?;
        tracing::debug!(type_name, count = rows.len(), "Queried published services");
        Ok(rows.into_iter().map(Service::from).collect())
    }
}

#[async_trait]
impl StatusLookup for SqlContentStore {
    async fn most_severe_status(&self, service_id: &ServiceId) -> StoreResult<Option<StatusCode>> {
        let Some(nid) = service_id.as_node_id() else {
            return Ok(None);
        };

        let value = sqlx::query_scalar::<_, String>(MOST_SEVERE_STATUS)
            .bind(nid)
            .fetch_optional(self.pool.inner())
            .await
            .map_err(query_failed)?;
        Ok(value.map(StatusCode::from))
    }
}
