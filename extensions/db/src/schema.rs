//! Table layout read by [`SqlContentStore`](crate::store::SqlContentStore).
//!
//! Mirrors the subset of the host's node storage the block touches: node
//! base data, the service parent reference, the status field and the
//! moderation state table.

use crate::pool::ContentPool;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS node_field_data (
        nid INTEGER PRIMARY KEY,
        type TEXT NOT NULL,
        title TEXT NOT NULL,
        status INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS node__localgov_services_parent (
        entity_id INTEGER NOT NULL,
        localgov_services_parent_target_id INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS node__localgov_service_status (
        entity_id INTEGER NOT NULL,
        localgov_service_status_value TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS content_moderation_state_field_data (
        content_entity_type_id TEXT NOT NULL,
        content_entity_id INTEGER NOT NULL,
        moderation_state TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS services_parent_target
        ON node__localgov_services_parent (localgov_services_parent_target_id)",
];

/// Create the tables if they do not exist yet.
pub async fn install_schema(pool: &ContentPool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool.inner()).await?;
    }
    tracing::info!("Installed content store schema");
    Ok(())
}
