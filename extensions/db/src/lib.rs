// # Service Status Database Integration
//
// SQL adapter for the host's node tables. It implements the read-only
// `EntityRepository` and `StatusLookup` contracts from the core crate.

pub mod pool;
pub mod schema;
pub mod store;

// Re-exports for convenience
pub use pool::{ContentPool, DbPoolError, PoolSize};
pub use schema::install_schema;
pub use store::SqlContentStore;
