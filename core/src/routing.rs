//! Route resolution for service links.

use crate::model::ServiceId;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Route \"{0}\" does not exist")]
    NotFound(String),

    #[error("Route \"{name}\" could not be resolved: {reason}")]
    Unresolvable { name: String, reason: String },
}

/// Builds URLs for entities and named routes.
pub trait Router: Send + Sync + 'static {
    /// Canonical URL of a service page.
    fn canonical_url(&self, id: &ServiceId) -> String;

    /// Path of a named route.
    fn route_by_name(&self, name: &str) -> Result<String, RouteError>;
}

/// Router with a canonical path pattern and a table of named routes.
///
/// `{id}` in the pattern is replaced with the service identifier.
#[derive(Debug, Clone)]
pub struct PathRouter {
    pattern: String,
    routes: HashMap<String, String>,
}

impl PathRouter {
    pub const DEFAULT_PATTERN: &'static str = "/node/{id}";

    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(name.into(), path.into());
        self
    }
}

impl Default for PathRouter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATTERN)
    }
}

impl Router for PathRouter {
    fn canonical_url(&self, id: &ServiceId) -> String {
        self.pattern.replace("{id}", id.as_str())
    }

    fn route_by_name(&self, name: &str) -> Result<String, RouteError> {
        self.routes
            .get(name)
            .cloned()
            .ok_or_else(|| RouteError::NotFound(name.to_string()))
    }
}

/// Diagnostic lookup of a named route. Resolution failures become `None`.
pub fn find_route(router: &dyn Router, name: &str) -> Option<String> {
    match router.route_by_name(name) {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::debug!(route = name, error = %err, "Route lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url_uses_pattern() {
        let router = PathRouter::default();
        assert_eq!(router.canonical_url(&ServiceId::from("12")), "/node/12");

        let router = PathRouter::new("/services/{id}/overview");
        assert_eq!(
            router.canonical_url(&ServiceId::from("3")),
            "/services/3/overview"
        );
    }

    #[test]
    fn test_find_route_converts_errors() {
        let router = PathRouter::default().with_route("view.service_status.page", "/service-status");
        assert_eq!(
            find_route(&router, "view.service_status.page").as_deref(),
            Some("/service-status")
        );
        assert_eq!(find_route(&router, "entity.view.missing"), None);
    }
}
