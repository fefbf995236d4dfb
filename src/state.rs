use std::sync::Arc;
use std::time::Duration;

use crate::catalog::service::CatalogService;
use crate::catalog::CatalogResource;
use crate::config::AppConfig;
use crate::database::DocumentStore;
use crate::middleware::rate_limit::RateLimiter;

/// Shared request state: the configuration snapshot, the document store
/// handle, and the auth-route rate limiter. Everything else is
/// request-scoped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub auth_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let auth_limiter = Arc::new(RateLimiter::new(
            config.api.rate_limit_requests,
            Duration::from_secs(config.api.rate_limit_window_secs),
        ));
        Self { config: Arc::new(config), store, auth_limiter }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.api.request_timeout_secs)
    }

    /// Catalog service for one resource type, bound to the shared store.
    pub fn service<R: CatalogResource>(&self) -> CatalogService<R> {
        CatalogService::new(self.store.clone(), self.request_timeout())
    }
}
