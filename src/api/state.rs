//! Shared application state

use std::sync::Arc;

use crate::service::RecommendationService;

/// Default bound on in-flight requests
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 64;

/// State handed to every request handler
pub struct AppState {
    /// The recommendation engine, read-only after startup
    pub service: Arc<RecommendationService>,

    /// Requests beyond this wait for a free slot
    pub max_concurrent_requests: usize,
}

impl AppState {
    pub fn new(service: Arc<RecommendationService>) -> Self {
        Self {
            service,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }

    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit.max(1);
        self
    }
}
