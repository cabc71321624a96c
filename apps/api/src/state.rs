use std::sync::Arc;

use crate::extraction::retry::RetryPolicy;
use crate::llm_client::ModelInvoker;

/// Shared application state injected into all route handlers via Axum
/// extractors. One process-wide model client, constructed once at startup —
/// handlers never build their own.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn ModelInvoker>,
    pub retry: RetryPolicy,
}
