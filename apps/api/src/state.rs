use std::sync::Arc;

use crate::dispatch::PromptDispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The dispatcher owns the resolved credential and the chat client,
    /// so handlers never touch either directly.
    pub dispatcher: Arc<PromptDispatcher>,
}
