pub mod api;
pub mod ui;

use std::sync::Arc;

use crate::store::JobStore;

/// Shared state for every route: the job snapshot and list settings.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
    pub page_size: usize,
}
