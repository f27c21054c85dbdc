pub mod jobs;

use axum::Router;
use axum::routing::get;

use crate::routes::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/jobs", get(jobs::list))
        .route("/jobs/{id}", get(jobs::get))
        .route("/facets", get(jobs::facets))
        .with_state(state);

    Router::new().nest("/api/v1", api)
}
