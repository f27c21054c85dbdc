pub mod jobs;

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::routing::{get, post};

use crate::models::filter::Category;
use crate::routes::AppState;

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(jobs::list))
        .route("/job/{id}", get(jobs::detail))
        .route("/refresh", post(jobs::refresh));

    for category in Category::ALL {
        router = router.route(
            &category.path(),
            get(
                move |State(state): State<AppState>, RawQuery(query): RawQuery| async move {
                    jobs::render_list(&state, Some(category), query.as_deref()).await
                },
            ),
        );
    }

    router.with_state(state)
}
