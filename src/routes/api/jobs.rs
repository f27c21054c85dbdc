use axum::Json;
use axum::extract::{Path, RawQuery, State};
use serde::Serialize;
use url::form_urlencoded;

use crate::error::AppError;
use crate::facets::Facets;
use crate::models::filter::{Category, FilterState};
use crate::models::job::JobRecord;
use crate::pipeline;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobRecord>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// GET /api/v1/jobs
///
/// Same query as the list view, plus an optional `category` slug. The page is
/// not clamped: asking past the end returns an empty `jobs` array.
pub async fn list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<JobPage>, AppError> {
    let snapshot = state.store.ready_snapshot().await?;
    let category = category_param(query.as_deref())?;
    let filter = FilterState::parse(category, query.as_deref());

    let result = pipeline::apply(&snapshot.jobs, &filter, state.page_size);
    Ok(Json(JobPage {
        jobs: result.page.into_iter().cloned().collect(),
        total_matched: result.total_matched,
        total_pages: result.total_pages,
        current_page: filter.current_page(),
    }))
}

fn category_param(raw_query: Option<&str>) -> Result<Option<Category>, AppError> {
    let Some(raw) = raw_query else {
        return Ok(None);
    };
    match form_urlencoded::parse(raw.as_bytes()).find(|(k, v)| k == "category" && !v.is_empty()) {
        Some((_, slug)) => Category::from_slug(&slug)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown category '{slug}'"))),
        None => Ok(None),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobRecord>, AppError> {
    let snapshot = state.store.ready_snapshot().await?;
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(snapshot.find(id)?.clone()))
}

pub async fn facets(State(state): State<AppState>) -> Result<Json<Facets>, AppError> {
    let snapshot = state.store.ready_snapshot().await?;
    Ok(Json(snapshot.facets.clone()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::store::JobStore;
    use crate::testutil::{MockSource, job, sample_jobs};

    async fn app(jobs: Vec<JobRecord>) -> Router {
        let store = Arc::new(JobStore::new(Arc::new(MockSource::new(jobs))));
        store.refresh().await.unwrap();
        crate::routes::api::router(AppState {
            store,
            page_size: 10,
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn ids(value: &serde_json::Value) -> Vec<i64> {
        value["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_i64().unwrap())
            .collect()
    }

    fn two_jobs() -> Vec<JobRecord> {
        vec![
            job(1, "Backend Engineer", "Acme", &["python", "remote"], "USA"),
            job(2, "Designer", "Studio", &["figma"], "USA Only"),
        ]
    }

    #[tokio::test]
    async fn filters_by_search_tags_and_location() {
        let app = app(two_jobs()).await;

        let (_, body) = get_json(app.clone(), "/api/v1/jobs?q=engineer").await;
        assert_eq!(ids(&body), [1]);

        let (_, body) = get_json(app.clone(), "/api/v1/jobs?tag=python&tag=remote").await;
        assert_eq!(ids(&body), [1]);

        let (status, body) = get_json(app, "/api/v1/jobs?location=USA+Only").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), [2]);
        assert_eq!(body["total_matched"], 1);
        assert_eq!(body["total_pages"], 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_not_an_error() {
        let (status, body) = get_json(app(two_jobs()).await, "/api/v1/jobs?page=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), Vec::<i64>::new());
        assert_eq!(body["current_page"], 5);
        assert_eq!(body["total_matched"], 2);
    }

    #[tokio::test]
    async fn category_param_selects_preset() {
        let app = app(sample_jobs()).await;
        let (_, body) = get_json(app.clone(), "/api/v1/jobs?category=marketing").await;
        assert_eq!(ids(&body), [4]);

        let (status, body) = get_json(app, "/api/v1/jobs?category=sales").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown category 'sales'");
    }

    #[tokio::test]
    async fn get_by_id() {
        let app = app(vec![
            job(1, "A", "Co", &[], "USA"),
            job(2, "B", "Co", &[], "USA"),
            job(3, "C", "Co", &[], "USA"),
        ])
        .await;

        let (status, body) = get_json(app.clone(), "/api/v1/jobs/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "B");
        assert_eq!(body["url"], "https://example.com/jobs/2");

        let (status, body) = get_json(app, "/api/v1/jobs/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Job not found");
    }

    #[tokio::test]
    async fn facets_endpoint() {
        let (_, body) = get_json(app(two_jobs()).await, "/api/v1/facets").await;
        assert_eq!(body["locations"], serde_json::json!(["USA", "USA Only"]));
        assert_eq!(body["tags"], serde_json::json!(["figma", "python", "remote"]));
    }

    #[tokio::test]
    async fn loading_store_is_unavailable() {
        let store = Arc::new(JobStore::new(Arc::new(MockSource::new(two_jobs()))));
        let app = crate::routes::api::router(AppState {
            store,
            page_size: 10,
        });
        let (status, _) = get_json(app, "/api/v1/jobs").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
