mod config;
mod error;
mod facets;
mod models;
mod pagination;
mod pipeline;
mod routes;
mod schema;
mod source;
mod store;
#[cfg(test)]
mod testutil;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::{Command, Config};
use crate::models::filter::FilterState;
use crate::routes::AppState;
use crate::source::RemotiveSource;
use crate::store::JobStore;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn readyz(State(store): State<Arc<JobStore>>) -> impl IntoResponse {
    if store.is_ready().await {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("remoteboard=info,tower_http=info"));
    // stdout is reserved for `fetch` output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_json);

    let source = RemotiveSource::new(
        config.jobs_api_url.clone(),
        Duration::from_secs(config.fetch_timeout),
    )?;
    tracing::info!("Job source: {}", source.url());
    let store = Arc::new(JobStore::new(Arc::new(source)));

    match config.resolved_command() {
        Command::Serve {
            listen_addr,
            static_dir,
        } => serve(store, config.page_size(), &listen_addr, &static_dir).await,
        Command::Fetch {
            search,
            location,
            tags,
            category,
            page,
        } => {
            let mut filter = FilterState::new()
                .with_category(category)
                .with_search(search)
                .with_location(location);
            for tag in &tags {
                if !filter.has_tag(tag) {
                    filter = filter.toggle_tag(tag);
                }
            }
            let filter = filter.with_page(page);

            let snapshot = store.refresh().await?;
            let result = pipeline::apply(&snapshot.jobs, &filter, config.page_size());
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

async fn serve(
    store: Arc<JobStore>,
    page_size: usize,
    listen_addr: &str,
    static_dir: &str,
) -> anyhow::Result<()> {
    // the list view shows a loading page until this finishes
    store.spawn_refresh();

    let state = AppState {
        store: Arc::clone(&store),
        page_size,
    };
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz).with_state(store))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(routes::ui::router(state.clone()))
        .merge(routes::api::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!("Listening on {listen_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting gracefully");
        })
        .await?;

    Ok(())
}
