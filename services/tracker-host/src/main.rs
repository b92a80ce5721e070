use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use st_content::{CatalogSummary, ContentSummary};
use st_types::Mode;
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

mod config;
mod source;

use config::HostConfig;
use source::FsContentSource;

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Clone)]
struct AppState {
    summary: Arc<ContentSummary>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = HostConfig::from_env()?;

    // Refuse to serve a site the frontend cannot load.
    let content = st_content::load(&FsContentSource::new(&config.site_dir))
        .await
        .with_context(|| {
            format!(
                "content validation failed under {}",
                config.site_dir.display()
            )
        })?;
    let summary = content.summary();
    if !summary.java.duplicate_titles.is_empty() || !summary.db.duplicate_titles.is_empty() {
        warn!("duplicate topic titles share completion state; see /content/summary");
    }

    let app = router(summary, &config.site_dir);

    info!(
        "tracker-host serving {} on {}",
        config.site_dir.display(),
        config.addr
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(summary: ContentSummary, site_dir: &FsPath) -> Router {
    let state = AppState {
        summary: Arc::new(summary),
    };

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/content/summary", get(content_summary))
        .route("/content/summary/{mode}", get(catalog_summary))
        .with_state(state)
        .fallback_service(ServeDir::new(site_dir))
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "tracker-host",
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "tracker-host",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn content_summary(State(state): State<AppState>) -> Json<ContentSummary> {
    Json((*state.summary).clone())
}

async fn catalog_summary(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> ApiResult<CatalogSummary> {
    let mode: Mode = mode
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| bad_request(format!("unknown mode: {mode}")))?;

    let summary = match mode {
        Mode::Java => &state.summary.java,
        Mode::Db => &state.summary.db,
    };
    Ok(Json(summary.clone()))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
