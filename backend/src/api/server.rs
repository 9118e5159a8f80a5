//! HTTP server for the dashboard.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                                 |
//! |--------|----------------|---------------------------------------------|
//! | GET    | `/health`      | Health check                                |
//! | GET    | `/api/figures` | Charts for the configured data file         |
//! | POST   | `/api/upload`  | Charts for an uploaded CSV (`file` field)   |
//! | GET    | `/api/logs`    | SSE stream of pipeline logs                 |
//!
//! Both figure endpoints accept `?format=plotly`.

use axum::{
    extract::{Multipart, Query, State},
    http::{header, Method},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_info, log_info_indent, log_success, LOG_BROADCASTER};
use super::types::{FiguresQuery, FiguresResponse};
use crate::config::{DashboardConfig, ServerSettings};
use crate::error::{PipelineResult, ServerError, ServerResult};
use crate::transform::pipeline::{build_dashboard, build_dashboard_from_bytes, DashboardOptions, DashboardResult};

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub data_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(config: DashboardConfig, data_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            data_path: Arc::new(data_path),
        }
    }
}

/// Build the router, without binding anything.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/figures", get(figures))
        .route("/api/upload", post(upload_csv))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(settings: ServerSettings, config: DashboardConfig) -> ServerResult<()> {
    config.validate().map_err(crate::error::PipelineError::from)?;

    let port = settings.port;
    let app = router(AppState::new(config, settings.data_path.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_success(format!("gdpdash server running on http://localhost:{}", port));
    log_info_indent(format!("GET  /api/figures - charts for {}", settings.data_path.display()), 1);
    log_info_indent("POST /api/upload  - charts for an uploaded CSV", 1);
    log_info_indent("GET  /api/logs    - SSE log stream", 1);
    log_info_indent("GET  /health      - health check", 1);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "gdpdash",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "figures": "GET /api/figures",
            "upload": "POST /api/upload",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip what they missed.
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Charts for the configured data file
async fn figures(
    State(state): State<AppState>,
    Query(query): Query<FiguresQuery>,
) -> Result<Json<FiguresResponse>, ServerError> {
    log_info(format!("GET /api/figures ({})", state.data_path.display()));

    let config = Arc::clone(&state.config);
    let path = Arc::clone(&state.data_path);
    let result = run_blocking(move || build_dashboard(&path, &config, &DashboardOptions::default())).await?;

    respond(result, query)
}

/// Upload CSV endpoint
async fn upload_csv(
    State(state): State<AppState>,
    Query(query): Query<FiguresQuery>,
    mut multipart: Multipart,
) -> Result<Json<FiguresResponse>, ServerError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            file_data = Some(bytes.to_vec());
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".to_string()))?;

    log_info(format!(
        "POST /api/upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unnamed"),
        bytes.len()
    ));

    let config = Arc::clone(&state.config);
    let result =
        run_blocking(move || build_dashboard_from_bytes(&bytes, &config, &DashboardOptions::default())).await?;

    respond(result, query)
}

/// Run the synchronous pipeline off the async workers.
async fn run_blocking<F>(job: F) -> Result<DashboardResult, ServerError>
where
    F: FnOnce() -> PipelineResult<DashboardResult> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}

fn respond(result: DashboardResult, query: FiguresQuery) -> Result<Json<FiguresResponse>, ServerError> {
    let response = FiguresResponse::from_result(result, query.format)
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    log_success(format!("Sent {} charts ({})", response.figures.len(), response.status));
    Ok(Json(response))
}
