//! HTTP surface consumed by the presentation layer.

use crate::analysis::Analyzer;
use crate::error::AppError;
use crate::models::{AnalysisRequest, AnalysisResult};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::future::Future;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::info;

/// Upper bound for an uploaded document body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    analyzer: Analyzer,
}

/// Builds the application router.
pub fn router(analyzer: Analyzer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze_document))
        .with_state(AppState { analyzer })
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(log_http_request))
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> &'static str {
    "ok"
}

async fn analyze_document(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::Validation(format!("잘못된 요청 형식입니다: {}", rejection.body_text()))
    })?;
    let result = state.analyzer.analyze(request).await?;
    Ok(Json(result))
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();
    let response = next.run(req).await;
    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "http request"
    );
    response
}
