use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use lens_core::contracts::AnalyzeRequest;
use lens_core::error::LensError;
use lens_core::link;
use shared::health::HealthMonitor;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::pipeline::LensPipeline;

pub struct AppState {
    pub pipeline: LensPipeline,
    pub data_dir: PathBuf,
    pub health: Mutex<HealthMonitor>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/api/download/:video_id", get(download_handler))
        .route("/api/health", get(health_handler))
        // Static dashboard
        .fallback_service(ServeDir::new("static").append_index_html_on_directories(true))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- REST API Handlers ---

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    info!("📨 [API] 解析リクエスト: {}", payload.link);

    match state.pipeline.run(&payload.link).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            let status = match &e {
                LensError::InvalidLink { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                LensError::PlatformRequest { .. } => StatusCode::NOT_FOUND,
                LensError::CommentsUnavailable { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error!("❌ [API] 解析失敗: {}", e);
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

async fn download_handler(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    // パストラバーサル防止: ID 形状を再検証してからファイルに触る
    if !link::is_video_id(&video_id) {
        return (StatusCode::BAD_REQUEST, "invalid video id").into_response();
    }

    let path = state.data_dir.join(format!("{video_id}.csv"));
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "text/csv; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{video_id}.csv\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "csv not found").into_response(),
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut monitor = state.health.lock().await;
    Json(monitor.check())
}
