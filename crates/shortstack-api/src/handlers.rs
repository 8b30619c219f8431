//! Request handlers.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use shortstack_pipeline::GenerateRequest;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    /// Primary video URL
    pub main_url: String,
    /// Optional overlay video URL
    #[serde(default)]
    pub overlay_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Display-only script summary, when the generation step produced one
    pub summary: Option<String>,
    /// Where to fetch the finished short
    pub video_path: String,
}

/// Run the full generation pipeline for one request.
pub async fn generate(
    State(state): State<AppState>,
    Json(params): Json<GenerateParams>,
) -> ApiResult<Json<GenerateResponse>> {
    if params.main_url.trim().is_empty() {
        return Err(ApiError::bad_request("main_url is required"));
    }

    let request = GenerateRequest {
        main_url: params.main_url.trim().to_string(),
        overlay_url: params
            .overlay_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from),
    };

    info!("Generation requested for {}", request.main_url);

    // One run at a time: the output directory is shared scratch space
    let mut pipeline = state.pipeline.lock().await;
    let output = pipeline.run(&request).await.map_err(|e| {
        error!("Pipeline run failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(GenerateResponse {
        summary: output.summary,
        video_path: "/api/video".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VideoParams {
    /// When set, serve as an attachment instead of inline preview
    #[serde(default)]
    pub download: bool,
}

/// Serve the finished composite for preview or download.
pub async fn video(
    State(state): State<AppState>,
    Query(params): Query<VideoParams>,
) -> ApiResult<Response> {
    let bytes = tokio::fs::read(&state.composite_path)
        .await
        .map_err(|_| ApiError::not_found("No generated short available yet"))?;

    let response = if params.download {
        (
            [
                (header::CONTENT_TYPE, "video/mp4"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"short_final.mp4\"",
                ),
            ],
            bytes,
        )
            .into_response()
    } else {
        ([(header::CONTENT_TYPE, "video/mp4")], bytes).into_response()
    };

    Ok(response)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
