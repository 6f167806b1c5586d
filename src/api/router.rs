//! HTTP routes: the symptom form page, the analysis endpoint, and static
//! assets. Unknown routes fall back to the index page, as the front end is a
//! single screen.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::services::ServeDir;

use crate::analysis::AnalysisContext;
use crate::api::error::ApiError;
use crate::api::types::{AnalyzeResponse, ApiContext};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Symptom descriptions shorter than this (after trim) are rejected.
const MIN_SYMPTOMS_LENGTH: usize = 5;

const SYMPTOMS_TOO_SHORT: &str = "Please provide a detailed description of your symptoms.";
const ANALYSIS_UNAVAILABLE: &str = "Unable to analyze symptoms. Please try again.";

pub fn app_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found)
        .with_state(ctx)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(INDEX_HTML))
}

/// `POST /analyze`: run the symptom analysis for a submitted form.
///
/// The browser posts `FormData` (multipart): `symptoms` plus optional `age`
/// and `gender`. Expected failures (thin description, analysis unavailable)
/// come back as HTTP 200 with `success: false` so the front end renders them
/// inline; only malformed requests and internal faults get error statuses.
async fn analyze(
    State(ctx): State<ApiContext>,
    mut form: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut symptoms = String::new();
    let mut age = None;
    let mut gender = None;

    while let Some(field) = form
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("malformed form data: {e}")))?;
        match name.as_str() {
            "symptoms" => symptoms = value,
            "age" => age = Some(value),
            "gender" => gender = Some(value),
            _ => {}
        }
    }

    if symptoms.trim().len() < MIN_SYMPTOMS_LENGTH {
        return Ok(Json(AnalyzeResponse::failed(SYMPTOMS_TOO_SHORT)));
    }

    let Some(analyzer) = ctx.analyzer.clone() else {
        tracing::error!("cannot analyze symptoms: no API credential configured");
        return Ok(Json(AnalyzeResponse::failed(ANALYSIS_UNAVAILABLE)));
    };

    let context = AnalysisContext::new(&symptoms, age, gender);

    // The provider call is blocking; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || analyzer.analyze(&context))
        .await
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))?;

    match outcome {
        Ok(result) => Ok(Json(AnalyzeResponse::completed(result))),
        Err(e) => {
            tracing::error!(error = %e, "symptom analysis failed");
            Ok(Json(AnalyzeResponse::failed(ANALYSIS_UNAVAILABLE)))
        }
    }
}
