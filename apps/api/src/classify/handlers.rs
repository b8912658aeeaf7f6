use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::classify::pdf::extract_pdf_text;
use crate::classify::service::{classify_text, classify_value};
use crate::errors::AppError;
use crate::models::classify::{
    CategoriesResponse, ClassifyResponse, NormalizeResponse, RawTextRequest,
};
use crate::state::AppState;
use crate::text::normalize_value;

/// POST /api/v1/classify
pub async fn handle_classify(
    State(state): State<AppState>,
    Json(req): Json<RawTextRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let response = run_blocking(move || classify_value(&state, &req.raw_text)).await??;
    Ok(Json(response))
}

/// POST /api/v1/classify/pdf
/// Multipart upload; the resume PDF is the `file` field.
pub async fn handle_classify_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>, AppError> {
    let mut pdf: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read 'file' field: {e}")))?;
            pdf = Some(data);
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let response = run_blocking(move || {
        let text = extract_pdf_text(&pdf)?;
        classify_text(&state, &text)
    })
    .await??;
    Ok(Json(response))
}

/// POST /api/v1/normalize
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(req): Json<RawTextRequest>,
) -> Result<Json<NormalizeResponse>, AppError> {
    let normalized_text =
        run_blocking(move || normalize_value(&req.raw_text, &state.resources)).await?;
    Ok(Json(NormalizeResponse { normalized_text }))
}

/// GET /api/v1/categories
pub async fn handle_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: state.engine.categories().iter().cloned().collect(),
    })
}

/// Runs normalization or PDF parsing on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}
