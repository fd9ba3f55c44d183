//! Analysis handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::middleware::subject::SubjectContext;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, HistoryEntryResponse, HistoryResponse,
};
use crate::{AppResult, AppState};

/// Run one analysis and record it in the subject's history
pub async fn analyze(
    State(state): State<AppState>,
    subject: SubjectContext,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    let image = req.image.unwrap_or_default();

    let mut rng = rand::thread_rng();
    let result = state
        .service
        .analyze(&subject.device_id, &image, Utc::now(), &mut rng)?;

    tracing::info!(
        "Analysis completed: {} ({}) for subject {}",
        result.detection.class_name,
        result.health_analysis.risk_level,
        subject.device_id
    );

    Ok(Json(AnalyzeResponse { success: true, result }))
}

/// List the subject's retained history, newest first
pub async fn history(
    State(state): State<AppState>,
    subject: SubjectContext,
) -> AppResult<Json<HistoryResponse>> {
    let history = state.service.history(&subject.device_id);

    Ok(Json(HistoryResponse {
        success: true,
        count: history.len(),
        history,
    }))
}

/// Get a single history entry
pub async fn history_entry(
    State(state): State<AppState>,
    subject: SubjectContext,
    Path(id): Path<u64>,
) -> AppResult<Json<HistoryEntryResponse>> {
    let entry = state.service.history_entry(&subject.device_id, id)?;

    Ok(Json(HistoryEntryResponse { success: true, entry }))
}
