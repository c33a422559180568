use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::model::{HistoryQuery, clamp_limit};
use crate::{
    AppState,
    error::AppError,
    models::{GeofenceViolation, LocationSample},
};

// 游客当前位置（最新一条样本）
pub async fn latest_location(
    State(state): State<AppState>,
    Path(tourist_id): Path<String>,
) -> Result<Json<LocationSample>, AppError> {
    match state.stores.locations.latest_location(&tourist_id).await? {
        Some(sample) => Ok(Json(sample)),
        None => Err(AppError::NotFound(format!(
            "No location recorded for tourist {}",
            tourist_id
        ))),
    }
}

// 游客最近的违规记录
pub async fn recent_violations(
    State(state): State<AppState>,
    Path(tourist_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<GeofenceViolation>>, AppError> {
    let violations = state
        .stores
        .violations
        .recent_violations(&tourist_id, clamp_limit(query.limit))
        .await?;
    Ok(Json(violations))
}
