use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use super::model::{CheckLocationRequest, CheckLocationResponse};
use crate::{
    AppState,
    cache::keys::check_dedup_key,
    error::AppError,
    geofence::LocationCheck,
};

// 位置上报并执行地理围栏检查
pub async fn check_location(
    State(state): State<AppState>,
    payload: Result<Json<CheckLocationRequest>, JsonRejection>,
) -> Result<Json<CheckLocationResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let check = LocationCheck::try_from(req).map_err(AppError::InvalidRequest)?;

    // 带上报时间的重复请求直接返回上次的结果
    let dedup_key = check
        .reported_at
        .map(|at| check_dedup_key(&check.tourist_id, at));
    if let (Some(cache), Some(key)) = (&state.report_cache, &dedup_key) {
        match cache.get(key).await {
            Ok(Some(report)) => {
                tracing::debug!("Duplicate location report served from cache: {}", key);
                return Ok(Json(report.into()));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Dedup lookup failed for {}: {}", key, e),
        }
    }

    let report = state
        .geofence
        .check(&check)
        .await
        .map_err(AppError::GeofenceCheck)?;

    if let (Some(cache), Some(key)) = (&state.report_cache, &dedup_key) {
        if let Err(e) = cache.put(key, &report, state.config.dedup_ttl()).await {
            tracing::warn!("Failed to cache check result {}: {}", key, e);
        }
    }

    Ok(Json(report.into()))
}
