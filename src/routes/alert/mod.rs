use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    error::AppError,
    models::Alert,
    routes::tourist::{HistoryQuery, clamp_limit},
};

// 最近的告警，供管理端告警列表使用
pub async fn recent_alerts(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Alert>>, AppError> {
    let alerts = state
        .stores
        .alerts
        .recent_alerts(clamp_limit(query.limit))
        .await?;
    Ok(Json(alerts))
}
