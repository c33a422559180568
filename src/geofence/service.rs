use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::policy::{ViolationDecision, evaluate};
use super::resolver::resolve_zones;
use crate::database::{StoreError, Stores};
use crate::geo::{AxisOrder, Coordinate};
use crate::models::{Alert, GeofenceViolation, LocationSample, Severity};

/// 校验通过的位置上报
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCheck {
    pub tourist_id: String,
    pub point: Coordinate,
    /// 客户端上报时间，仅用于去重
    pub reported_at: Option<DateTime<Utc>>,
}

/// 检查结果摘要，同时也是去重缓存的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub is_in_safe_zone: bool,
    pub violations: usize,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone)]
pub struct GeofenceService {
    stores: Stores,
    axis_order: AxisOrder,
}

impl GeofenceService {
    pub fn new(stores: Stores, axis_order: AxisOrder) -> Self {
        Self { stores, axis_order }
    }

    /// 记录位置、判定区域，并写入违规记录和告警
    ///
    /// 只有读取区域失败会中止检查；位置、违规、告警的写入失败只记录日志。
    pub async fn check(&self, check: &LocationCheck) -> Result<CheckReport, StoreError> {
        self.record_location(check).await;

        let zones = self.stores.zones.fetch_zones().await?;
        let resolution = resolve_zones(check.point, &zones, self.axis_order);
        let decision = evaluate(&resolution);

        if let Some(violation) = &decision.violation {
            tracing::info!(
                "Geofence violation for tourist {}: {} ({} dangerous zones)",
                check.tourist_id,
                violation.violation_type,
                violation.zones.len()
            );
            self.emit(check, violation).await;
        }

        Ok(CheckReport {
            is_in_safe_zone: resolution.in_safe_zone,
            violations: resolution.dangerous_zones.len(),
            message: decision.message,
            severity: decision.severity,
        })
    }

    async fn record_location(&self, check: &LocationCheck) {
        let sample = LocationSample::active(&check.tourist_id, check.point, Utc::now());
        if let Err(e) = self.stores.locations.append_location(&sample).await {
            tracing::warn!(
                "Failed to record location for tourist {}: {}",
                check.tourist_id,
                e
            );
        }
    }

    // 违规与告警分别写入，互不回滚
    async fn emit(&self, check: &LocationCheck, decision: &ViolationDecision<'_>) {
        let now = Utc::now();
        let violation = GeofenceViolation::new(
            &check.tourist_id,
            check.point,
            decision.violation_type,
            decision.severity,
            decision.zone_ids(),
            now,
        );
        let alert = Alert::from_system(
            &check.tourist_id,
            decision.alert_severity,
            decision.alert_message.clone(),
            now,
        );

        let (violation_result, alert_result) = futures_util::join!(
            self.stores.violations.append_violation(&violation),
            self.stores.alerts.append_alert(&alert)
        );

        if let Err(e) = violation_result {
            tracing::error!(
                "Failed to store geofence violation for tourist {}: {}",
                check.tourist_id,
                e
            );
        }
        if let Err(e) = alert_result {
            tracing::error!(
                "Failed to store alert for tourist {}: {}",
                check.tourist_id,
                e
            );
        }
    }
}
