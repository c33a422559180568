use async_trait::async_trait;
use sqlx::PgPool;

use super::entities::{AlertEntity, LocationEntity, ViolationEntity, ZoneEntity, zones_from_rows};
use super::queries;
use super::{AlertStore, LocationStore, StoreError, ViolationStore, ZoneStore};
use crate::models::{Alert, GeofenceViolation, LocationSample, Zone};

/// Postgres 实现，四个存储共用一个连接池
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneStore for PgStore {
    async fn fetch_zones(&self) -> Result<Vec<Zone>, StoreError> {
        let rows = sqlx::query_as::<_, ZoneEntity>(queries::SELECT_ALL_ZONES)
            .fetch_all(&self.pool)
            .await?;

        zones_from_rows(rows)
    }
}

#[async_trait]
impl LocationStore for PgStore {
    async fn append_location(&self, sample: &LocationSample) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_LOCATION_SAMPLE)
            .bind(uuid::Uuid::new_v4())
            .bind(&sample.tourist_id)
            .bind(sample.latitude)
            .bind(sample.longitude)
            .bind(sample.status.as_str())
            .bind(sample.recorded_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn latest_location(
        &self,
        tourist_id: &str,
    ) -> Result<Option<LocationSample>, StoreError> {
        sqlx::query_as::<_, LocationEntity>(queries::SELECT_LATEST_LOCATION)
            .bind(tourist_id)
            .fetch_optional(&self.pool)
            .await?
            .map(LocationSample::try_from)
            .transpose()
    }
}

#[async_trait]
impl ViolationStore for PgStore {
    async fn append_violation(&self, violation: &GeofenceViolation) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_GEOFENCE_VIOLATION)
            .bind(violation.violation_id)
            .bind(&violation.tourist_id)
            .bind(violation.zone_id.as_deref())
            .bind(violation.matched_zone_ids.clone())
            .bind(violation.violation_type.as_str())
            .bind(violation.latitude)
            .bind(violation.longitude)
            .bind(violation.severity.as_str())
            .bind(violation.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn recent_violations(
        &self,
        tourist_id: &str,
        limit: i64,
    ) -> Result<Vec<GeofenceViolation>, StoreError> {
        sqlx::query_as::<_, ViolationEntity>(queries::SELECT_RECENT_VIOLATIONS)
            .bind(tourist_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(GeofenceViolation::try_from)
            .collect()
    }
}

#[async_trait]
impl AlertStore for PgStore {
    async fn append_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_ALERT)
            .bind(alert.alert_id)
            .bind(alert.severity.as_str())
            .bind(&alert.message)
            .bind(&alert.target_tourist)
            .bind(alert.issued_by.as_str())
            .bind(alert.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError> {
        sqlx::query_as::<_, AlertEntity>(queries::SELECT_RECENT_ALERTS)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Alert::try_from)
            .collect()
    }
}
