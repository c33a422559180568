use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AlertStore, LocationStore, StoreError, ViolationStore, ZoneStore};
use crate::models::{Alert, GeofenceViolation, LocationSample, Zone};

/// 内存实现，用于本地运行和测试；可以让任意一个存储模拟写入失败
#[derive(Default)]
pub struct MemoryStore {
    zones: Mutex<Vec<Zone>>,
    locations: Mutex<Vec<LocationSample>>,
    violations: Mutex<Vec<GeofenceViolation>>,
    alerts: Mutex<Vec<Alert>>,
    fail_zones: AtomicBool,
    fail_locations: AtomicBool,
    fail_violations: AtomicBool,
    fail_alerts: AtomicBool,
    zone_fetches: AtomicU64,
}

impl MemoryStore {
    pub fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: Mutex::new(zones),
            ..Self::default()
        }
    }

    pub async fn set_zones(&self, zones: Vec<Zone>) {
        *self.zones.lock().await = zones;
    }

    pub fn fail_zone_reads(&self, fail: bool) {
        self.fail_zones.store(fail, Ordering::SeqCst);
    }

    pub fn fail_location_writes(&self, fail: bool) {
        self.fail_locations.store(fail, Ordering::SeqCst);
    }

    pub fn fail_violation_writes(&self, fail: bool) {
        self.fail_violations.store(fail, Ordering::SeqCst);
    }

    pub fn fail_alert_writes(&self, fail: bool) {
        self.fail_alerts.store(fail, Ordering::SeqCst);
    }

    pub fn zone_fetches(&self) -> u64 {
        self.zone_fetches.load(Ordering::SeqCst)
    }

    pub async fn locations(&self) -> Vec<LocationSample> {
        self.locations.lock().await.clone()
    }

    pub async fn violations(&self) -> Vec<GeofenceViolation> {
        self.violations.lock().await.clone()
    }

    pub async fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().await.clone()
    }
}

fn injected(flag: &AtomicBool, what: &str) -> Result<(), StoreError> {
    if flag.load(Ordering::SeqCst) {
        return Err(StoreError::Unavailable(format!("{} store offline", what)));
    }
    Ok(())
}

#[async_trait]
impl ZoneStore for MemoryStore {
    async fn fetch_zones(&self) -> Result<Vec<Zone>, StoreError> {
        self.zone_fetches.fetch_add(1, Ordering::SeqCst);
        injected(&self.fail_zones, "zone")?;
        Ok(self.zones.lock().await.clone())
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn append_location(&self, sample: &LocationSample) -> Result<(), StoreError> {
        injected(&self.fail_locations, "location")?;
        self.locations.lock().await.push(sample.clone());
        Ok(())
    }

    async fn latest_location(
        &self,
        tourist_id: &str,
    ) -> Result<Option<LocationSample>, StoreError> {
        injected(&self.fail_locations, "location")?;
        // 时间相同时以后写入的为准
        Ok(self
            .locations
            .lock()
            .await
            .iter()
            .filter(|s| s.tourist_id == tourist_id)
            .max_by_key(|s| s.recorded_at)
            .cloned())
    }
}

#[async_trait]
impl ViolationStore for MemoryStore {
    async fn append_violation(&self, violation: &GeofenceViolation) -> Result<(), StoreError> {
        injected(&self.fail_violations, "violation")?;
        self.violations.lock().await.push(violation.clone());
        Ok(())
    }

    async fn recent_violations(
        &self,
        tourist_id: &str,
        limit: i64,
    ) -> Result<Vec<GeofenceViolation>, StoreError> {
        injected(&self.fail_violations, "violation")?;
        let mut matching: Vec<_> = self
            .violations
            .lock()
            .await
            .iter()
            .filter(|v| v.tourist_id == tourist_id)
            .cloned()
            .collect();
        matching.reverse();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }
}

#[async_trait]
impl AlertStore for MemoryStore {
    async fn append_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        injected(&self.fail_alerts, "alert")?;
        self.alerts.lock().await.push(alert.clone());
        Ok(())
    }

    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError> {
        injected(&self.fail_alerts, "alert")?;
        let mut alerts = self.alerts.lock().await.clone();
        alerts.reverse();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        alerts.truncate(limit.max(0) as usize);
        Ok(alerts)
    }
}
