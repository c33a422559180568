// 存储模块
// 地理围栏核心只依赖这里的四个存储接口，具体实现为 Postgres 或内存

mod entities;
pub mod memory;
pub mod postgres;
mod queries;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Alert, GeofenceViolation, LocationSample, Zone};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// 区域存储：每次检查都读取全部区域
#[async_trait]
pub trait ZoneStore: Send + Sync {
    async fn fetch_zones(&self) -> Result<Vec<Zone>, StoreError>;
}

/// 位置样本存储（只追加）
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn append_location(&self, sample: &LocationSample) -> Result<(), StoreError>;
    async fn latest_location(&self, tourist_id: &str)
    -> Result<Option<LocationSample>, StoreError>;
}

/// 违规记录存储（只追加）
#[async_trait]
pub trait ViolationStore: Send + Sync {
    async fn append_violation(&self, violation: &GeofenceViolation) -> Result<(), StoreError>;
    async fn recent_violations(
        &self,
        tourist_id: &str,
        limit: i64,
    ) -> Result<Vec<GeofenceViolation>, StoreError>;
}

/// 告警存储（只追加）
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn append_alert(&self, alert: &Alert) -> Result<(), StoreError>;
    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError>;
}

#[derive(Clone)]
pub struct Stores {
    pub zones: Arc<dyn ZoneStore>,
    pub locations: Arc<dyn LocationStore>,
    pub violations: Arc<dyn ViolationStore>,
    pub alerts: Arc<dyn AlertStore>,
}

impl Stores {
    /// 用同一个后端实现全部四个存储
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: ZoneStore + LocationStore + ViolationStore + AlertStore + 'static,
    {
        Self {
            zones: store.clone(),
            locations: store.clone(),
            violations: store.clone(),
            alerts: store,
        }
    }
}
