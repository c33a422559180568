use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::Client as RedisClient;
use tokio::sync::Mutex;

use super::CheckCacheOperations;
use crate::geofence::CheckReport;

/// 重复上报的检查结果缓存
#[async_trait]
pub trait ReportCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CheckReport>, redis::RedisError>;
    async fn put(
        &self,
        key: &str,
        report: &CheckReport,
        ttl: Duration,
    ) -> Result<(), redis::RedisError>;
}

pub struct RedisReportCache {
    redis: Arc<RedisClient>,
}

impl RedisReportCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl ReportCache for RedisReportCache {
    async fn get(&self, key: &str) -> Result<Option<CheckReport>, redis::RedisError> {
        CheckCacheOperations::get_cached_report(&self.redis, key).await
    }

    async fn put(
        &self,
        key: &str,
        report: &CheckReport,
        ttl: Duration,
    ) -> Result<(), redis::RedisError> {
        // SETEX 不接受 0
        CheckCacheOperations::cache_report(&self.redis, key, report, ttl.as_secs().max(1)).await
    }
}

/// 单实例内存缓存，未配置 Redis 时使用
#[derive(Default)]
pub struct MemoryReportCache {
    entries: Mutex<HashMap<String, (CheckReport, Instant)>>,
}

#[async_trait]
impl ReportCache for MemoryReportCache {
    async fn get(&self, key: &str) -> Result<Option<CheckReport>, redis::RedisError> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        Ok(entries.get(key).map(|(report, _)| report.clone()))
    }

    async fn put(
        &self,
        key: &str,
        report: &CheckReport,
        ttl: Duration,
    ) -> Result<(), redis::RedisError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (report.clone(), Instant::now() + ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn report() -> CheckReport {
        CheckReport {
            is_in_safe_zone: false,
            violations: 1,
            message: "Tourist exited safe zone".into(),
            severity: Severity::Medium,
        }
    }

    #[tokio::test]
    async fn memory_cache_returns_stored_report() {
        let cache = MemoryReportCache::default();
        assert!(cache.get("k").await.unwrap().is_none());

        cache.put("k", &report(), Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(report()));
        assert!(cache.get("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_cache_drops_expired_entries() {
        let cache = MemoryReportCache::default();
        cache.put("k", &report(), Duration::ZERO).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
    }
}
