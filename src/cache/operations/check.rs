use std::sync::Arc;

use redis::{AsyncCommands, Client as RedisClient};

use crate::geofence::CheckReport;

/// 检查结果缓存操作
pub struct CheckCacheOperations;

impl CheckCacheOperations {
    /// 读取已处理过的检查结果
    pub async fn get_cached_report(
        redis: &Arc<RedisClient>,
        key: &str,
    ) -> Result<Option<CheckReport>, redis::RedisError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;
        let result: Option<String> = conn.get(key).await?;

        match result {
            Some(json) => {
                let report = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::IoError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(report))
            }
            None => Ok(None),
        }
    }

    /// 缓存检查结果，ttl 内重复上报直接返回该结果
    pub async fn cache_report(
        redis: &Arc<RedisClient>,
        key: &str,
        report: &CheckReport,
        ttl: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(report).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::IoError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let _: () = conn.set_ex(key, json, ttl).await?;
        Ok(())
    }
}
