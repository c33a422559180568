use std::sync::Arc;

use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::keys::rate_limit_key;

/// 速率限制缓存操作
pub struct RateLimitCacheOperations;

impl RateLimitCacheOperations {
    /// 固定窗口计数：首次请求时设置窗口过期时间，返回窗口内的请求数
    pub async fn increment(
        redis: &Arc<RedisClient>,
        client_ip: &str,
        window_secs: u64,
    ) -> Result<i64, redis::RedisError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;
        let key = rate_limit_key(client_ip);

        let count: i64 = conn.incr(&key, 1).await?;
        if count == 1 {
            let _: () = conn.expire(&key, window_secs as i64).await?;
        }

        Ok(count)
    }
}
