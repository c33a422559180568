//! 缓存键模块
use chrono::{DateTime, Utc};

/// 检查结果去重键前缀
const CHECK_DEDUP_PREFIX: &str = "geofence:check:";

/// 限流计数键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成去重键：同一游客、同一上报时间只处理一次
pub fn check_dedup_key(tourist_id: &str, reported_at: DateTime<Utc>) -> String {
    format!(
        "{}{}:{}",
        CHECK_DEDUP_PREFIX,
        tourist_id,
        reported_at.timestamp_millis()
    )
}

/// 生成限流计数键
pub fn rate_limit_key(client_ip: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, client_ip)
}
