// 缓存模块
// Redis 仅用于检查去重和限流计数，区域数据不缓存

pub mod keys;
pub mod operations;
mod report;

pub use operations::{CheckCacheOperations, RateLimitCacheOperations};
pub use report::{MemoryReportCache, RedisReportCache, ReportCache};
