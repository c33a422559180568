mod check;
mod rate_limit;

pub use check::CheckCacheOperations;
pub use rate_limit::RateLimitCacheOperations;
