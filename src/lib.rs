use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use cache::{RedisReportCache, ReportCache};
use config::Config;
use database::Stores;
use geofence::GeofenceService;
use redis::Client as RedisClient;
use tower_http::cors::{Any, CorsLayer};

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod geo;
pub mod geofence;
pub mod middleware;
pub mod models;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub stores: Stores,
    pub geofence: GeofenceService,
    pub redis: Option<Arc<RedisClient>>,
    pub report_cache: Option<Arc<dyn ReportCache>>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores, redis: Option<Arc<RedisClient>>) -> Self {
        let geofence = GeofenceService::new(stores.clone(), config.polygon_axis_order);
        let report_cache = redis
            .clone()
            .map(|client| Arc::new(RedisReportCache::new(client)) as Arc<dyn ReportCache>);
        Self {
            config,
            stores,
            geofence,
            redis,
            report_cache,
        }
    }

    /// 替换去重缓存，例如未配置 Redis 时使用内存缓存
    pub fn with_report_cache(mut self, cache: Arc<dyn ReportCache>) -> Self {
        self.report_cache = Some(cache);
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/geofence/check", post(routes::geofence::check_location))
        .route(
            "/tourists/{tourist_id}/location",
            get(routes::tourist::latest_location),
        )
        .route(
            "/tourists/{tourist_id}/violations",
            get(routes::tourist::recent_violations),
        )
        .route("/alerts", get(routes::alert::recent_alerts));

    // 配置了前缀时挂在前缀下，否则直接挂在根路径
    let base = state.config.api_base_uri.clone();
    let router = if base.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(&base, api_routes)
    };
    let router = router.route("/health", get(routes::health));

    let router = router.layer(axum::middleware::from_fn(middleware::log_errors));

    // 限流依赖 Redis，未配置时不启用
    let router = match &state.redis {
        Some(redis) => {
            let limiter = Arc::new(middleware::RateLimiter::new(redis.clone(), &state.config));
            router.layer(axum::middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit,
            ))
        }
        None => router,
    };

    // 移动端与管理端跨域访问，允许任意来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router.layer(cors).with_state(state)
}
