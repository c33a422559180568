use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use geoguard::{
    AppState, build_router,
    cache::MemoryReportCache,
    config::{Config, StorageBackend},
    database::{MemoryStore, PgStore, Stores},
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        "Polygon axis order: {}, storage backend: {:?}",
        config.polygon_axis_order,
        config.storage_backend
    );

    let stores = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL is required for the postgres backend");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        conn.execute("SET application_name = 'geoguard_backend';")
                            .await?;
                        Ok(())
                    })
                })
                .connect(database_url)
                .await
                .expect("Failed to connect to Postgres");
            Stores::from_shared(Arc::new(PgStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Stores::from_shared(Arc::new(MemoryStore::default()))
        }
    };

    // Redis 可选：用于限流和重复上报去重
    let redis = config.redis_url.as_ref().map(|url| {
        Arc::new(redis::Client::open(url.as_str()).expect("Failed to create Redis client"))
    });
    if redis.is_none() {
        tracing::info!("REDIS_URL not set, rate limiting disabled");
    }

    let mut state = AppState::new(config.clone(), stores, redis);
    if state.report_cache.is_none() && config.storage_backend == StorageBackend::Memory {
        // 单实例内存模式下去重也放在内存中
        state = state.with_report_cache(Arc::new(MemoryReportCache::default()));
    }
    let app = build_router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
