// 地理围栏核心：区域判定、违规策略、检查流程

mod policy;
mod resolver;
mod service;

pub use policy::{Decision, SAFE_ZONE_MESSAGE, ViolationDecision, ZONE_EXIT_MESSAGE, evaluate};
pub use resolver::{ZoneResolution, resolve_zones};
pub use service::{CheckReport, GeofenceService, LocationCheck};
