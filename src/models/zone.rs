use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{AxisOrder, Coordinate, point_in_ring};

/// 管理方标注的区域安全级别
///
/// `Caution` 只保留在数据模型中，策略不做判定；未知级别原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Dangerous,
    Unrecognized(String),
}

impl SafetyLevel {
    pub fn as_str(&self) -> &str {
        match self {
            SafetyLevel::Safe => "safe",
            SafetyLevel::Caution => "caution",
            SafetyLevel::Dangerous => "dangerous",
            SafetyLevel::Unrecognized(level) => level,
        }
    }
}

impl From<&str> for SafetyLevel {
    fn from(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "safe" => SafetyLevel::Safe,
            "caution" => SafetyLevel::Caution,
            "dangerous" => SafetyLevel::Dangerous,
            _ => SafetyLevel::Unrecognized(level.to_string()),
        }
    }
}

impl From<String> for SafetyLevel {
    fn from(level: String) -> Self {
        SafetyLevel::from(level.as_str())
    }
}

impl From<SafetyLevel> for String {
    fn from(level: SafetyLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub safety_level: SafetyLevel,
    /// 外环顶点，按配置的 `AxisOrder` 解释，默认 GeoJSON `[lng, lat]`
    pub polygon: Vec<[f64; 2]>,
    /// 内环（洞），落在洞内的点不属于该区域
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<[f64; 2]>>,
}

impl Zone {
    pub fn contains(&self, point: Coordinate, axis: AxisOrder) -> bool {
        point_in_ring(point, &self.polygon, axis)
            && !self.holes.iter().any(|hole| point_in_ring(point, hole, axis))
    }
}
