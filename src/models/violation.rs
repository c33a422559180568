use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    DangerZoneEntry,
    ZoneExit,
}

impl ViolationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationType::DangerZoneEntry => "danger_zone_entry",
            ViolationType::ZoneExit => "zone_exit",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "danger_zone_entry" => Ok(ViolationType::DangerZoneEntry),
            "zone_exit" => Ok(ViolationType::ZoneExit),
            other => Err(format!("unknown violation type: {}", other)),
        }
    }
}

/// 违规记录、告警与检查结果共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceViolation {
    pub violation_id: Uuid,
    pub tourist_id: String,
    /// 进入危险区时为第一个命中的危险区，离开安全区时为 `None`
    pub zone_id: Option<String>,
    /// 命中的全部危险区，按区域读取顺序
    pub matched_zone_ids: Vec<String>,
    pub violation_type: ViolationType,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl GeofenceViolation {
    pub fn new(
        tourist_id: &str,
        point: Coordinate,
        violation_type: ViolationType,
        severity: Severity,
        matched_zone_ids: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            violation_id: Uuid::new_v4(),
            tourist_id: tourist_id.to_string(),
            zone_id: matched_zone_ids.first().cloned(),
            matched_zone_ids,
            violation_type,
            latitude: point.latitude,
            longitude: point.longitude,
            severity,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_exit_has_no_zone_id() {
        let violation = GeofenceViolation::new(
            "t1",
            Coordinate::new(1.0, 2.0),
            ViolationType::ZoneExit,
            Severity::Medium,
            Vec::new(),
            Utc::now(),
        );
        assert_eq!(violation.zone_id, None);
        assert_eq!(violation.latitude, 1.0);
        assert_eq!(violation.longitude, 2.0);
    }

    #[test]
    fn danger_entry_references_first_match() {
        let violation = GeofenceViolation::new(
            "t1",
            Coordinate::new(0.0, 0.0),
            ViolationType::DangerZoneEntry,
            Severity::High,
            vec!["z2".into(), "z3".into()],
            Utc::now(),
        );
        assert_eq!(violation.zone_id.as_deref(), Some("z2"));
        assert_eq!(violation.matched_zone_ids.len(), 2);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Severity::Critical).unwrap(),
            serde_json::json!("critical")
        );
        assert_eq!("medium".parse::<Severity>(), Ok(Severity::Medium));
    }
}
