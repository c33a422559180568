use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Active,
    Sos,
    Offline,
}

impl LocationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationStatus::Active => "active",
            LocationStatus::Sos => "sos",
            LocationStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LocationStatus::Active),
            "sos" => Ok(LocationStatus::Sos),
            "offline" => Ok(LocationStatus::Offline),
            other => Err(format!("unknown location status: {}", other)),
        }
    }
}

/// 一次位置上报；样本只追加，最新一条即游客当前位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub tourist_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: LocationStatus,
    pub recorded_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn active(tourist_id: &str, point: Coordinate, recorded_at: DateTime<Utc>) -> Self {
        Self {
            tourist_id: tourist_id.to_string(),
            latitude: point.latitude,
            longitude: point.longitude,
            status: LocationStatus::Active,
            recorded_at,
        }
    }
}
