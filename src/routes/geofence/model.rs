use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::geofence::{CheckReport, LocationCheck};
use crate::models::Severity;

// 位置上报请求，字段全部可选以便返回明确的校验错误
#[derive(Debug, Deserialize)]
pub struct CheckLocationRequest {
    pub tourist_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reported_at: Option<DateTime<Utc>>,
}

impl TryFrom<CheckLocationRequest> for LocationCheck {
    type Error = String;

    fn try_from(req: CheckLocationRequest) -> Result<Self, Self::Error> {
        let tourist_id = req
            .tourist_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "tourist_id is required".to_string())?;
        let latitude = req
            .latitude
            .ok_or_else(|| "latitude is required".to_string())?;
        let longitude = req
            .longitude
            .ok_or_else(|| "longitude is required".to_string())?;

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude must be between -90 and 90, got {}", latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!(
                "longitude must be between -180 and 180, got {}",
                longitude
            ));
        }

        Ok(LocationCheck {
            tourist_id,
            point: Coordinate::new(latitude, longitude),
            reported_at: req.reported_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CheckLocationResponse {
    pub success: bool,
    #[serde(rename = "isInSafeZone")]
    pub is_in_safe_zone: bool,
    pub violations: usize,
    pub message: String,
    pub severity: Severity,
}

impl From<CheckReport> for CheckLocationResponse {
    fn from(report: CheckReport) -> Self {
        Self {
            success: true,
            is_in_safe_zone: report.is_in_safe_zone,
            violations: report.violations,
            message: report.message,
            severity: report.severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tourist_id: Option<&str>, latitude: Option<f64>, longitude: Option<f64>) -> CheckLocationRequest {
        CheckLocationRequest {
            tourist_id: tourist_id.map(str::to_string),
            latitude,
            longitude,
            reported_at: None,
        }
    }

    #[test]
    fn accepts_valid_report() {
        let check = LocationCheck::try_from(request(Some(" t1 "), Some(48.85), Some(2.35))).unwrap();
        assert_eq!(check.tourist_id, "t1");
        assert_eq!(check.point, Coordinate::new(48.85, 2.35));
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            LocationCheck::try_from(request(None, Some(1.0), Some(1.0))).unwrap_err(),
            "tourist_id is required"
        );
        assert_eq!(
            LocationCheck::try_from(request(Some("   "), Some(1.0), Some(1.0))).unwrap_err(),
            "tourist_id is required"
        );
        assert_eq!(
            LocationCheck::try_from(request(Some("t1"), None, Some(1.0))).unwrap_err(),
            "latitude is required"
        );
        assert_eq!(
            LocationCheck::try_from(request(Some("t1"), Some(1.0), None)).unwrap_err(),
            "longitude is required"
        );
    }

    #[test]
    fn rejects_out_of_range_and_non_finite_coordinates() {
        assert!(LocationCheck::try_from(request(Some("t1"), Some(90.5), Some(0.0))).is_err());
        assert!(LocationCheck::try_from(request(Some("t1"), Some(0.0), Some(-180.5))).is_err());
        assert!(LocationCheck::try_from(request(Some("t1"), Some(f64::NAN), Some(0.0))).is_err());
        assert!(
            LocationCheck::try_from(request(Some("t1"), Some(0.0), Some(f64::INFINITY))).is_err()
        );
    }

    #[test]
    fn response_uses_camel_case_safe_zone_flag() {
        let response = CheckLocationResponse::from(CheckReport {
            is_in_safe_zone: true,
            violations: 0,
            message: "Tourist is in a safe zone".into(),
            severity: Severity::Low,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "success": true,
                "isInSafeZone": true,
                "violations": 0,
                "message": "Tourist is in a safe zone",
                "severity": "low"
            })
        );
    }
}
