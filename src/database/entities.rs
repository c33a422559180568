use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::StoreError;
use crate::models::{Alert, AlertIssuer, GeofenceViolation, LocationSample, SafetyLevel, Zone};

#[derive(Debug, FromRow)]
pub struct ZoneEntity {
    pub id: String,
    pub name: String,
    pub safety_level: String,
    pub polygon: Json<Value>,
}

impl TryFrom<ZoneEntity> for Zone {
    type Error = StoreError;

    fn try_from(entity: ZoneEntity) -> Result<Self, Self::Error> {
        let (polygon, holes) = parse_polygon(&entity.polygon.0)
            .map_err(|e| StoreError::Malformed(format!("zone {}: {}", entity.id, e)))?;
        Ok(Zone {
            id: entity.id,
            name: entity.name,
            safety_level: SafetyLevel::from(entity.safety_level),
            polygon,
            holes,
        })
    }
}

/// 任一区域无法解析即整体失败，不能在缺少区域的情况下给出判定
pub fn zones_from_rows(rows: Vec<ZoneEntity>) -> Result<Vec<Zone>, StoreError> {
    rows.into_iter().map(Zone::try_from).collect()
}

type Ring = Vec<[f64; 2]>;

/// 支持两种存储格式：裸环 `[[x, y], ...]`，或 GeoJSON Polygon（外环 + 内环）
pub fn parse_polygon(value: &Value) -> Result<(Ring, Vec<Ring>), String> {
    let coordinates = match value {
        Value::Object(map) => map
            .get("coordinates")
            .ok_or_else(|| "polygon object without coordinates".to_string())?,
        other => other,
    };

    let nested = coordinates
        .as_array()
        .and_then(|items| items.first())
        .is_some_and(|first| first.as_array().is_some_and(|p| p.first().is_some_and(Value::is_array)));
    if !nested {
        let ring = serde_json::from_value::<Ring>(coordinates.clone()).map_err(|e| e.to_string())?;
        return Ok((ring, Vec::new()));
    }

    let mut rings = serde_json::from_value::<Vec<Ring>>(coordinates.clone())
        .map_err(|e| e.to_string())?
        .into_iter();
    let outer = rings.next().ok_or_else(|| "polygon without rings".to_string())?;
    Ok((outer, rings.collect()))
}

#[derive(Debug, FromRow)]
pub struct LocationEntity {
    pub tourist_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

impl TryFrom<LocationEntity> for LocationSample {
    type Error = StoreError;

    fn try_from(entity: LocationEntity) -> Result<Self, Self::Error> {
        Ok(LocationSample {
            status: entity.status.parse().map_err(StoreError::Malformed)?,
            tourist_id: entity.tourist_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
            recorded_at: entity.recorded_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ViolationEntity {
    pub violation_id: Uuid,
    pub tourist_id: String,
    pub zone_id: Option<String>,
    pub matched_zone_ids: Vec<String>,
    pub violation_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ViolationEntity> for GeofenceViolation {
    type Error = StoreError;

    fn try_from(entity: ViolationEntity) -> Result<Self, Self::Error> {
        Ok(GeofenceViolation {
            violation_id: entity.violation_id,
            tourist_id: entity.tourist_id,
            zone_id: entity.zone_id,
            matched_zone_ids: entity.matched_zone_ids,
            violation_type: entity
                .violation_type
                .parse()
                .map_err(StoreError::Malformed)?,
            latitude: entity.latitude,
            longitude: entity.longitude,
            severity: entity.severity.parse().map_err(StoreError::Malformed)?,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct AlertEntity {
    pub alert_id: Uuid,
    pub severity: String,
    pub message: String,
    pub target_tourist: String,
    pub issued_by: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AlertEntity> for Alert {
    type Error = StoreError;

    fn try_from(entity: AlertEntity) -> Result<Self, Self::Error> {
        Ok(Alert {
            alert_id: entity.alert_id,
            severity: entity.severity.parse().map_err(StoreError::Malformed)?,
            message: entity.message,
            target_tourist: entity.target_tourist,
            issued_by: AlertIssuer::from(entity.issued_by),
            created_at: entity.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{AxisOrder, Coordinate};
    use serde_json::json;

    #[test]
    fn parses_bare_ring() {
        let (ring, holes) = parse_polygon(&json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])).unwrap();
        assert_eq!(ring, vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        assert!(holes.is_empty());
    }

    #[test]
    fn parses_geojson_polygon_with_holes() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0], [0.0, 0.0]],
                [[1.0, 1.0], [1.0, 2.0], [2.0, 2.0], [1.0, 1.0]]
            ]
        });
        let (ring, holes) = parse_polygon(&value).unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[2], [4.0, 4.0]);
        assert_eq!(holes, vec![vec![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0], [1.0, 1.0]]]);
    }

    #[test]
    fn rejects_non_numeric_ring() {
        assert!(parse_polygon(&json!([["a", "b"]])).is_err());
        assert!(parse_polygon(&json!({"type": "Polygon"})).is_err());
        assert!(parse_polygon(&json!([[[0.0, 0.0]], [["x", 1.0]]])).is_err());
    }

    #[test]
    fn point_in_geojson_hole_is_outside_dangerous_zone() {
        let entity = ZoneEntity {
            id: "d1".into(),
            name: "Ring Road".into(),
            safety_level: "dangerous".into(),
            polygon: Json(json!({
                "type": "Polygon",
                "coordinates": [
                    [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                    [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]]
                ]
            })),
        };
        let zone = Zone::try_from(entity).unwrap();

        assert!(!zone.contains(Coordinate::new(5.0, 5.0), AxisOrder::LngLat));
        assert!(zone.contains(Coordinate::new(1.0, 1.0), AxisOrder::LngLat));
    }

    #[test]
    fn malformed_dangerous_zone_fails_the_whole_read() {
        let good = ZoneEntity {
            id: "z1".into(),
            name: "City Center".into(),
            safety_level: "safe".into(),
            polygon: Json(json!([[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]])),
        };
        let broken = ZoneEntity {
            id: "d9".into(),
            name: "Quarry".into(),
            safety_level: "dangerous".into(),
            polygon: Json(json!("x")),
        };

        let err = zones_from_rows(vec![good, broken]).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(msg) if msg.contains("d9")));
    }

    #[test]
    fn zone_entity_with_bad_polygon_is_malformed() {
        let entity = ZoneEntity {
            id: "z9".into(),
            name: "Broken".into(),
            safety_level: "safe".into(),
            polygon: Json(json!("not a ring")),
        };
        let err = Zone::try_from(entity).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(msg) if msg.contains("z9")));
    }
}
