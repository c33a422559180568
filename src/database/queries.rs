pub const SELECT_ALL_ZONES: &str = r#"
SELECT id, name, safety_level, polygon FROM zones;
"#;

pub const INSERT_LOCATION_SAMPLE: &str = r#"
INSERT INTO location_samples (sample_id, tourist_id, latitude, longitude, status, recorded_at)
VALUES ($1, $2, $3, $4, $5, $6);
"#;

pub const SELECT_LATEST_LOCATION: &str = r#"
SELECT tourist_id, latitude, longitude, status, recorded_at
FROM location_samples
WHERE tourist_id = $1
ORDER BY recorded_at DESC
LIMIT 1;
"#;

pub const INSERT_GEOFENCE_VIOLATION: &str = r#"
INSERT INTO geofence_violations (
    violation_id, tourist_id, zone_id, matched_zone_ids, violation_type,
    latitude, longitude, severity, created_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);
"#;

pub const SELECT_RECENT_VIOLATIONS: &str = r#"
SELECT
    violation_id, tourist_id, zone_id, matched_zone_ids, violation_type,
    latitude, longitude, severity, created_at
FROM geofence_violations
WHERE tourist_id = $1
ORDER BY created_at DESC
LIMIT $2;
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO alerts (alert_id, severity, message, target_tourist, issued_by, created_at)
VALUES ($1, $2, $3, $4, $5, $6);
"#;

pub const SELECT_RECENT_ALERTS: &str = r#"
SELECT alert_id, severity, message, target_tourist, issued_by, created_at
FROM alerts
ORDER BY created_at DESC
LIMIT $1;
"#;
