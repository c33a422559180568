use super::resolver::ZoneResolution;
use crate::models::{Severity, ViolationType, Zone};

pub const SAFE_ZONE_MESSAGE: &str = "Tourist is in a safe zone";
pub const ZONE_EXIT_MESSAGE: &str = "Tourist exited safe zone";
const DANGER_ZONE_MESSAGE_PREFIX: &str = "Tourist entered danger zone: ";

#[derive(Debug, Clone, PartialEq)]
pub struct ViolationDecision<'z> {
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub alert_severity: Severity,
    pub alert_message: String,
    /// 命中的全部危险区；区域离开时为空
    pub zones: Vec<&'z Zone>,
}

impl ViolationDecision<'_> {
    pub fn zone_ids(&self) -> Vec<String> {
        self.zones.iter().map(|z| z.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision<'z> {
    pub violation: Option<ViolationDecision<'z>>,
    pub message: String,
    pub severity: Severity,
}

/// 违规策略：危险区优先于安全区，不在任何区域内视为离开安全区
pub fn evaluate<'z>(resolution: &ZoneResolution<'z>) -> Decision<'z> {
    if let Some(first) = resolution.dangerous_zones.first() {
        let message = format!("{}{}", DANGER_ZONE_MESSAGE_PREFIX, first.name);
        return Decision {
            violation: Some(ViolationDecision {
                violation_type: ViolationType::DangerZoneEntry,
                severity: Severity::High,
                alert_severity: Severity::Critical,
                alert_message: message.clone(),
                zones: resolution.dangerous_zones.clone(),
            }),
            message,
            severity: Severity::High,
        };
    }

    if !resolution.in_safe_zone {
        return Decision {
            violation: Some(ViolationDecision {
                violation_type: ViolationType::ZoneExit,
                severity: Severity::Medium,
                alert_severity: Severity::Medium,
                alert_message: ZONE_EXIT_MESSAGE.to_string(),
                zones: Vec::new(),
            }),
            message: ZONE_EXIT_MESSAGE.to_string(),
            severity: Severity::Medium,
        };
    }

    Decision {
        violation: None,
        message: SAFE_ZONE_MESSAGE.to_string(),
        severity: Severity::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SafetyLevel;

    fn zone(id: &str, name: &str) -> Zone {
        Zone {
            id: id.into(),
            name: name.into(),
            safety_level: SafetyLevel::Dangerous,
            polygon: Vec::new(),
            holes: Vec::new(),
        }
    }

    #[test]
    fn danger_takes_precedence_over_safe() {
        let cliff = zone("d1", "Cliff Edge");
        let resolution = ZoneResolution {
            in_safe_zone: true,
            dangerous_zones: vec![&cliff],
        };

        let decision = evaluate(&resolution);
        let violation = decision.violation.expect("violation");
        assert_eq!(violation.violation_type, ViolationType::DangerZoneEntry);
        assert_eq!(violation.severity, Severity::High);
        assert_eq!(violation.alert_severity, Severity::Critical);
        assert_eq!(violation.alert_message, "Tourist entered danger zone: Cliff Edge");
        assert_eq!(decision.severity, Severity::High);
    }

    #[test]
    fn alert_names_only_the_first_dangerous_zone() {
        let first = zone("d1", "Quarry");
        let second = zone("d2", "Rail Yard");
        let resolution = ZoneResolution {
            in_safe_zone: false,
            dangerous_zones: vec![&first, &second],
        };

        let violation = evaluate(&resolution).violation.expect("violation");
        assert_eq!(violation.alert_message, "Tourist entered danger zone: Quarry");
        assert_eq!(violation.zone_ids(), vec!["d1".to_string(), "d2".to_string()]);
    }

    #[test]
    fn no_zone_is_a_zone_exit() {
        let decision = evaluate(&ZoneResolution::default());
        let violation = decision.violation.expect("violation");

        assert_eq!(violation.violation_type, ViolationType::ZoneExit);
        assert_eq!(violation.severity, Severity::Medium);
        assert_eq!(violation.alert_severity, Severity::Medium);
        assert!(violation.zones.is_empty());
        assert_eq!(decision.message, "Tourist exited safe zone");
        assert_eq!(decision.severity, Severity::Medium);
    }

    #[test]
    fn safe_zone_only_is_not_a_violation() {
        let decision = evaluate(&ZoneResolution {
            in_safe_zone: true,
            dangerous_zones: Vec::new(),
        });

        assert!(decision.violation.is_none());
        assert_eq!(decision.message, "Tourist is in a safe zone");
        assert_eq!(decision.severity, Severity::Low);
    }
}
