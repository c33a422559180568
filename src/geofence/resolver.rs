use crate::geo::{AxisOrder, Coordinate};
use crate::models::{SafetyLevel, Zone};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneResolution<'z> {
    /// 至少有一个安全区包含该点
    pub in_safe_zone: bool,
    /// 包含该点的全部危险区，保持区域集合中的顺序
    pub dangerous_zones: Vec<&'z Zone>,
}

/// 对全部区域判定点的归属
///
/// 命中一个安全区后不再检查其余安全区；危险区全部检查并收集所有命中。
/// `caution` 及未知级别忽略。
pub fn resolve_zones<'z>(point: Coordinate, zones: &'z [Zone], axis: AxisOrder) -> ZoneResolution<'z> {
    let mut resolution = ZoneResolution::default();

    for zone in zones {
        match zone.safety_level {
            SafetyLevel::Safe => {
                if !resolution.in_safe_zone && zone.contains(point, axis) {
                    resolution.in_safe_zone = true;
                }
            }
            SafetyLevel::Dangerous => {
                if zone.contains(point, axis) {
                    resolution.dangerous_zones.push(zone);
                }
            }
            SafetyLevel::Caution | SafetyLevel::Unrecognized(_) => {}
        }
    }

    resolution
}
