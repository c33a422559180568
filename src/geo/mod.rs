use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// 区域环中 `[x, y]` 坐标对的轴顺序
///
/// 默认按 GeoJSON 的 `[lng, lat]` 读取。`LatLng` 把第一个值当作纬度，
/// 与旧版移动端后端写入的数据保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    #[default]
    LngLat,
    LatLng,
}

impl AxisOrder {
    pub fn to_coordinate(self, pair: [f64; 2]) -> Coordinate {
        match self {
            AxisOrder::LngLat => Coordinate::new(pair[1], pair[0]),
            AxisOrder::LatLng => Coordinate::new(pair[0], pair[1]),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AxisOrder::LngLat => "lng_lat",
            AxisOrder::LatLng => "lat_lng",
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lng_lat" | "lnglat" | "geojson" => Ok(AxisOrder::LngLat),
            "lat_lng" | "latlng" | "legacy" => Ok(AxisOrder::LatLng),
            other => Err(format!("unknown axis order: {}", other)),
        }
    }
}

/// 射线法（奇偶规则）判断点是否在环内
///
/// 环自动闭合，重复的闭合顶点不影响结果；少于三个顶点的环不包含任何点。
pub fn point_in_ring(point: Coordinate, ring: &[[f64; 2]], axis: AxisOrder) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = axis.to_coordinate(ring[i]);
        let b = axis.to_coordinate(ring[j]);

        // 边跨越测试点所在纬度时，比较交点经度
        if (a.latitude > point.latitude) != (b.latitude > point.latitude) {
            let crossing = (b.longitude - a.longitude) * (point.latitude - a.latitude)
                / (b.latitude - a.latitude)
                + a.longitude;
            if point.longitude < crossing {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
