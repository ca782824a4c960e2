// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/route.rs - 路线模块与值对象
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

pub mod distance;
pub mod eta;
pub mod synthesize;
pub mod traffic;

use serde::{Deserialize, Serialize};

/// WGS84 坐标，十进制度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
  pub latitude: f64,
  pub longitude: f64,
}

impl GeoCoordinate {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
    }
  }

  /// 纬度 ∈ [-90, 90] 且经度 ∈ [-180, 180]。
  /// 核心假定输入已合法，校验属于外层调用方。
  pub fn is_valid(&self) -> bool {
    (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
  }
}

/// 交通密度分桶，由行程距离代理得出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficDensity {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
  pub distance_label: String,
  pub duration_label: String,
  pub traffic_density: TrafficDensity,
  pub avoids_traffic_signals: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlternativeRoute {
  pub route_info: RouteInfo,
  pub waypoints: Vec<GeoCoordinate>,
}

/// 一次路线合成的完整结果，构造后不再变更。
/// waypoints 首元素为 start，末元素为 end，地图侧直接按序消费。
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedRoute {
  pub start: GeoCoordinate,
  pub end: GeoCoordinate,
  pub route_info: RouteInfo,
  pub waypoints: Vec<GeoCoordinate>,
  pub alternatives: Option<Vec<AlternativeRoute>>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn coordinate_range_check() {
    assert!(GeoCoordinate::new(40.7128, -74.0060).is_valid());
    assert!(GeoCoordinate::new(-90.0, 180.0).is_valid());
    assert!(!GeoCoordinate::new(91.0, 0.0).is_valid());
    assert!(!GeoCoordinate::new(0.0, -180.5).is_valid());
  }
}
