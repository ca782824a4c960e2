// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/route/synthesize.rs - 路线合成
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

use tracing::debug;

use crate::route::{
  AlternativeRoute, GeoCoordinate, OptimizedRoute, RouteInfo, TrafficDensity, distance, traffic,
};

const WAYPOINTS_PER_KM: f64 = 1.5;
const MIN_SEGMENTS: usize = 3;

// 备选路线是几何上的多样性代理：经过偏移中点的两段插值，
// 不是真实的备选道路计算。
const ALT_MIDPOINT_OFFSETS: [(f64, f64); 2] = [(0.01, 0.01), (-0.005, -0.005)];
const ALT_DISTANCE_FACTORS: [f64; 2] = [1.15, 0.95];
const ALT_DENSITIES: [TrafficDensity; 2] = [TrafficDensity::Low, TrafficDensity::Medium];

/// 合成两坐标间的主路线（以及可选的两条备选路线）。
/// 对合法坐标输入为全函数；start == end 时产出退化但良构的路线。
pub async fn synthesize_route(
  start: GeoCoordinate,
  end: GeoCoordinate,
  emergency_priority: bool,
  include_alternatives: bool,
) -> OptimizedRoute {
  let km = distance::distance_km(&start, &end);
  let density = traffic::classify_density(km);
  let segments = segment_count(km);
  let waypoints = interpolate(&start, &end, segments);
  debug!(
    "合成路线: {:.2} km, {} 个路径点, 密度 {:?}",
    km,
    waypoints.len(),
    density
  );

  let alternatives = include_alternatives.then(|| {
    (0..ALT_MIDPOINT_OFFSETS.len())
      .map(|idx| alternative(&start, &end, km, segments, idx, emergency_priority))
      .collect()
  });

  OptimizedRoute {
    start,
    end,
    route_info: build_route_info(km, density, emergency_priority, emergency_priority),
    waypoints,
    alternatives,
  }
}

fn build_route_info(
  km: f64,
  density: TrafficDensity,
  emergency_priority: bool,
  avoids_traffic_signals: bool,
) -> RouteInfo {
  let speed = traffic::average_speed(density, emergency_priority);
  RouteInfo {
    distance_label: distance::format_distance(km),
    duration_label: traffic::format_travel_time(km, speed),
    traffic_density: density,
    avoids_traffic_signals,
  }
}

fn segment_count(km: f64) -> usize {
  ((km * WAYPOINTS_PER_KM).round() as usize).max(MIN_SEGMENTS)
}

/// 两点间线性插值，含两端点，共 segments + 1 个点。
/// 端点直接取原值，避免浮点插值在两端引入误差。
fn interpolate(a: &GeoCoordinate, b: &GeoCoordinate, segments: usize) -> Vec<GeoCoordinate> {
  let mut points = Vec::with_capacity(segments + 1);
  for i in 0..=segments {
    if i == 0 {
      points.push(*a);
    } else if i == segments {
      points.push(*b);
    } else {
      let t = i as f64 / segments as f64;
      points.push(GeoCoordinate::new(
        a.latitude + (b.latitude - a.latitude) * t,
        a.longitude + (b.longitude - a.longitude) * t,
      ));
    }
  }
  points
}

/// 第 idx 条备选路线：经过偏移中点的两段插值，每段取主路线一半的步数
fn alternative(
  start: &GeoCoordinate,
  end: &GeoCoordinate,
  primary_km: f64,
  segments: usize,
  idx: usize,
  emergency_priority: bool,
) -> AlternativeRoute {
  let (dlat, dlon) = ALT_MIDPOINT_OFFSETS[idx];
  let midpoint = GeoCoordinate::new(
    (start.latitude + end.latitude) / 2.0 + dlat,
    (start.longitude + end.longitude) / 2.0 + dlon,
  );

  let half = ((segments as f64) / 2.0).round() as usize;
  let mut waypoints = interpolate(start, &midpoint, half);
  waypoints.extend(interpolate(&midpoint, end, half).into_iter().skip(1));

  let km = primary_km * ALT_DISTANCE_FACTORS[idx];
  let density = ALT_DENSITIES[idx];
  let avoids_traffic_signals = if idx == 0 { true } else { emergency_priority };

  AlternativeRoute {
    route_info: build_route_info(km, density, emergency_priority, avoids_traffic_signals),
    waypoints,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // 纬度差 0.09 度 ≈ 10.0 公里
  fn ten_km_pair() -> (GeoCoordinate, GeoCoordinate) {
    (GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.09, 0.0))
  }

  #[tokio::test]
  async fn ten_km_route_has_sixteen_waypoints() {
    let (start, end) = ten_km_pair();
    let route = synthesize_route(start, end, false, false).await;
    assert_eq!(route.waypoints.len(), 16);
    assert_eq!(route.waypoints[0], start);
    assert_eq!(*route.waypoints.last().unwrap(), end);
    assert!(route.alternatives.is_none());
  }

  #[tokio::test]
  async fn alternatives_scale_primary_distance() {
    let (start, end) = ten_km_pair();
    let route = synthesize_route(start, end, true, true).await;
    assert_eq!(route.route_info.distance_label, "10.0 km");
    assert!(route.route_info.avoids_traffic_signals);

    let alternatives = route.alternatives.unwrap();
    assert_eq!(alternatives.len(), 2);
    assert_eq!(alternatives[0].route_info.distance_label, "11.5 km");
    assert_eq!(alternatives[1].route_info.distance_label, "9.5 km");
    assert_eq!(alternatives[0].route_info.traffic_density, TrafficDensity::Low);
    assert_eq!(
      alternatives[1].route_info.traffic_density,
      TrafficDensity::Medium
    );
    assert!(alternatives[0].route_info.avoids_traffic_signals);
    assert!(alternatives[1].route_info.avoids_traffic_signals);
  }

  #[tokio::test]
  async fn alternative_waypoints_keep_exact_endpoints() {
    let (start, end) = ten_km_pair();
    let route = synthesize_route(start, end, false, true).await;
    for alt in route.alternatives.unwrap() {
      assert_eq!(alt.waypoints[0], start);
      assert_eq!(*alt.waypoints.last().unwrap(), end);
      assert!(alt.waypoints.len() >= 4);
    }
  }

  #[tokio::test]
  async fn second_alternative_follows_priority_flag() {
    let (start, end) = ten_km_pair();
    let route = synthesize_route(start, end, false, true).await;
    let alternatives = route.alternatives.unwrap();
    assert!(alternatives[0].route_info.avoids_traffic_signals);
    assert!(!alternatives[1].route_info.avoids_traffic_signals);
  }

  #[tokio::test]
  async fn degenerate_route_is_well_formed() {
    let point = GeoCoordinate::new(12.9716, 77.5946);
    let route = synthesize_route(point, point, false, false).await;
    assert_eq!(route.waypoints.len(), 4);
    assert!(route.waypoints.iter().all(|w| *w == point));
    assert_eq!(route.route_info.distance_label, "0 m");
    assert_eq!(route.route_info.duration_label, "Less than a minute");
    assert_eq!(route.route_info.traffic_density, TrafficDensity::High);
    assert!(!route.route_info.avoids_traffic_signals);
  }
}
