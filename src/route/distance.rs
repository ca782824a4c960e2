// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/route/distance.rs - 大圆距离计算
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

use crate::route::GeoCoordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// 半正矢公式计算两坐标间的大圆距离（公里）。
/// 纯函数，对称，同点距离为 0。
pub fn distance_km(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
  let dlat = (b.latitude - a.latitude).to_radians();
  let dlon = (b.longitude - a.longitude).to_radians();
  let lat1 = a.latitude.to_radians();
  let lat2 = b.latitude.to_radians();

  let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
  2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// 距离标签：不足 1 公里以整数米呈现，否则保留一位小数的公里
pub fn format_distance(km: f64) -> String {
  if km < 1.0 {
    format!("{} m", (km * 1000.0).round() as i64)
  } else {
    format!("{:.1} km", km)
  }
}
