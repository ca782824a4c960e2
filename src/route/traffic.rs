// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/route/traffic.rs - 交通密度与速度模型
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

use crate::route::TrafficDensity;

const DENSITY_HIGH_MAX_KM: f64 = 3.0;
const DENSITY_MEDIUM_MAX_KM: f64 = 10.0;

const BASE_SPEED_LOW_KMH: f64 = 50.0;
const BASE_SPEED_MEDIUM_KMH: f64 = 30.0;
const BASE_SPEED_HIGH_KMH: f64 = 15.0;
const EMERGENCY_SPEED_FACTOR: f64 = 1.4;

/// 按行程距离分桶：短途视为密集城区，长途视为公路。
/// 这是对拥堵的距离代理，不是真实交通遥测。
pub fn classify_density(distance_km: f64) -> TrafficDensity {
  if distance_km < DENSITY_HIGH_MAX_KM {
    TrafficDensity::High
  } else if distance_km < DENSITY_MEDIUM_MAX_KM {
    TrafficDensity::Medium
  } else {
    TrafficDensity::Low
  }
}

/// 各密度档位的平均车速（公里/小时），急救优先时整体上浮
pub fn average_speed(density: TrafficDensity, emergency_priority: bool) -> f64 {
  let base = match density {
    TrafficDensity::Low => BASE_SPEED_LOW_KMH,
    TrafficDensity::Medium => BASE_SPEED_MEDIUM_KMH,
    TrafficDensity::High => BASE_SPEED_HIGH_KMH,
  };
  if emergency_priority {
    base * EMERGENCY_SPEED_FACTOR
  } else {
    base
  }
}

/// 行程时间标签：不足一分钟、分钟、小时加分钟三种形态
pub fn format_travel_time(distance_km: f64, speed_kmh: f64) -> String {
  let minutes = distance_km / speed_kmh * 60.0;
  if minutes < 1.0 {
    return "Less than a minute".to_string();
  }

  let total = minutes.round() as i64;
  if total < 60 {
    return format!("{} mins", total);
  }

  let hours = total / 60;
  let mins = total % 60;
  let unit = if hours == 1 { "hour" } else { "hours" };
  if mins == 0 {
    format!("{} {}", hours, unit)
  } else {
    format!("{} {} {} mins", hours, unit, mins)
  }
}
