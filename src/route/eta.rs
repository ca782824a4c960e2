// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/route/eta.rs - 到达时间估计
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

use crate::route::{GeoCoordinate, synthesize};

/// 只返回行程时长标签的窄查询面，不向调用方泄露路线内部
pub async fn estimate_eta(
  current: GeoCoordinate,
  destination: GeoCoordinate,
  emergency_priority: bool,
) -> String {
  let route = synthesize::synthesize_route(current, destination, emergency_priority, false).await;
  route.route_info.duration_label
}

/// 调度方默认按急救优先级询问 ETA
pub async fn estimate_eta_emergency(current: GeoCoordinate, destination: GeoCoordinate) -> String {
  estimate_eta(current, destination, true).await
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pair() -> (GeoCoordinate, GeoCoordinate) {
    (GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.09, 0.0))
  }

  #[tokio::test]
  async fn eta_matches_primary_route_duration() {
    let (start, end) = pair();
    let route = synthesize::synthesize_route(start, end, true, false).await;
    let eta = estimate_eta(start, end, true).await;
    assert_eq!(eta, route.route_info.duration_label);
  }

  #[tokio::test]
  async fn emergency_eta_defaults_to_priority() {
    let (start, end) = pair();
    assert_eq!(
      estimate_eta_emergency(start, end).await,
      estimate_eta(start, end, true).await
    );
  }
}
