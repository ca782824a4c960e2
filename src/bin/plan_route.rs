// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/bin/plan_route.rs - 路线与到达时间估算
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

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;

use mingdi::route::{GeoCoordinate, eta, synthesize};

/// 估算两坐标间的路线、备选路线与行程时间
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 出发点纬度
  #[arg(long, value_name = "LAT")]
  pub from_lat: f64,

  /// 出发点经度
  #[arg(long, value_name = "LON")]
  pub from_lon: f64,

  /// 目的地纬度
  #[arg(long, value_name = "LAT")]
  pub to_lat: f64,

  /// 目的地经度
  #[arg(long, value_name = "LON")]
  pub to_lon: f64,

  /// 按急救优先级估算
  #[arg(long)]
  pub emergency: bool,

  /// 同时合成备选路线
  #[arg(long)]
  pub alternatives: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();
  let start = GeoCoordinate::new(args.from_lat, args.from_lon);
  let end = GeoCoordinate::new(args.to_lat, args.to_lon);
  if !start.is_valid() || !end.is_valid() {
    bail!("坐标超出范围: 纬度 ∈ [-90, 90]，经度 ∈ [-180, 180]");
  }

  let route = synthesize::synthesize_route(start, end, args.emergency, args.alternatives).await;
  info!(
    "距离: {}，时长: {}，密度: {:?}",
    route.route_info.distance_label, route.route_info.duration_label, route.route_info.traffic_density
  );

  println!("{}", serde_json::to_string_pretty(&route)?);

  let eta = eta::estimate_eta_emergency(start, end).await;
  info!("急救优先 ETA: {}", eta);
  Ok(())
}
