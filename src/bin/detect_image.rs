// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/bin/detect_image.rs - 单张图像检测
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

use anyhow::Result;
use clap::Parser;
use tracing::info;
use url::Url;

use mingdi::{
  FromUrl, config::DetectorConfig, detector::session::InferenceSession, input::ImageFileInput,
};

/// 检测单张图像中是否存在急救车辆
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// ONNX 模型文件路径（onnx:///path/to/model.onnx）
  #[arg(long, value_name = "MODEL")]
  pub model: Url,

  /// 输入图像（image:///path/to/frame.jpg）
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,

  /// 置信度阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.35", value_name = "THRESHOLD")]
  pub confidence: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();
  info!("模型文件路径: {}", args.model);
  info!("输入来源: {}", args.input);

  let config = DetectorConfig::from_url(&args.model)?.with_confidence(args.confidence);
  let image = ImageFileInput::from_url(&args.input)?.into_image();

  let mut session = InferenceSession::new(config);
  let state = session.initialize().await;
  info!("模型状态: {:?}", state);

  info!("开始检测...");
  let now = std::time::Instant::now();
  let result = session.detect(&image).await;
  info!("检测完成，耗时: {:.2?}", now.elapsed());

  println!("{}", serde_json::to_string_pretty(&result)?);

  session.shutdown().await;
  Ok(())
}
