// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/detector.rs - 检测模块与值对象
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

pub mod decode;
pub mod heuristic;
pub mod onnx;
pub mod preprocess;
pub mod session;

use serde::Serialize;

pub const NO_DETECTION_LABEL: &str = "no detection";
pub const DETECTION_FAILED_LABEL: &str = "detection failed";

/// 模型生命周期状态，仅由 InferenceSession 持有。
/// 状态迁移单向，Ready 可重新加载，Failed 为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
  Uninitialized,
  Loading,
  Ready,
  Failed,
}

/// 单次推理的候选框，不跨越检测边界
#[derive(Debug, Clone)]
pub struct Detection {
  pub class_id: u32,
  pub score: f32,
  pub bbox: [f32; 4], // [x_min, y_min, x_max, y_max]
}

/// 一次前向传播得到的扁平预测缓冲区，按行排列，每行 stride 个值
#[derive(Debug, Clone)]
pub struct PredictionBuffer {
  pub data: Box<[f32]>,
  pub rows: usize,
  pub stride: usize,
}

/// 跨越检测边界的唯一值对象
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
  pub found: bool,
  pub confidence: f32,
  pub label: String,
  pub bounding_box: Option<[i32; 4]>,
}

impl DetectionResult {
  pub fn not_found() -> Self {
    Self {
      found: false,
      confidence: 0.0,
      label: NO_DETECTION_LABEL.to_string(),
      bounding_box: None,
    }
  }

  pub fn failed() -> Self {
    Self {
      found: false,
      confidence: 0.0,
      label: DETECTION_FAILED_LABEL.to_string(),
      bounding_box: None,
    }
  }
}
