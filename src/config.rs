// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/config.rs - 检测配置
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

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::FromUrl;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.35;
pub const DEFAULT_INPUT_WIDTH: u32 = 640;
pub const DEFAULT_INPUT_HEIGHT: u32 = 640;
pub const DEFAULT_MODEL_PATH: &str = "models/ambulance.onnx";

/// COCO 中没有救护车类别，以 truck (7) 作为近似目标类别
pub const DEFAULT_TARGET_CLASS: u32 = 7;

const MODEL_SCHEME: &str = "onnx";

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("URI schema mismatch")]
  SchemaMismatch,
}

/// 检测侧的全部可调参数，在构造时显式传入
#[derive(Debug, Clone)]
pub struct DetectorConfig {
  /// ONNX 模型文件路径
  pub model_path: String,
  /// 置信度阈值 (0.0 - 1.0)
  pub confidence_threshold: f32,
  /// 目标类别集合（COCO 类别编号）
  pub target_classes: HashSet<u32>,
  /// 模型输入宽度
  pub input_width: u32,
  /// 模型输入高度
  pub input_height: u32,
}

impl Default for DetectorConfig {
  fn default() -> Self {
    Self {
      model_path: DEFAULT_MODEL_PATH.to_string(),
      confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
      target_classes: HashSet::from([DEFAULT_TARGET_CLASS]),
      input_width: DEFAULT_INPUT_WIDTH,
      input_height: DEFAULT_INPUT_HEIGHT,
    }
  }
}

impl FromUrl for DetectorConfig {
  type Error = ConfigError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != MODEL_SCHEME {
      return Err(ConfigError::SchemaMismatch);
    }

    Ok(DetectorConfig {
      model_path: url.path().to_string(),
      ..Default::default()
    })
  }
}

impl DetectorConfig {
  pub fn with_confidence(mut self, confidence_threshold: f32) -> Self {
    self.confidence_threshold = confidence_threshold;
    self
  }

  pub fn with_target_classes(mut self, target_classes: HashSet<u32>) -> Self {
    self.target_classes = target_classes;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_enumerates_every_tunable() {
    let config = DetectorConfig::default();
    assert_eq!(config.confidence_threshold, DEFAULT_CONFIDENCE_THRESHOLD);
    assert_eq!(config.target_classes, HashSet::from([DEFAULT_TARGET_CLASS]));
    assert_eq!(config.input_width, 640);
    assert_eq!(config.input_height, 640);
  }

  #[test]
  fn config_from_model_url() {
    let url = Url::parse("onnx:///opt/models/ambulance.onnx").unwrap();
    let config = DetectorConfig::from_url(&url).unwrap();
    assert_eq!(config.model_path, "/opt/models/ambulance.onnx");
  }

  #[test]
  fn config_rejects_foreign_scheme() {
    let url = Url::parse("file:///opt/models/ambulance.onnx").unwrap();
    assert!(DetectorConfig::from_url(&url).is_err());
  }

  #[test]
  fn builder_widens_target_classes() {
    let config = DetectorConfig::default().with_target_classes(HashSet::from([2, 5, 7]));
    assert!(config.target_classes.contains(&5));
    assert_eq!(config.target_classes.len(), 3);
  }
}
