// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/detector/session.rs - 推理会话生命周期
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

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::detector::onnx::{AmbulanceModel, AmbulanceModelBuilder};
use crate::detector::{DetectionResult, ModelState, decode, heuristic, preprocess};

/// 初始化时一次性选定的检测后端
enum Backend {
  ModelBacked(AmbulanceModel),
  HeuristicOnly,
}

/// 检测模型的单一持有者：持有模型状态机与后端句柄，进程生命周期内
/// 初始化一次，之后每次 detect 调用相互独立，无帧间状态。
/// &mut 接收者保证同一会话上不会有两次并发推理。
pub struct InferenceSession {
  config: DetectorConfig,
  state: ModelState,
  backend: Backend,
}

impl InferenceSession {
  pub fn new(config: DetectorConfig) -> Self {
    Self {
      config,
      state: ModelState::Uninitialized,
      backend: Backend::HeuristicOnly,
    }
  }

  pub fn state(&self) -> ModelState {
    self.state
  }

  pub fn is_model_backed(&self) -> bool {
    matches!(self.backend, Backend::ModelBacked(_))
  }

  /// 初始化（或在 Ready 状态下重新加载）检测后端。
  /// 顺序：模型文件存在性探测 -> 构建 ONNX 会话 -> 构建失败时做降级就绪
  /// 检查。文件缺失是硬性初始化失败，进入 Failed 终态；Failed 之后不再
  /// 尝试任何推理，后续检测全部直接走启发式路径。
  pub async fn initialize(&mut self) -> ModelState {
    match self.state {
      ModelState::Loading => return self.state,
      ModelState::Failed => {
        warn!("推理会话已处于失败终态，忽略初始化请求");
        return self.state;
      }
      ModelState::Ready => info!("重新加载检测模型"),
      ModelState::Uninitialized => {}
    }
    self.state = ModelState::Loading;

    let exists = tokio::fs::try_exists(&self.config.model_path)
      .await
      .unwrap_or(false);
    if !exists {
      warn!("模型文件不存在: {}", self.config.model_path);
      self.backend = Backend::HeuristicOnly;
      self.state = ModelState::Failed;
      return self.state;
    }

    match AmbulanceModelBuilder::new(&self.config).build() {
      Ok(model) => {
        self.backend = Backend::ModelBacked(model);
        self.state = ModelState::Ready;
      }
      Err(e) => {
        warn!("推理后端构建失败: {}，执行降级就绪检查", e);
        self.backend = Backend::HeuristicOnly;
        if staging_ready(self.config.input_width, self.config.input_height) {
          info!("数值运行时可用，以降级模式就绪（仅启发式检测）");
          self.state = ModelState::Ready;
        } else {
          self.state = ModelState::Failed;
        }
      }
    }

    self.state
  }

  /// 对单张图像做一次检测。所有失败（预处理、前向传播、状态异常）都在
  /// 此处吸收并转为启发式结果，调用方永远只会拿到合法的 DetectionResult。
  pub async fn detect(&mut self, image: &DynamicImage) -> DetectionResult {
    if matches!(self.state, ModelState::Uninitialized | ModelState::Loading) {
      warn!("推理会话尚未就绪（{:?}），改走启发式检测", self.state);
      return heuristic::detect(image);
    }

    let now = std::time::Instant::now();
    let result = match &mut self.backend {
      Backend::ModelBacked(model) if self.state == ModelState::Ready => {
        let tensor = match preprocess::preprocess(
          image,
          self.config.input_width,
          self.config.input_height,
        ) {
          Ok(tensor) => tensor,
          Err(e) => {
            warn!("预处理失败: {}，改走启发式检测", e);
            return heuristic::detect(image);
          }
        };
        match model.infer(tensor) {
          Ok(pred) => decode::decode(&pred, &self.config),
          Err(e) => {
            warn!("推理失败: {}，改走启发式检测", e);
            heuristic::detect(image)
          }
        }
      }
      _ => heuristic::detect(image),
    };
    debug!("检测完成，耗时: {:.2?}", now.elapsed());

    result
  }

  /// 显式释放后端句柄（原生会话随 drop 释放），回到未初始化状态
  pub async fn shutdown(&mut self) {
    info!("关闭推理会话");
    self.backend = Backend::HeuristicOnly;
    self.state = ModelState::Uninitialized;
  }
}

/// 降级就绪检查：确认数值运行时仍能按模型输入形状暂存张量。
/// 模型文件存在但后端构建失败（文件损坏、运行时缺失）时以此决定
/// 是否进入降级就绪状态。
fn staging_ready(width: u32, height: u32) -> bool {
  let scratch = ndarray::Array4::<f32>::zeros((1, 3, height as usize, width as usize));
  scratch.len() == 3 * (width as usize) * (height as usize) && scratch.sum() == 0.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::detector::heuristic::HEURISTIC_LABEL;
  use image::{Rgba, RgbaImage};

  fn config_with_model(path: &str) -> DetectorConfig {
    DetectorConfig {
      model_path: path.to_string(),
      ..Default::default()
    }
  }

  fn ambulance_like() -> DynamicImage {
    let mut image = RgbaImage::from_pixel(100, 100, Rgba([120, 120, 120, 255]));
    for y in 0..100 {
      for x in 0..100 {
        if y < 10 {
          image.put_pixel(x, y, Rgba([255, 30, 30, 255]));
        } else if y < 70 {
          image.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
      }
    }
    DynamicImage::ImageRgba8(image)
  }

  fn all_green() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([0, 200, 0, 255])))
  }

  #[tokio::test]
  async fn missing_artifact_fails_initialization() {
    let mut session = InferenceSession::new(config_with_model("/nonexistent/ambulance.onnx"));
    assert_eq!(session.state(), ModelState::Uninitialized);

    let state = session.initialize().await;
    assert_eq!(state, ModelState::Failed);
    assert!(!session.is_model_backed());

    // 之后的检测只走启发式路径
    let result = session.detect(&ambulance_like()).await;
    assert!(result.found);
    assert_eq!(result.label, HEURISTIC_LABEL);
    assert!(result.confidence <= 0.8);
  }

  #[tokio::test]
  async fn failed_state_is_terminal() {
    let mut session = InferenceSession::new(config_with_model("/nonexistent/ambulance.onnx"));
    session.initialize().await;
    let state = session.initialize().await;
    assert_eq!(state, ModelState::Failed);
  }

  #[tokio::test]
  async fn corrupt_artifact_degrades_to_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ambulance.onnx");
    std::fs::write(&path, b"not an onnx model").unwrap();

    let mut session = InferenceSession::new(config_with_model(path.to_str().unwrap()));
    let state = session.initialize().await;
    assert_eq!(state, ModelState::Ready);
    assert!(!session.is_model_backed());

    let result = session.detect(&all_green()).await;
    assert!(!result.found);
  }

  #[tokio::test]
  async fn detect_before_initialize_uses_heuristic() {
    let mut session = InferenceSession::new(DetectorConfig::default());
    let result = session.detect(&all_green()).await;
    assert!(!result.found);
    assert_eq!(session.state(), ModelState::Uninitialized);
  }

  #[tokio::test]
  async fn shutdown_returns_to_uninitialized() {
    let mut session = InferenceSession::new(config_with_model("/nonexistent/ambulance.onnx"));
    session.initialize().await;
    session.shutdown().await;
    assert_eq!(session.state(), ModelState::Uninitialized);
    assert!(!session.is_model_backed());
  }
}
