// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/detector/onnx.rs - ONNX 推理后端
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

use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::Session;
use ort::value::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DetectorConfig;
use crate::detector::PredictionBuffer;

const MODEL_INPUT_NAME: &str = "images";
const MODEL_OUTPUT_NAME: &str = "output0";

#[derive(Error, Debug)]
pub enum ModelError {
  #[error("模型加载错误: {0}")]
  ModelLoad(#[from] std::io::Error),
  #[error("推理后端错误: {0}")]
  Backend(#[from] ort::Error),
  #[error("模型输出形状错误: {0:?}")]
  OutputShape(Vec<usize>),
}

pub struct AmbulanceModelBuilder {
  model_path: String,
}

impl AmbulanceModelBuilder {
  pub fn new(config: &DetectorConfig) -> Self {
    Self {
      model_path: config.model_path.clone(),
    }
  }

  pub fn build(self) -> Result<AmbulanceModel, ModelError> {
    info!("加载模型文件: {}", self.model_path);
    let model_data = std::fs::read(&self.model_path)?;
    debug!(
      "模型文件大小: {:.2} MB",
      model_data.len() as f64 / (1024.0 * 1024.0)
    );

    info!("创建 ONNX 推理会话");
    let session = Session::builder()?
      .with_execution_providers([CPUExecutionProvider::default().build()])?
      .commit_from_memory(&model_data)?;
    info!("模型加载完成");

    Ok(AmbulanceModel { session })
  }
}

/// 已加载、可直接执行前向传播的模型句柄。
/// 内部的原生会话随本结构体 drop 时释放。
pub struct AmbulanceModel {
  session: Session,
}

impl AmbulanceModel {
  /// 执行一次前向传播，返回扁平预测缓冲区（rows 行，每行 4 + 类别数个值）
  pub fn infer(&mut self, input: Array4<f32>) -> Result<PredictionBuffer, ModelError> {
    debug!("设置模型输入");
    let value = Value::from_array(input.into_dyn())?;

    debug!("执行模型推理");
    let outputs = self.session.run(ort::inputs![MODEL_INPUT_NAME => &value])?;

    debug!("获取模型输出");
    let view = outputs[MODEL_OUTPUT_NAME].try_extract_array::<f32>()?;
    let shape = view.shape().to_vec();
    let (rows, stride) = match shape.as_slice() {
      [1, rows, stride] => (*rows, *stride),
      [rows, stride] => (*rows, *stride),
      _ => return Err(ModelError::OutputShape(shape)),
    };

    debug!("模型输出: {} 行，每行 {} 个值", rows, stride);
    Ok(PredictionBuffer {
      data: view.iter().copied().collect(),
      rows,
      stride,
    })
  }
}
