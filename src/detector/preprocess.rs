// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/detector/preprocess.rs - 模型输入预处理
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

use image::{DynamicImage, imageops};
use ndarray::Array4;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PreprocessError {
  #[error("输入图像尺寸为零: {0}x{1}")]
  EmptyImage(u32, u32),
  #[error("张量形状错误: {0}")]
  Shape(#[from] ndarray::ShapeError),
}

/// 将解码后的图像转换为模型输入张量，布局 [1, 3, H, W]，数值归一化到 [0, 1]。
/// 源尺寸与模型输入不同时做双线性缩放；中间缓冲区均为函数局部所有，
/// 任何返回路径上都会被释放。
pub fn preprocess(
  image: &DynamicImage,
  width: u32,
  height: u32,
) -> Result<Array4<f32>, PreprocessError> {
  let rgb = image.to_rgb8();
  let (src_w, src_h) = rgb.dimensions();
  if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
    return Err(PreprocessError::EmptyImage(src_w, src_h));
  }

  let resized = if (src_w, src_h) != (width, height) {
    debug!("缩放输入图像: {}x{} -> {}x{}", src_w, src_h, width, height);
    imageops::resize(&rgb, width, height, imageops::FilterType::Triangle)
  } else {
    rgb
  };

  // HWC -> CHW，并在最前面补上 batch 维
  let mut data = Vec::with_capacity(3 * (width as usize) * (height as usize));
  for c in 0..3usize {
    for y in 0..height {
      for x in 0..width {
        data.push(resized.get_pixel(x, y)[c] as f32 / 255.0);
      }
    }
  }

  Ok(Array4::from_shape_vec(
    (1, 3, height as usize, width as usize),
    data,
  )?)
}
