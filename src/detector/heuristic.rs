// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/detector/heuristic.rs - 颜色启发式降级检测
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
use tracing::debug;

use crate::detector::{DetectionResult, NO_DETECTION_LABEL};

pub const HEURISTIC_LABEL: &str = "ambulance (color detection)";

const ACCENT_RATIO_MIN: f32 = 0.05;
const BASE_RATIO_MIN: f32 = 0.15;
const CONFIDENCE_MIN: f32 = 0.3;
// 该路径可信度低于模型推理，置信度上限压在 0.8
const CONFIDENCE_CAP: f32 = 0.8;
const BOX_MARGIN: i32 = 20;

/// 模型推理不可用时的降级检测：统计红色主导（车身标识）与白色主导
/// （车身底色）像素的占比来判断画面中是否存在救护车样式的车辆。
pub fn detect(image: &DynamicImage) -> DetectionResult {
  let rgba = image.to_rgba8();
  let (width, height) = rgba.dimensions();
  let total = (width as u64) * (height as u64);
  if total == 0 {
    debug!("颜色启发式检测失败: 空图像");
    return DetectionResult::failed();
  }

  let mut accent = 0u64;
  let mut base = 0u64;
  for pixel in rgba.pixels() {
    let [r, g, b, _] = pixel.0;
    if r > 200 && g < 100 && b < 100 {
      accent += 1;
    } else if r > 200 && g > 200 && b > 200 {
      base += 1;
    }
  }

  let accent_ratio = accent as f32 / total as f32;
  let base_ratio = base as f32 / total as f32;
  let confidence = (4.0 * accent_ratio + 2.0 * base_ratio).min(CONFIDENCE_CAP);
  let found = accent_ratio > ACCENT_RATIO_MIN
    && base_ratio > BASE_RATIO_MIN
    && confidence > CONFIDENCE_MIN;

  debug!(
    "颜色启发式: accent={:.3}, base={:.3}, confidence={:.3}, found={}",
    accent_ratio, base_ratio, confidence, found
  );

  if found {
    DetectionResult {
      found: true,
      confidence,
      label: HEURISTIC_LABEL.to_string(),
      bounding_box: Some([
        BOX_MARGIN,
        BOX_MARGIN,
        width as i32 - 2 * BOX_MARGIN,
        height as i32 - 2 * BOX_MARGIN,
      ]),
    }
  } else {
    DetectionResult {
      found: false,
      confidence,
      label: NO_DETECTION_LABEL.to_string(),
      bounding_box: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::detector::DETECTION_FAILED_LABEL;
  use image::{Rgba, RgbaImage};

  fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
  }

  // 红色标识占 10%，白色底色占 60%，其余为灰色
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

  #[test]
  fn all_green_is_not_an_ambulance() {
    let result = detect(&solid(64, 64, [0, 200, 0, 255]));
    assert!(!result.found);
    assert_eq!(result.confidence, 0.0);
  }

  #[test]
  fn red_and_white_mix_is_detected() {
    let result = detect(&ambulance_like());
    assert!(result.found);
    assert_eq!(result.label, HEURISTIC_LABEL);
    assert!((result.confidence - 0.8).abs() < 1e-6);
    assert_eq!(result.bounding_box, Some([20, 20, 60, 60]));
  }

  #[test]
  fn confidence_never_exceeds_cap() {
    // 全白图像：base_ratio = 1.0，未截断前的置信度为 2.0
    let result = detect(&solid(32, 32, [255, 255, 255, 255]));
    assert!(!result.found);
    assert!(result.confidence <= CONFIDENCE_CAP);
  }

  #[test]
  fn empty_image_reports_failure() {
    let result = detect(&DynamicImage::new_rgba8(0, 0));
    assert!(!result.found);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.label, DETECTION_FAILED_LABEL);
  }
}
