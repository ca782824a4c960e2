// 该文件是 Mingdi （鸣笛疾行） 项目的一部分。
// src/detector/decode.rs - 预测缓冲区解码
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

use tracing::debug;

use crate::config::DetectorConfig;
use crate::detector::{Detection, DetectionResult, PredictionBuffer};

/// COCO 数据集类别名称
pub const COCO_CLASSES: [&str; 80] = [
  "person",
  "bicycle",
  "car",
  "motorcycle",
  "airplane",
  "bus",
  "train",
  "truck",
  "boat",
  "traffic light",
  "fire hydrant",
  "stop sign",
  "parking meter",
  "bench",
  "bird",
  "cat",
  "dog",
  "horse",
  "sheep",
  "cow",
  "elephant",
  "bear",
  "zebra",
  "giraffe",
  "backpack",
  "umbrella",
  "handbag",
  "tie",
  "suitcase",
  "frisbee",
  "skis",
  "snowboard",
  "sports ball",
  "kite",
  "baseball bat",
  "baseball glove",
  "skateboard",
  "surfboard",
  "tennis racket",
  "bottle",
  "wine glass",
  "cup",
  "fork",
  "knife",
  "spoon",
  "bowl",
  "banana",
  "apple",
  "sandwich",
  "orange",
  "broccoli",
  "carrot",
  "hot dog",
  "pizza",
  "donut",
  "cake",
  "chair",
  "couch",
  "potted plant",
  "bed",
  "dining table",
  "toilet",
  "tv",
  "laptop",
  "mouse",
  "remote",
  "keyboard",
  "cell phone",
  "microwave",
  "oven",
  "toaster",
  "sink",
  "refrigerator",
  "book",
  "clock",
  "vase",
  "scissors",
  "teddy bear",
  "hair drier",
  "toothbrush",
];

/// 解码扁平预测缓冲区，每行为 [x_min, y_min, x_max, y_max, 类别分数 × 80]。
/// 逐行取类别分数的 argmax，按置信度阈值与目标类别过滤，仅保留得分最高的
/// 一行。不做重叠抑制：同帧出现多个目标时只报告置信度最高的那个。
pub fn decode(pred: &PredictionBuffer, config: &DetectorConfig) -> DetectionResult {
  let expected_stride = 4 + COCO_CLASSES.len();
  if pred.stride != expected_stride || pred.data.len() != pred.rows * pred.stride {
    debug!(
      "预测缓冲区形状异常: rows={}, stride={}, len={}",
      pred.rows,
      pred.stride,
      pred.data.len()
    );
    return DetectionResult::not_found();
  }

  let mut best: Option<Detection> = None;
  for row in pred.data.chunks_exact(pred.stride) {
    let (class_id, score) = argmax(&row[4..]);
    if score <= config.confidence_threshold {
      continue;
    }
    if !config.target_classes.contains(&class_id) {
      continue;
    }
    if best.as_ref().map(|b| score > b.score).unwrap_or(true) {
      best = Some(Detection {
        class_id,
        score,
        bbox: [row[0], row[1], row[2], row[3]],
      });
    }
  }

  match best {
    Some(det) => {
      let label = COCO_CLASSES
        .get(det.class_id as usize)
        .unwrap_or(&"unknown")
        .to_string();
      debug!("检测到目标: {} ({:.3})", label, det.score);
      DetectionResult {
        found: true,
        confidence: det.score.clamp(0.0, 1.0),
        label,
        bounding_box: Some([
          det.bbox[0].round() as i32,
          det.bbox[1].round() as i32,
          det.bbox[2].round() as i32,
          det.bbox[3].round() as i32,
        ]),
      }
    }
    None => DetectionResult::not_found(),
  }
}

fn argmax(scores: &[f32]) -> (u32, f32) {
  let mut class_id = 0u32;
  let mut best = f32::MIN;
  for (idx, &score) in scores.iter().enumerate() {
    if score > best {
      best = score;
      class_id = idx as u32;
    }
  }
  (class_id, best)
}
