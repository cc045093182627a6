use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelId {
    pub name: String,       // reported by GET /model, e.g. "yolo11l-pose"
    pub onnx_path: String,
}

impl ModelId {
    /// Names the model after its file stem (`models/yolo11l-pose.onnx` -> `yolo11l-pose`).
    pub fn from_path(onnx_path: impl Into<String>) -> Self {
        let onnx_path = onnx_path.into();
        let name = Path::new(&onnx_path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pose".into());
        Self { name, onnx_path }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseParams {
    pub input_size: u32,        // 640 typical
    pub conf_threshold: f32,    // 0..1
    pub iou_threshold: f32,     // 0..1
    pub max_detections: usize,  // e.g. 300
}

impl Default for PoseParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
        }
    }
}

/// Channel layout an estimator expects its raster in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub model: ModelId,
    pub params: PoseParams,
    pub intra_threads: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_named_after_file_stem() {
        assert_eq!(ModelId::from_path("/models/yolov8n-pose.onnx").name, "yolov8n-pose");
        assert_eq!(ModelId::from_path("yolo11l-pose.onnx").onnx_path, "yolo11l-pose.onnx");
        assert_eq!(ModelId::from_path("").name, "pose");
    }
}
