use clap::Parser;

use crate::domain::model::{InferenceConfig, ModelId, PoseParams};

/// Pose detection HTTP service.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "POSE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "POSE_PORT", default_value_t = 60000)]
    pub port: u16,

    /// YOLO-pose ONNX model file
    #[arg(long, env = "POSE_MODEL", default_value = "yolo11l-pose.onnx", value_name = "FILE")]
    pub model: String,

    /// Square model input size
    #[arg(long, default_value_t = 640)]
    pub input_size: u32,

    /// Person score threshold (0.0 - 1.0)
    #[arg(long, default_value_t = 0.25, value_name = "THRESHOLD")]
    pub conf_threshold: f32,

    /// NMS IoU threshold (0.0 - 1.0)
    #[arg(long, default_value_t = 0.7, value_name = "THRESHOLD")]
    pub iou_threshold: f32,

    /// Maximum persons per image
    #[arg(long, default_value_t = 300)]
    pub max_detections: usize,

    /// ONNX Runtime intra-op threads
    #[arg(long, default_value_t = 4)]
    pub intra_threads: usize,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn inference(&self) -> InferenceConfig {
        InferenceConfig {
            model: ModelId::from_path(self.model.as_str()),
            params: PoseParams {
                input_size: self.input_size,
                conf_threshold: self.conf_threshold,
                iou_threshold: self.iou_threshold,
                max_detections: self.max_detections,
            },
            intra_threads: self.intra_threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["pose-service"]).unwrap();
        assert_eq!(config.port, 60000);
        let infer = config.inference();
        assert_eq!(infer.model.name, "yolo11l-pose");
        assert_eq!(infer.params.input_size, 640);
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "pose-service",
            "--port", "8080",
            "--model", "/models/yolov8n-pose.onnx",
            "--conf-threshold", "0.4",
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        let infer = config.inference();
        assert_eq!(infer.model.name, "yolov8n-pose");
        assert_eq!(infer.params.conf_threshold, 0.4);
    }
}
