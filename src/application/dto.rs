use serde::{Deserialize, Serialize};

use crate::domain::pose::{DetectionResult, TimingRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub id: String,
    /// Base64 JPEG/PNG.
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectJsonResponse {
    pub id: String,
    #[serde(flatten)]
    pub result: DetectionResult,
    #[serde(flatten)]
    pub timing: TimingRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedImageResponse {
    pub id: String,
    pub annotated_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model_type: String,
    pub keypoints_count: usize,
    pub keypoint_names: Vec<String>,
    pub connections: Vec<[usize; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub pose_json: String,
    pub pose_image: String,
    pub health: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub endpoints: Endpoints,
}
