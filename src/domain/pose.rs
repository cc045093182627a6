use serde::{Deserialize, Serialize};
use std::time::Duration;

/// COCO keypoint layout emitted by YOLO-pose models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const COUNT: usize = 17;

    pub const NAMES: [&'static str; Self::COUNT] = [
        "nose", "left_eye", "right_eye", "left_ear", "right_ear",
        "left_shoulder", "right_shoulder", "left_elbow", "right_elbow",
        "left_wrist", "right_wrist", "left_hip", "right_hip",
        "left_knee", "right_knee", "left_ankle", "right_ankle",
    ];
}

/// One landmark in original-image pixel space. On the wire: `[x, y, confidence]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "[f32; 3]", from = "[f32; 3]")]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.confidence.is_finite()
    }
}

impl From<Keypoint> for [f32; 3] {
    fn from(k: Keypoint) -> Self {
        [k.x, k.y, k.confidence]
    }
}

impl From<[f32; 3]> for Keypoint {
    fn from([x, y, confidence]: [f32; 3]) -> Self {
        Self { x, y, confidence }
    }
}

/// Fixed-size keypoint record, index-aligned with `KeypointIndex`.
pub type PersonKeypoints = [Keypoint; KeypointIndex::COUNT];

/// Box geometry as reported by an estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawBox {
    /// `x1, y1, x2, y2`
    Corners([f32; 4]),
    /// `cx, cy, w, h`
    CenterExtent([f32; 4]),
}

/// One person as produced by the pose estimator, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPerson {
    pub bbox: RawBox,
    pub score: f32,
    pub keypoints: Vec<Keypoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub probability: f32,
}

/// Persons of one image. `boxes[i]` and `keypoints[i]` describe the same person.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    count: usize,
    boxes: Vec<BoundingBox>,
    keypoints: Vec<PersonKeypoints>,
}

impl DetectionResult {
    pub fn from_persons(persons: Vec<(BoundingBox, PersonKeypoints)>) -> Self {
        let (boxes, keypoints): (Vec<_>, Vec<_>) = persons.into_iter().unzip();
        Self { count: boxes.len(), boxes, keypoints }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn keypoints(&self) -> &[PersonKeypoints] {
        &self.keypoints
    }
}

/// Durations the estimator call was split into.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimings {
    pub preprocess: Duration,
    pub inference: Duration,
    pub postprocess: Duration,
}

/// Millisecond figures attached to a JSON detection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub speed_preprocess: f64,
    pub speed_inference: f64,
    pub speed_postprocess: f64,
    pub speed_decode: f64,
    pub speed_total: f64,
}

impl TimingRecord {
    pub fn new(decode: Duration, phases: PhaseTimings, detect: Duration) -> Self {
        Self {
            speed_preprocess: round_ms(phases.preprocess),
            speed_inference: round_ms(phases.inference),
            speed_postprocess: round_ms(phases.postprocess),
            speed_decode: round_ms(decode),
            speed_total: round_ms(decode + detect),
        }
    }
}

fn round_ms(d: Duration) -> f64 {
    (d.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
