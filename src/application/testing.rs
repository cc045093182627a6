//! Scripted estimator used by unit and HTTP tests.

use image::RgbImage;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::application::ports::PoseEstimatorPort;
use crate::domain::{
    errors::{DomainError, DomainResult},
    model::ChannelOrder,
    pose::{Keypoint, KeypointIndex, RawBox, RawPerson},
};

#[derive(Clone)]
pub struct ScriptedEstimator {
    reply: Result<Vec<RawPerson>, String>,
    order: ChannelOrder,
    pub calls: Arc<AtomicUsize>,
    /// Top-left pixel of every image handed to `estimate`.
    pub seen: Arc<Mutex<Vec<[u8; 3]>>>,
}

impl ScriptedEstimator {
    pub fn returning(persons: Vec<RawPerson>) -> Self {
        Self {
            reply: Ok(persons),
            order: ChannelOrder::Rgb,
            calls: Arc::default(),
            seen: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self { reply: Err(message.to_string()), ..Self::returning(vec![]) }
    }

    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PoseEstimatorPort for ScriptedEstimator {
    fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    fn estimate(&mut self, image: &RgbImage) -> DomainResult<Vec<RawPerson>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image.width() > 0 && image.height() > 0 {
            self.seen.lock().unwrap().push(image.get_pixel(0, 0).0);
        }
        self.reply.clone().map_err(DomainError::Inference)
    }
}

/// A standing person whose every keypoint has the given confidence.
pub fn person(confidence: f32) -> RawPerson {
    let keypoints = (0..KeypointIndex::COUNT)
        .map(|i| Keypoint::new(20.0 + (i % 3) as f32 * 10.0, 10.0 + i as f32 * 4.0, confidence))
        .collect();
    RawPerson {
        bbox: RawBox::Corners([10.0, 5.0, 60.0, 90.0]),
        score: 0.88,
        keypoints,
    }
}
