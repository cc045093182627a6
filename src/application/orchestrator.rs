use image::RgbImage;
use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::application::ports::PoseEstimatorPort;
use crate::domain::{
    errors::{DomainError, DomainResult},
    model::ChannelOrder,
    pose::{PhaseTimings, RawPerson},
};

/// Runs the shared estimator once per call and times the phases around it.
///
/// Channel reordering happens outside the lock so concurrent requests only
/// serialize on the estimator itself. A panicking estimator fails only the
/// call that panicked.
pub struct DetectionOrchestrator {
    estimator: Mutex<Box<dyn PoseEstimatorPort>>,
    order: ChannelOrder,
}

impl DetectionOrchestrator {
    pub fn new(estimator: Box<dyn PoseEstimatorPort>) -> Self {
        let order = estimator.channel_order();
        Self { estimator: Mutex::new(estimator), order }
    }

    pub fn detect(&self, image: &RgbImage) -> DomainResult<(Vec<RawPerson>, PhaseTimings)> {
        let t_pre = Instant::now();
        let input = to_channel_order(image, self.order);
        let preprocess = t_pre.elapsed();

        let t_infer = Instant::now();
        let persons = {
            let mut estimator = self.estimator.lock().unwrap_or_else(|poisoned| {
                warn!("estimator lock was poisoned, reusing estimator");
                PoisonError::into_inner(poisoned)
            });
            panic::catch_unwind(AssertUnwindSafe(|| estimator.estimate(&input)))
                .map_err(|payload| DomainError::Inference(format!("estimator panicked: {}", panic_message(&*payload))))??
        };
        let inference = t_infer.elapsed();

        debug!(persons = persons.len(), ?preprocess, ?inference, "estimator finished");

        // Post-processing is not separable from `estimate`.
        let timings = PhaseTimings { preprocess, inference, postprocess: Duration::ZERO };
        Ok((persons, timings))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Decoded rasters are RGB; BGR estimators get red and blue swapped.
fn to_channel_order(image: &RgbImage, order: ChannelOrder) -> Cow<'_, RgbImage> {
    match order {
        ChannelOrder::Rgb => Cow::Borrowed(image),
        ChannelOrder::Bgr => {
            let mut swapped = image.clone();
            for px in swapped.pixels_mut() {
                px.0.swap(0, 2);
            }
            Cow::Owned(swapped)
        }
    }
}
