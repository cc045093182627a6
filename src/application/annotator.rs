use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use std::sync::Arc;
use tracing::error;

use crate::application::orchestrator::DetectionOrchestrator;
use crate::domain::{
    pose::{Keypoint, RawPerson},
    skeleton::{connection_indices, DRAW_CONFIDENCE_THRESHOLD, KEYPOINT_COLOR, SKELETON_COLOR},
};

const KEYPOINT_RADIUS: i32 = 5;
const LINE_THICKNESS: u32 = 2;

/// Draws detected skeletons onto a copy of the input.
///
/// Best-effort: when detection fails the copy is returned unannotated.
pub struct AnnotationRenderer {
    orchestrator: Arc<DetectionOrchestrator>,
}

impl AnnotationRenderer {
    pub fn new(orchestrator: Arc<DetectionOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn annotate(&self, image: &RgbImage) -> RgbImage {
        let mut annotated = image.clone();
        match self.orchestrator.detect(image) {
            Ok((persons, _)) => draw_persons(&mut annotated, &persons),
            Err(e) => error!("annotation skipped, returning original image: {e}"),
        }
        annotated
    }
}

pub fn draw_persons(image: &mut RgbImage, persons: &[RawPerson]) {
    for person in persons {
        draw_skeleton(image, &person.keypoints);
        draw_keypoints(image, &person.keypoints);
    }
}

fn visible(kp: &Keypoint) -> bool {
    kp.is_finite() && kp.confidence > DRAW_CONFIDENCE_THRESHOLD
}

fn draw_keypoints(image: &mut RgbImage, keypoints: &[Keypoint]) {
    for kp in keypoints.iter().filter(|kp| visible(kp)) {
        draw_filled_circle_mut(
            image,
            (kp.x as i32, kp.y as i32),
            KEYPOINT_RADIUS,
            Rgb(KEYPOINT_COLOR),
        );
    }
}

fn draw_skeleton(image: &mut RgbImage, keypoints: &[Keypoint]) {
    for [a, b] in connection_indices() {
        // Sparse keypoint lists only get the edges they can support.
        let (Some(start), Some(end)) = (keypoints.get(a), keypoints.get(b)) else {
            continue;
        };
        if !(visible(start) && visible(end)) {
            continue;
        }
        for t in 0..LINE_THICKNESS {
            let t = t as f32;
            draw_line_segment_mut(
                image,
                (start.x + t, start.y),
                (end.x + t, end.y),
                Rgb(SKELETON_COLOR),
            );
            draw_line_segment_mut(
                image,
                (start.x, start.y + t),
                (end.x, end.y + t),
                Rgb(SKELETON_COLOR),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::ScriptedEstimator;
    use crate::domain::pose::{KeypointIndex, RawBox};

    const WHITE: [u8; 3] = [255, 255, 255];

    fn blank() -> RgbImage {
        RgbImage::from_pixel(120, 100, Rgb(WHITE))
    }

    fn shoulders_only(confidence_right: f32) -> RawPerson {
        let mut keypoints = vec![Keypoint::new(0.0, 0.0, 0.1); KeypointIndex::COUNT];
        keypoints[KeypointIndex::LeftShoulder as usize] = Keypoint::new(20.0, 50.0, 0.9);
        keypoints[KeypointIndex::RightShoulder as usize] = Keypoint::new(100.0, 50.0, confidence_right);
        RawPerson { bbox: RawBox::Corners([0.0, 0.0, 120.0, 100.0]), score: 0.9, keypoints }
    }

    fn renderer(estimator: ScriptedEstimator) -> AnnotationRenderer {
        AnnotationRenderer::new(Arc::new(DetectionOrchestrator::new(Box::new(estimator))))
    }

    #[test]
    fn draws_markers_and_connecting_edge() {
        let mut image = blank();
        draw_persons(&mut image, &[shoulders_only(0.8)]);

        assert_eq!(image.get_pixel(20, 50).0, KEYPOINT_COLOR);
        assert_eq!(image.get_pixel(100, 50).0, KEYPOINT_COLOR);
        assert_eq!(image.get_pixel(60, 50).0, SKELETON_COLOR);
        // below threshold: nose at the origin is not drawn
        assert_eq!(image.get_pixel(0, 0).0, WHITE);
    }

    #[test]
    fn edge_needs_both_endpoints_above_threshold() {
        let mut image = blank();
        draw_persons(&mut image, &[shoulders_only(0.5)]);

        assert_eq!(image.get_pixel(20, 50).0, KEYPOINT_COLOR);
        assert_eq!(image.get_pixel(100, 50).0, WHITE);
        assert_eq!(image.get_pixel(60, 50).0, WHITE);
    }

    #[test]
    fn sparse_keypoints_do_not_panic() {
        let mut person = shoulders_only(0.9);
        person.keypoints.truncate(KeypointIndex::RightShoulder as usize + 1);

        let mut image = blank();
        draw_persons(&mut image, &[person]);
        assert_eq!(image.get_pixel(60, 50).0, SKELETON_COLOR);
    }

    #[test]
    fn annotate_leaves_input_untouched() {
        let input = blank();
        let output = renderer(ScriptedEstimator::returning(vec![shoulders_only(0.9)])).annotate(&input);

        assert_eq!(input, blank());
        assert_eq!(output.get_pixel(60, 50).0, SKELETON_COLOR);
    }

    #[test]
    fn annotate_falls_back_to_original_on_failure() {
        let input = RgbImage::from_fn(32, 16, |x, y| Rgb([x as u8, y as u8, 7]));
        let output = renderer(ScriptedEstimator::failing("model crashed")).annotate(&input);
        assert_eq!(output.as_raw(), input.as_raw());
    }

    #[test]
    fn annotation_is_deterministic() {
        let r = renderer(ScriptedEstimator::returning(vec![shoulders_only(0.9)]));
        assert_eq!(r.annotate(&blank()), r.annotate(&blank()));
    }
}
