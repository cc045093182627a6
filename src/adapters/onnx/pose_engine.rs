use anyhow::{bail, Context, Result};
use image::{imageops::FilterType, RgbImage};
use ndarray::{Array4, ArrayView2, Axis, Ix2};
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use crate::application::ports::PoseEstimatorPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::{InferenceConfig, PoseParams};
use crate::domain::pose::{Keypoint, KeypointIndex, RawBox, RawPerson};

/// Rows per candidate: `cx, cy, w, h, score` then `(x, y, conf)` per keypoint.
const BOX_ROWS: usize = 5;
const KPT_STEP: usize = 3;
const PRED_ROWS: usize = BOX_ROWS + KPT_STEP * KeypointIndex::COUNT;

/// YOLO-pose (v8/11) ONNX export running on ONNX Runtime.
pub struct OnnxPoseEngine {
    session: Session,
    params: PoseParams,
}

impl OnnxPoseEngine {
    pub fn load(config: &InferenceConfig) -> Result<Self> {
        #[allow(unused_mut)]
        let mut builder = Session::builder()?.with_intra_threads(config.intra_threads)?;

        #[cfg(feature = "cuda")]
        {
            use ort::execution_providers::CUDAExecutionProvider;
            // CUDA is optional: fall back to CPU when the provider can't register.
            let cuda = CUDAExecutionProvider::default().build();
            if let Ok(builder_with_cuda) = builder.clone().with_execution_providers([cuda]) {
                builder = builder_with_cuda;
            }
        }

        let session = builder
            .commit_from_file(&config.model.onnx_path)
            .with_context(|| format!("failed to load ONNX model {}", config.model.onnx_path))?;

        info!(model = %config.model.name, input_size = config.params.input_size, "ONNX pose session ready");
        Ok(Self { session, params: config.params.clone() })
    }

    fn run(&mut self, rgb: &RgbImage) -> Result<Vec<RawPerson>> {
        if rgb.width() == 0 || rgb.height() == 0 {
            bail!("empty image");
        }
        let imgsz = self.params.input_size;
        let input = preprocess(rgb, imgsz);

        let outputs = self.session.run(ort::inputs![Tensor::from_array(input)?])?;
        let output: ndarray::ArrayViewD<f32> = outputs[0]
            .try_extract_array()
            .context("failed to extract pose output")?;

        // [1, 56, N] -> [56, N]
        let preds = output
            .index_axis(Axis(0), 0)
            .into_dimensionality::<Ix2>()
            .context("unexpected pose output rank")?;

        let sx = rgb.width() as f32 / imgsz as f32;
        let sy = rgb.height() as f32 / imgsz as f32;
        decode_predictions(preds, (sx, sy), (rgb.width() as f32, rgb.height() as f32), &self.params)
    }
}

impl PoseEstimatorPort for OnnxPoseEngine {
    fn estimate(&mut self, image: &RgbImage) -> DomainResult<Vec<RawPerson>> {
        self.run(image).map_err(|e| DomainError::Inference(format!("{e:#}")))
    }
}

/// Resize to the square model input, scale to [0, 1], NCHW.
fn preprocess(rgb: &RgbImage, imgsz: u32) -> Array4<f32> {
    let resized = image::imageops::resize(rgb, imgsz, imgsz, FilterType::Triangle);
    let size = imgsz as usize;

    let mut input = Array4::<f32>::zeros((1, 3, size, size));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        input[[0, 0, y, x]] = pixel[0] as f32 / 255.0;
        input[[0, 1, y, x]] = pixel[1] as f32 / 255.0;
        input[[0, 2, y, x]] = pixel[2] as f32 / 255.0;
    }
    input
}

/// Turns raw `[56, N]` predictions into persons in original-image pixels,
/// strongest first.
fn decode_predictions(
    preds: ArrayView2<f32>,
    (sx, sy): (f32, f32),
    (width, height): (f32, f32),
    params: &PoseParams,
) -> Result<Vec<RawPerson>> {
    if preds.nrows() != PRED_ROWS {
        bail!("expected {PRED_ROWS} prediction rows, got {}", preds.nrows());
    }

    let mut candidates = Vec::new();
    for pred in preds.axis_iter(Axis(1)) {
        let score = pred[4];
        if score.is_nan() || score < params.conf_threshold {
            continue;
        }

        let keypoints = (0..KeypointIndex::COUNT)
            .map(|k| {
                let base = BOX_ROWS + KPT_STEP * k;
                Keypoint::new(
                    (pred[base] * sx).clamp(0.0, width),
                    (pred[base + 1] * sy).clamp(0.0, height),
                    pred[base + 2],
                )
            })
            .collect();

        let [x1, y1, x2, y2] =
            corners(&RawBox::CenterExtent([pred[0] * sx, pred[1] * sy, pred[2] * sx, pred[3] * sy]));
        candidates.push(RawPerson {
            bbox: RawBox::Corners([
                x1.clamp(0.0, width),
                y1.clamp(0.0, height),
                x2.clamp(0.0, width),
                y2.clamp(0.0, height),
            ]),
            score,
            keypoints,
        });
    }

    non_max_suppression(&mut candidates, params.iou_threshold);
    candidates.truncate(params.max_detections);
    Ok(candidates)
}

fn corners(bbox: &RawBox) -> [f32; 4] {
    match *bbox {
        RawBox::Corners(c) => c,
        RawBox::CenterExtent([cx, cy, w, h]) => [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0],
    }
}

fn iou(a: &RawBox, b: &RawBox) -> f32 {
    let [ax1, ay1, ax2, ay2] = corners(a);
    let [bx1, by1, bx2, by2] = corners(b);

    let iw = (ax2.min(bx2) - ax1.max(bx1)).max(0.0);
    let ih = (ay2.min(by2) - ay1.max(by1)).max(0.0);
    let inter = iw * ih;
    let union = (ax2 - ax1) * (ay2 - ay1) + (bx2 - bx1) * (by2 - by1) - inter;
    if union <= 0.0 { 0.0 } else { inter / union }
}

/// Greedy NMS; keeps survivors sorted by descending score.
fn non_max_suppression(xs: &mut Vec<RawPerson>, iou_threshold: f32) {
    xs.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept = 0;
    for index in 0..xs.len() {
        let drop = (0..kept).any(|prev| iou(&xs[prev].bbox, &xs[index].bbox) > iou_threshold);
        if !drop {
            xs.swap(kept, index);
            kept += 1;
        }
    }
    xs.truncate(kept);
}
