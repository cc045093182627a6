use tracing::warn;

use crate::domain::{
    errors::{DomainError, DomainResult},
    pose::{BoundingBox, DetectionResult, KeypointIndex, PersonKeypoints, RawBox, RawPerson},
};

/// Maps estimator output to the wire schema, in estimator order.
///
/// A person that cannot be represented is logged and dropped; `count` is
/// the number of persons actually emitted.
pub fn format(persons: &[RawPerson], request_id: &str) -> DetectionResult {
    let emitted = persons
        .iter()
        .enumerate()
        .filter_map(|(index, person)| match format_person(index, person, request_id) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(request_id, "{e}");
                None
            }
        })
        .collect();

    DetectionResult::from_persons(emitted)
}

fn format_person(
    index: usize,
    person: &RawPerson,
    request_id: &str,
) -> DomainResult<(BoundingBox, PersonKeypoints)> {
    let parse_error = |reason: String| DomainError::PersonParse { index, reason };

    let keypoints: PersonKeypoints = person.keypoints.as_slice().try_into().map_err(|_| {
        parse_error(format!(
            "expected {} keypoints, got {}",
            KeypointIndex::COUNT,
            person.keypoints.len()
        ))
    })?;
    if let Some(i) = keypoints.iter().position(|k| !k.is_finite()) {
        return Err(parse_error(format!("keypoint {i} is not finite")));
    }

    let [x, y, width, height] = corner_extent(person.bbox);
    if ![x, y, width, height, person.score].iter().all(|v| v.is_finite()) {
        return Err(parse_error("bounding box is not finite".into()));
    }
    if width < 0.0 || height < 0.0 {
        return Err(parse_error(format!("negative box extent {width}x{height}")));
    }

    let bbox = BoundingBox {
        id: request_id.to_string(),
        x,
        y,
        width,
        height,
        probability: person.score,
    };
    Ok((bbox, keypoints))
}

/// `[x, y, width, height]` with `(x, y)` the top-left corner.
fn corner_extent(bbox: RawBox) -> [f32; 4] {
    match bbox {
        RawBox::Corners([x1, y1, x2, y2]) => [x1, y1, x2 - x1, y2 - y1],
        RawBox::CenterExtent([cx, cy, w, h]) => [cx - w / 2.0, cy - h / 2.0, w, h],
    }
}
