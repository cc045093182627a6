use super::pose::KeypointIndex;

/// Joints connected when drawing a person (start, end).
pub const SKELETON_CONNECTIONS: [(KeypointIndex, KeypointIndex); 16] = [
    // face
    (KeypointIndex::Nose, KeypointIndex::LeftEye),
    (KeypointIndex::Nose, KeypointIndex::RightEye),
    (KeypointIndex::LeftEye, KeypointIndex::LeftEar),
    (KeypointIndex::RightEye, KeypointIndex::RightEar),
    // arms
    (KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder),
    (KeypointIndex::LeftShoulder, KeypointIndex::LeftElbow),
    (KeypointIndex::LeftElbow, KeypointIndex::LeftWrist),
    (KeypointIndex::RightShoulder, KeypointIndex::RightElbow),
    (KeypointIndex::RightElbow, KeypointIndex::RightWrist),
    // torso
    (KeypointIndex::LeftShoulder, KeypointIndex::LeftHip),
    (KeypointIndex::RightShoulder, KeypointIndex::RightHip),
    (KeypointIndex::LeftHip, KeypointIndex::RightHip),
    // legs
    (KeypointIndex::LeftHip, KeypointIndex::LeftKnee),
    (KeypointIndex::LeftKnee, KeypointIndex::LeftAnkle),
    (KeypointIndex::RightHip, KeypointIndex::RightKnee),
    (KeypointIndex::RightKnee, KeypointIndex::RightAnkle),
];

/// Keypoints and edges are only drawn above this confidence.
pub const DRAW_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Marker color (RGB).
pub const KEYPOINT_COLOR: [u8; 3] = [0, 255, 0];

/// Edge color (RGB).
pub const SKELETON_COLOR: [u8; 3] = [255, 0, 0];

pub fn connection_indices() -> impl Iterator<Item = [usize; 2]> {
    SKELETON_CONNECTIONS.iter().map(|&(a, b)| [a as usize, b as usize])
}
