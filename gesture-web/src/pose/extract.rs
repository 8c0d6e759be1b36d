//! Feature extraction for gesture classification
//!
//! Flattens the 21 landmarks of one hand into the 63-value vector the
//! classifier is trained on:
//! `[lm0.x, lm0.y, lm0.z, lm1.x, ..., lm20.z]`

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::landmark::{Landmark, COORDS_PER_LANDMARK, LANDMARK_COUNT};
use crate::error::{GestureError, Result};

/// Length of a flattened hand pose
pub const POSE_LEN: usize = LANDMARK_COUNT * COORDS_PER_LANDMARK;

/// Flattened hand pose. Always exactly [`POSE_LEN`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Pose(Vec<f32>);

impl Pose {
    /// Wrap an already-flattened vector, rejecting the wrong length
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if values.len() != POSE_LEN {
            return Err(GestureError::InvalidPose {
                expected: POSE_LEN,
                actual: values.len(),
            });
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }

    /// Landmark at `index`, or None past the last one
    pub fn landmark(&self, index: usize) -> Option<Landmark> {
        if index >= LANDMARK_COUNT {
            return None;
        }
        let base = index * COORDS_PER_LANDMARK;
        Some(Landmark::new(self.0[base], self.0[base + 1], self.0[base + 2]))
    }
}

impl TryFrom<Vec<f32>> for Pose {
    type Error = GestureError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        Pose::new(values)
    }
}

impl From<Pose> for Vec<f32> {
    fn from(pose: Pose) -> Self {
        pose.0
    }
}

/// Flatten one hand's landmarks into a pose
pub fn extract(landmarks: &[Landmark]) -> Result<Pose> {
    if landmarks.len() != LANDMARK_COUNT {
        return Err(GestureError::InvalidPose {
            expected: LANDMARK_COUNT,
            actual: landmarks.len(),
        });
    }

    let values = landmarks
        .iter()
        .flat_map(|lm| [lm.x, lm.y, lm.z])
        .collect();

    Ok(Pose(values))
}

/// Split the detector's flat output (`num_hands` x 63 floats) into poses
///
/// Zero hands is the normal empty case and yields an empty list.
pub fn hands_from_flat(flat: &[f32], num_hands: usize) -> Result<Vec<Pose>> {
    let needed = num_hands.checked_mul(POSE_LEN).ok_or(GestureError::InvalidPose {
        expected: usize::MAX,
        actual: flat.len(),
    })?;
    if flat.len() < needed {
        return Err(GestureError::InvalidPose {
            expected: needed,
            actual: flat.len(),
        });
    }

    let poses: Vec<Pose> = flat[..needed]
        .chunks_exact(POSE_LEN)
        .map(|chunk| Pose(chunk.to_vec()))
        .collect();

    trace!(hands = poses.len(), "parsed detector output");
    Ok(poses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{INDEX_TIP, WRIST};

    fn numbered_landmarks() -> Vec<Landmark> {
        (0..LANDMARK_COUNT)
            .map(|i| {
                let base = (i * 3) as f32;
                Landmark::new(base, base + 1.0, base + 2.0)
            })
            .collect()
    }

    #[test]
    fn test_extract_order() {
        let pose = extract(&numbered_landmarks()).unwrap();
        assert_eq!(pose.as_slice().len(), POSE_LEN);
        for (i, v) in pose.as_slice().iter().enumerate() {
            assert_eq!(*v, i as f32);
        }
    }

    #[test]
    fn test_extract_rejects_short_hand() {
        let landmarks = vec![Landmark::default(); 20];
        let err = extract(&landmarks).unwrap_err();
        assert!(matches!(err, GestureError::InvalidPose { expected: 21, actual: 20 }));
    }

    #[test]
    fn test_landmark_lookup() {
        let pose = extract(&numbered_landmarks()).unwrap();
        assert_eq!(pose.landmark(WRIST), Some(Landmark::new(0.0, 1.0, 2.0)));
        assert_eq!(pose.landmark(INDEX_TIP), Some(Landmark::new(24.0, 25.0, 26.0)));
        assert_eq!(pose.landmark(LANDMARK_COUNT), None);
    }

    #[test]
    fn test_hands_from_flat() {
        let flat: Vec<f32> = (0..POSE_LEN * 2).map(|i| i as f32).collect();
        let hands = hands_from_flat(&flat, 2).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[1].as_slice()[0], POSE_LEN as f32);
    }

    #[test]
    fn test_hands_from_flat_no_hands() {
        assert!(hands_from_flat(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_hands_from_flat_truncated() {
        let flat = vec![0.0; POSE_LEN + 3];
        assert!(hands_from_flat(&flat, 2).is_err());
    }

    #[test]
    fn test_hands_from_flat_huge_count() {
        let flat = vec![0.0; POSE_LEN];
        let err = hands_from_flat(&flat, usize::MAX / 2 + 1).unwrap_err();
        assert!(matches!(err, GestureError::InvalidPose { actual: POSE_LEN, .. }));
    }

    #[test]
    fn test_pose_json_rejects_wrong_length() {
        assert!(serde_json::from_str::<Pose>("[0.1, 0.2]").is_err());
    }
}
