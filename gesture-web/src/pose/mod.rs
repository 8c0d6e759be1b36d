//! Pose module - hand landmarks to classifier features
//!
//! Re-exports only. All logic in submodules.

mod extract;
mod landmark;

pub use extract::{extract, hands_from_flat, Pose, POSE_LEN};
pub use landmark::{
    Landmark, COORDS_PER_LANDMARK, LANDMARK_COUNT,
    WRIST, THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP,
    INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP,
    MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP,
    RING_MCP, RING_PIP, RING_DIP, RING_TIP,
    PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP,
};
