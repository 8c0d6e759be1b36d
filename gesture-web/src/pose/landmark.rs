//! Hand landmark layout (MediaPipe Hands - 21 total)

use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per detected hand
pub const LANDMARK_COUNT: usize = 21;

/// x, y, z
pub const COORDS_PER_LANDMARK: usize = 3;

// ============================================================================
// DATA STRUCTURE
// ============================================================================

/// A single 3D hand keypoint as reported by the detector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,  // 0-1 normalized
    pub y: f32,  // 0-1 normalized
    pub z: f32,  // Relative depth
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Pixel position on a canvas of the given size
    pub fn to_pixel(&self, width: f32, height: f32) -> (f32, f32) {
        (self.x * width, self.y * height)
    }
}
