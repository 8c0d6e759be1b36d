//! New-frame predicate
//!
//! The page may call in more often than the camera produces frames. A frame
//! is processed only when its stamp differs from the last accepted one; any
//! monotonic source works (video `currentTime`, a frame counter).

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameGate {
    last_stamp: Option<f64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True (and remembered) if `stamp` has not been seen yet
    pub fn is_new_frame(&mut self, stamp: f64) -> bool {
        if self.last_stamp == Some(stamp) {
            return false;
        }
        self.last_stamp = Some(stamp);
        true
    }

    pub fn reset(&mut self) {
        self.last_stamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_stamp_skipped() {
        let mut gate = FrameGate::new();
        assert!(gate.is_new_frame(0.033));
        assert!(!gate.is_new_frame(0.033));
        assert!(gate.is_new_frame(0.066));
    }

    #[test]
    fn test_reset_accepts_again() {
        let mut gate = FrameGate::new();
        assert!(gate.is_new_frame(1.0));
        gate.reset();
        assert!(gate.is_new_frame(1.0));
    }
}
