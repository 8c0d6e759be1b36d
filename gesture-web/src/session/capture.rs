//! Training capture - label every processed frame while active

use tracing::info;

use crate::error::{GestureError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingCapture {
    label: Option<String>,
}

impl TrainingCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin labeling frames. Refuses an empty label and stays off.
    pub fn start(&mut self, label: &str) -> Result<()> {
        if label.trim().is_empty() {
            return Err(GestureError::EmptyLabel);
        }
        info!(label, "training capture started");
        self.label = Some(label.to_string());
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(label) = self.label.take() {
            info!(label = %label, "training capture stopped");
        }
    }

    /// Start/Stop Training button: returns whether capture is now on
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.is_active() {
            self.stop();
        } else if self.start(label).is_err() {
            return false;
        }
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.label.is_some()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_refused() {
        let mut capture = TrainingCapture::new();
        assert!(matches!(capture.start("  "), Err(GestureError::EmptyLabel)));
        assert!(!capture.toggle(""));
        assert!(!capture.is_active());
    }

    #[test]
    fn test_toggle() {
        let mut capture = TrainingCapture::new();
        assert!(capture.toggle("okay"));
        assert_eq!(capture.label(), Some("okay"));
        assert!(!capture.toggle("ignored"));
        assert_eq!(capture.label(), None);
    }
}
