//! Session state - one per open page, reset only by reloading
//!
//! Frame pipeline: begin_frame -> capture_poses -> classify -> record_prediction.
//! Each step is synchronous except classification, so the browser bridge
//! can await the classifier between steps without holding a borrow.

use tracing::{debug, warn};

use super::capture::TrainingCapture;
use super::frame_gate::FrameGate;
use crate::classifier::{Classifier, Prediction};
use crate::dataset::{DatasetManager, KeyValueStore, Sample};
use crate::error::{GestureError, Result};
use crate::gesture::{Decision, GestureAction, GestureEngine, GestureState};
use crate::pose::Pose;

/// What happened to one offered frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// False when the frame was a repeat or tracking is off
    pub accepted: bool,
    pub hands: usize,
    /// Samples recorded by training capture
    pub recorded: usize,
    /// Ranked `label: confidence` lines of the last classified hand
    pub predictions: Vec<String>,
    pub decisions: Vec<Decision>,
    /// Slide shown after this frame
    pub slide: u32,
}

impl FrameOutcome {
    /// Some decision on this frame moved the deck forward
    pub fn advanced(&self) -> bool {
        self.decisions
            .iter()
            .any(|d| d.action == GestureAction::AdvanceSlide)
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub gesture: GestureState,
    pub frame_gate: FrameGate,
    pub capture: TrainingCapture,
    tracking: bool,
    last_prediction: Option<Prediction>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Start/Stop Tracking button
    ///
    /// Ignored (with a log line) until the detector has loaded. Turning on
    /// without camera support fails once with `MediaUnavailable`.
    pub fn toggle_tracking(&mut self, detector_ready: bool, media_available: bool) -> Result<bool> {
        if !detector_ready {
            warn!("hand detector not loaded yet, tracking unchanged");
            return Ok(self.tracking);
        }
        if self.tracking {
            self.stop_tracking();
            return Ok(false);
        }
        if !media_available {
            return Err(GestureError::MediaUnavailable(
                "getUserMedia() is not supported by this browser".to_string(),
            ));
        }
        self.tracking = true;
        debug!("tracking started");
        Ok(true)
    }

    pub fn stop_tracking(&mut self) {
        self.tracking = false;
        debug!("tracking stopped");
    }

    /// Tracking is on and `stamp` is a frame we have not processed
    pub fn accept_frame(&mut self, stamp: f64) -> bool {
        self.tracking && self.frame_gate.is_new_frame(stamp)
    }

    /// Record every pose under the capture label, if capture is on
    pub fn capture_poses<S: KeyValueStore>(
        &self,
        poses: &[Pose],
        manager: &mut DatasetManager<S>,
    ) -> Result<usize> {
        let Some(label) = self.capture.label() else {
            return Ok(0);
        };
        for pose in poses {
            manager.record(Sample::new(pose.clone(), label))?;
        }
        Ok(poses.len())
    }

    /// Feed one classified pose to the gesture engine
    ///
    /// A result arriving after tracking stopped is dropped.
    pub fn apply_prediction(&mut self, engine: &GestureEngine, prediction: Prediction) -> Option<Decision> {
        if !self.tracking {
            return None;
        }
        let (decision, next) = engine.decide(&prediction, std::mem::take(&mut self.gesture));
        self.gesture = next;
        self.last_prediction = Some(prediction);
        Some(decision)
    }

    /// Open a frame: None when the frame is a repeat or tracking is off
    pub fn begin_frame(&mut self, stamp: f64, poses: &[Pose]) -> Option<FrameOutcome> {
        if !self.accept_frame(stamp) {
            return None;
        }
        Some(FrameOutcome {
            accepted: true,
            hands: poses.len(),
            slide: self.gesture.current_slide,
            ..FrameOutcome::default()
        })
    }

    /// Fold one hand's prediction into the frame being processed
    pub fn record_prediction(&mut self, engine: &GestureEngine, prediction: Prediction, outcome: &mut FrameOutcome) {
        outcome.predictions = prediction.display_lines();
        if let Some(decision) = self.apply_prediction(engine, prediction) {
            outcome.decisions.push(decision);
        }
        outcome.slide = self.gesture.current_slide;
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Whole per-frame pipeline for callers that own every piece
    ///
    /// Zero hands is a normal frame with nothing to do. Classification is
    /// skipped until the classifier reports ready.
    pub async fn process_frame<C, S>(
        &mut self,
        stamp: f64,
        poses: &[Pose],
        classifier: &C,
        engine: &GestureEngine,
        manager: &mut DatasetManager<S>,
    ) -> Result<FrameOutcome>
    where
        C: Classifier + ?Sized,
        S: KeyValueStore,
    {
        let Some(mut outcome) = self.begin_frame(stamp, poses) else {
            return Ok(FrameOutcome::default());
        };
        if poses.is_empty() {
            return Ok(outcome);
        }

        outcome.recorded = self.capture_poses(poses, manager)?;

        if !classifier.is_ready() {
            return Ok(outcome);
        }
        for pose in poses {
            let prediction = classifier.classify(pose).await?;
            self.record_prediction(engine, prediction, &mut outcome);
        }
        Ok(outcome)
    }
}
