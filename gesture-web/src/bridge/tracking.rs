//! Tracking loop entry points
//!
//! JS runs the MediaPipe hand detector on each video frame and hands the
//! flattened landmarks here. The session lives in a thread_local; it is never
//! borrowed across the classifier await.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use super::classifier_integration::ready_classifier;
use super::presentation;
use super::training;
use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::gesture::GestureEngine;
use crate::pose::hands_from_flat;
use crate::session::{FrameOutcome, FrameReport, SessionState};

#[derive(Default)]
struct Tracking {
    session: SessionState,
    engine: GestureEngine,
}

thread_local! {
    static TRACKING: RefCell<Tracking> = RefCell::new(Tracking::default());
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

pub fn apply_config(config: &AppConfig) {
    TRACKING.with(|t| t.borrow_mut().engine = GestureEngine::from_config(config));
}

/// Start/Stop Tracking button. Returns whether tracking is now on.
#[wasm_bindgen]
pub fn toggle_tracking(detector_ready: bool, media_available: bool) -> Result<bool, JsValue> {
    let on = TRACKING.with(|t| t.borrow_mut().session.toggle_tracking(detector_ready, media_available))?;
    Ok(on)
}

/// Start/Stop Training button. An empty label leaves capture off.
#[wasm_bindgen]
pub fn toggle_training(label: &str) -> bool {
    TRACKING.with(|t| t.borrow_mut().session.capture.toggle(label))
}

#[wasm_bindgen]
pub fn is_tracking() -> bool {
    TRACKING.with(|t| t.borrow().session.is_tracking())
}

/// Process one detector result and return a JSON `FrameReport`
///
/// `flat` holds `num_hands * 63` values (x, y, z per landmark); zero hands
/// is an ordinary frame.
#[wasm_bindgen]
pub async fn process_hand_landmarks(
    flat: Vec<f32>,
    num_hands: usize,
    frame_time: f64,
) -> Result<String, JsValue> {
    let poses = hands_from_flat(&flat, num_hands)?;

    let begun = TRACKING.with(|t| t.borrow_mut().session.begin_frame(frame_time, &poses));
    let Some(mut outcome) = begun else {
        return Ok(FrameReport::new(&FrameOutcome::default(), &poses, None).to_json()?);
    };

    if !poses.is_empty() {
        outcome.recorded = TRACKING.with(|t| training::record_poses(&t.borrow().session, &poses))?;

        if let Some(nn) = ready_classifier() {
            for pose in &poses {
                let prediction = nn.classify(pose).await?;
                TRACKING.with(|t| {
                    let mut guard = t.borrow_mut();
                    let tracking = &mut *guard;
                    tracking
                        .session
                        .record_prediction(&tracking.engine, prediction, &mut outcome)
                });
            }
        }
    }

    let deck = presentation::current_deck();
    Ok(FrameReport::new(&outcome, &poses, deck.as_ref()).to_json()?)
}
