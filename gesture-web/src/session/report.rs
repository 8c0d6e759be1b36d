//! Per-frame report handed back to the page as JSON

use serde::Serialize;

use super::state::FrameOutcome;
use crate::error::Result;
use crate::gesture::Decision;
use crate::pose::{Pose, INDEX_TIP};
use crate::presentation::SlideDeck;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecisionReport {
    pub label: Option<String>,
    pub action: &'static str,
    pub hint: &'static str,
}

impl From<&Decision> for DecisionReport {
    fn from(decision: &Decision) -> Self {
        Self {
            label: decision.label.clone(),
            action: decision.action.as_str(),
            hint: decision.hint.as_str(),
        }
    }
}

/// Everything the page redraws after a frame
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub accepted: bool,
    pub hands: usize,
    pub recorded: usize,
    pub predictions: Vec<String>,
    pub decisions: Vec<DecisionReport>,
    pub slide: u32,
    /// Set only when a decision advanced the deck and a deck is linked
    pub embed_url: Option<String>,
    /// Index fingertip of the first hand, normalized
    pub pointer: Option<(f32, f32)>,
}

impl FrameReport {
    pub fn new(outcome: &FrameOutcome, poses: &[Pose], deck: Option<&SlideDeck>) -> Self {
        let embed_url = if outcome.advanced() {
            deck.map(|deck| deck.embed_url(outcome.slide))
        } else {
            None
        };
        Self {
            accepted: outcome.accepted,
            hands: outcome.hands,
            recorded: outcome.recorded,
            predictions: outcome.predictions.clone(),
            decisions: outcome.decisions.iter().map(DecisionReport::from).collect(),
            slide: outcome.slide,
            embed_url,
            pointer: if outcome.accepted { pointer(poses) } else { None },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn pointer(poses: &[Pose]) -> Option<(f32, f32)> {
    poses
        .first()
        .and_then(|pose| pose.landmark(INDEX_TIP))
        .map(|tip| (tip.x, tip.y))
}
