//! Gesture decisions with label-transition debouncing
//!
//! Frames arrive tens of times per second and a held gesture re-affirms the
//! same label on every one of them. An action fires only when the top label
//! differs from the last one seen.

use tracing::debug;

use super::state::GestureState;
use crate::classifier::Prediction;
use crate::config::AppConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureAction {
    None,
    ShowHint,
    AdvanceSlide,
}

impl GestureAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureAction::None => "none",
            GestureAction::ShowHint => "show-hint",
            GestureAction::AdvanceSlide => "advance-slide",
        }
    }
}

/// Hint overlay visibility change that accompanies a decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintSignal {
    Unchanged,
    Show,
    Hide,
}

impl HintSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            HintSignal::Unchanged => "unchanged",
            HintSignal::Show => "show",
            HintSignal::Hide => "hide",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: GestureAction,
    pub hint: HintSignal,
    /// Top label this decision was made on
    pub label: Option<String>,
    /// True when the top label differed from the previous one
    pub transition: bool,
}

impl Decision {
    fn idle(label: Option<String>) -> Self {
        Self {
            action: GestureAction::None,
            hint: HintSignal::Unchanged,
            label,
            transition: false,
        }
    }
}

/// Maps label transitions to presentation actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureEngine {
    confirm_label: String,
    hint_label: String,
}

impl GestureEngine {
    pub fn new(confirm_label: impl Into<String>, hint_label: impl Into<String>) -> Self {
        Self {
            confirm_label: confirm_label.into(),
            hint_label: hint_label.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.confirm_label.clone(), config.hint_label.clone())
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn hint_label(&self) -> &str {
        &self.hint_label
    }

    /// Decide on one frame's prediction
    ///
    /// - same top label as last time: nothing
    /// - confirm label: advance one slide, hide hint
    /// - hint label: show hint
    /// - anything else: hide hint, but remember the label so the next
    ///   confirm/hint is seen as a transition
    pub fn decide(&self, prediction: &Prediction, mut state: GestureState) -> (Decision, GestureState) {
        let Some(top) = prediction.top_label() else {
            return (Decision::idle(None), state);
        };
        let top = top.to_string();
        state.current_label = Some(top.clone());

        if state.last_label.as_deref() == Some(top.as_str()) {
            return (Decision::idle(Some(top)), state);
        }

        let (action, hint) = if top == self.confirm_label {
            state.current_slide += 1;
            (GestureAction::AdvanceSlide, HintSignal::Hide)
        } else if top == self.hint_label {
            (GestureAction::ShowHint, HintSignal::Show)
        } else {
            (GestureAction::None, HintSignal::Hide)
        };

        debug!(
            from = state.last_label.as_deref().unwrap_or("-"),
            to = %top,
            action = action.as_str(),
            slide = state.current_slide,
            "gesture transition"
        );
        state.last_label = Some(top.clone());

        (
            Decision {
                action,
                hint,
                label: Some(top),
                transition: true,
            },
            state,
        )
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
