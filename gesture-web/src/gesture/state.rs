//! Gesture state - what the engine has seen so far this session

/// Mutated only through [`super::GestureEngine::decide`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureState {
    /// Top label of the most recent prediction
    pub current_label: Option<String>,

    /// Label of the last transition (the debounce reference)
    pub last_label: Option<String>,

    /// Slide currently shown. Only ever increases.
    pub current_slide: u32,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known previous label (e.g. resuming a session)
    pub fn with_last_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            current_label: Some(label.clone()),
            last_label: Some(label),
            current_slide: 0,
        }
    }
}
