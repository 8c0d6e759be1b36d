//! Running accuracy over a stream of predictions

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunningAccuracy {
    correct: u32,
    total: u32,
}

impl RunningAccuracy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one prediction and return the updated accuracy
    pub fn record(&mut self, correct: bool) -> f64 {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
        self.accuracy()
    }

    /// NaN until something has been counted
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        self.correct as f64 / self.total as f64
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_nan() {
        assert!(RunningAccuracy::new().accuracy().is_nan());
    }

    #[test]
    fn test_incremental() {
        let mut acc = RunningAccuracy::new();
        assert_eq!(acc.record(true), 1.0);
        assert_eq!(acc.record(false), 0.5);
        assert_eq!(acc.total(), 2);
        acc.reset();
        assert_eq!(acc.total(), 0);
    }
}
