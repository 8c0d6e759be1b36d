//! Confusion matrix - true label vs predicted label counts

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

/// How a table cell should be highlighted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Diagonal
    Correct,
    /// Off-diagonal with a non-zero count
    Error,
    /// Off-diagonal, zero
    Empty,
}

/// Counts keyed by (true, predicted), all axes initialized to 0
///
/// Cells only ever increase during one evaluation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<Vec<u32>>,
}

impl ConfusionMatrix {
    /// Square zero matrix over `labels` (duplicates ignored, order kept)
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut matrix = Self::default();
        for label in labels {
            matrix.ensure_label(&label.into());
        }
        matrix
    }

    fn ensure_label(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        for row in &mut self.counts {
            row.push(0);
        }
        self.counts.push(vec![0; idx + 1]);
        idx
    }

    /// Count one prediction
    ///
    /// A label outside the axes (the model knows a class the dataset does
    /// not) grows both axes instead of being dropped.
    pub fn record(&mut self, true_label: &str, predicted_label: &str) {
        for label in [true_label, predicted_label] {
            if !self.index.contains_key(label) {
                warn!(label, "label missing from confusion axes, adding it");
            }
        }
        let t = self.ensure_label(true_label);
        let p = self.ensure_label(predicted_label);
        self.counts[t][p] += 1;
    }

    pub fn get(&self, true_label: &str, predicted_label: &str) -> u32 {
        match (self.index.get(true_label), self.index.get(predicted_label)) {
            (Some(&t), Some(&p)) => self.counts[t][p],
            _ => 0,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rows in label order
    pub fn counts(&self) -> &[Vec<u32>] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal
    pub fn correct(&self) -> u32 {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// correct / total, NaN when nothing was counted
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return f64::NAN;
        }
        self.correct() as f64 / total as f64
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        if row == col {
            CellKind::Correct
        } else if self.counts[row][col] != 0 {
            CellKind::Error
        } else {
            CellKind::Empty
        }
    }

    /// Render-ready snapshot for the results table
    pub fn table(&self) -> ConfusionTable {
        let n = self.labels.len();
        ConfusionTable {
            labels: self.labels.clone(),
            counts: self.counts.clone(),
            kinds: (0..n)
                .map(|r| (0..n).map(|c| self.cell_kind(r, c)).collect())
                .collect(),
            accuracy: {
                let a = self.accuracy();
                if a.is_nan() { None } else { Some(a) }
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfusionTable {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<u32>>,
    pub kinds: Vec<Vec<CellKind>>,
    /// None when no prediction was counted
    pub accuracy: Option<f64>,
}
