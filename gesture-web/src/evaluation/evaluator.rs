//! Full-dataset evaluation
//!
//! Replays every sample, not only the held-out test split. Samples the
//! model trained on are included, so the reported accuracy is optimistic.

use tracing::{info, warn};

use super::confusion::ConfusionMatrix;
use super::running::RunningAccuracy;
use crate::classifier::Classifier;
use crate::dataset::Dataset;
use crate::error::{GestureError, Result};

/// One evaluated sample, as reported to a progress callback
#[derive(Clone, Debug, PartialEq)]
pub struct EvalStep<'a> {
    pub index: usize,
    pub true_label: &'a str,
    pub predicted_label: &'a str,
    pub running_accuracy: f64,
}

#[derive(Clone, Debug)]
pub struct EvaluationReport {
    pub matrix: ConfusionMatrix,
    /// Accuracy recomputed from the finished matrix. NaN for an empty dataset.
    pub accuracy: f64,
    pub running: RunningAccuracy,
}

/// Evaluate `classifier` over every sample of `dataset`
pub async fn evaluate<C>(dataset: &Dataset, classifier: &C) -> Result<EvaluationReport>
where
    C: Classifier + ?Sized,
{
    evaluate_with_progress(dataset, classifier, |_| {}).await
}

/// Same as [`evaluate`], calling `on_step` after each sample
pub async fn evaluate_with_progress<C, F>(
    dataset: &Dataset,
    classifier: &C,
    mut on_step: F,
) -> Result<EvaluationReport>
where
    C: Classifier + ?Sized,
    F: FnMut(&EvalStep<'_>),
{
    let mut matrix = ConfusionMatrix::new(dataset.unique_labels());
    let mut running = RunningAccuracy::new();

    if !dataset.is_empty() && !classifier.is_ready() {
        return Err(GestureError::ClassifierNotReady);
    }

    for (index, sample) in dataset.iter().enumerate() {
        let prediction = classifier.classify(&sample.pose).await?;
        let Some(predicted) = prediction.top_label() else {
            warn!(index, "classifier returned no labels, sample skipped");
            continue;
        };

        matrix.record(&sample.label, predicted);
        let running_accuracy = running.record(predicted == sample.label);

        on_step(&EvalStep {
            index,
            true_label: &sample.label,
            predicted_label: predicted,
            running_accuracy,
        });
    }

    let accuracy = matrix.accuracy();
    info!(
        samples = dataset.len(),
        correct = matrix.correct(),
        accuracy,
        "evaluation finished"
    );

    Ok(EvaluationReport {
        matrix,
        accuracy,
        running,
    })
}
