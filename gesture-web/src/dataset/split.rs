//! Shuffle and train/test split
//!
//! The test half starts one element past the cut, so the sample sitting
//! exactly at `floor(len * train_fraction)` lands in neither half.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::sample::{Dataset, Sample};

/// Disjoint train/test halves of a shuffled dataset
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Split {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
}

/// Uniform random permutation of the samples, in place
pub fn shuffle<R: Rng + ?Sized>(dataset: &mut Dataset, rng: &mut R) {
    dataset.samples_mut().shuffle(rng);
}

/// Shuffle a copy of `dataset` and cut it at `floor(len * train_fraction)`
///
/// Train is `[0, cut)`, test is `[cut + 1, len)`.
pub fn shuffle_and_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    train_fraction: f64,
    rng: &mut R,
) -> Split {
    let mut samples = dataset.samples().to_vec();
    samples.shuffle(rng);

    let len = samples.len();
    let cut = ((len as f64 * train_fraction).floor() as usize).min(len);
    let test_start = (cut + 1).min(len);

    let test = samples.split_off(test_start);
    samples.truncate(cut);

    debug!(train = samples.len(), test = test.len(), total = len, "dataset split");

    Split {
        train: samples,
        test,
    }
}
