//! Dataset module - labeled poses for training and evaluation
//!
//! Re-exports only. All logic in submodules.

mod manager;
mod sample;
mod split;
mod store;

pub use manager::{DatasetManager, SplitSummary};
pub use sample::{load_json, unique_labels, Dataset, Sample};
pub use split::{shuffle, shuffle_and_split, Split};
pub use store::{KeyValueStore, LocalStorageStore, MemoryStore};
