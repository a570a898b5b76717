//! Med Dataset - clinical sample store for the medication recommendation demo
//!
//! Provides:
//! - An in-memory dataset of clinical observations seeded with 100 samples
//! - Incremental metadata: sample counters, known diagnoses and medications
//! - Feedback learning that turns confirmed recommendations into samples
//! - CSV export in the dashboard's download format
//!
//! # Example
//!
//! ```no_run
//! use med_dataset::{DatasetStore, SampleDraft};
//!
//! let mut store = DatasetStore::new();
//! assert!(store.load_initial());
//! store.append(SampleDraft::new().diagnosis("Fibromialgia").medication("Pregabalina"));
//! assert_eq!(store.stats().total_samples, 101);
//! println!("{}", store.to_csv());
//! ```

pub mod types;
pub mod error;
pub mod dataset;
pub mod learning;
pub mod config;
pub mod cli;

pub use types::{Feedback, Sample, SampleDraft, COLUMNS};
pub use error::DatasetError;
pub use dataset::{DatasetMetadata, DatasetStats, DatasetStore, SampleFilter, SharedDataset};
pub use learning::{apply_feedback, FeedbackEvent, LearningOutcome, Prediction, Verdict};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Clinical sample dataset", NAME, VERSION)
}
