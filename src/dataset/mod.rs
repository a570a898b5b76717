//! Clinical sample dataset
//!
//! - `store`: the in-memory sample collection and its metadata
//! - `seed`: the initial hand-authored and generated samples
//! - `export`: CSV and metadata rendering
//! - `shared`: lock-guarded handle for concurrent callers

pub mod store;
pub mod seed;
pub mod export;
pub mod shared;

pub use store::{DatasetStore, DatasetMetadata, DatasetStats, SampleFilter};
pub use export::{csv_filename, samples_to_csv, CSV_MIME};
pub use shared::SharedDataset;
