//! Dataset Store - in-memory clinical sample collection
//!
//! Holds the ordered samples of one session together with the derived
//! metadata: sample counters and the catalogs of known diagnoses and
//! medications. Nothing here is persisted; a new process starts from a
//! freshly seeded dataset.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::seed::{self, DIAGNOSES, MEDICATIONS};
use crate::error::{DatasetError, Result};
use crate::types::{Sample, SampleDraft, COLUMNS};

pub const DATASET_VERSION: &str = "1.0.0";

/// Derived description of the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub version: String,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub total_samples: usize,
    pub original_samples: usize,
    pub learned_samples: usize,
    pub columns: Vec<String>,
    /// Known diagnoses in first-seen order. Only ever grows.
    pub diagnoses: Vec<String>,
    /// Known medications in first-seen order. Only ever grows.
    pub medications: Vec<String>,
}

impl Default for DatasetMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            version: DATASET_VERSION.to_string(),
            created: now,
            last_updated: now,
            total_samples: 0,
            original_samples: 0,
            learned_samples: 0,
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            diagnoses: DIAGNOSES.iter().map(|d| d.to_string()).collect(),
            medications: MEDICATIONS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Aggregate counters shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_samples: usize,
    pub original_samples: usize,
    pub learned_samples: usize,
    pub diagnoses: usize,
    pub medications: usize,
    pub last_updated: DateTime<Utc>,
}

/// Provenance filter used by the dataset viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFilter {
    #[default]
    All,
    /// Samples added through positive feedback
    Learned,
    /// Everything else, including samples without feedback
    Original,
}

impl SampleFilter {
    pub fn matches(self, sample: &Sample) -> bool {
        match self {
            SampleFilter::All => true,
            SampleFilter::Learned => sample.is_learned(),
            SampleFilter::Original => !sample.is_learned(),
        }
    }
}

impl std::str::FromStr for SampleFilter {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SampleFilter::All),
            "learned" => Ok(SampleFilter::Learned),
            "original" => Ok(SampleFilter::Original),
            other => Err(DatasetError::UnknownFilter(other.to_string())),
        }
    }
}

impl std::fmt::Display for SampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleFilter::All => write!(f, "all"),
            SampleFilter::Learned => write!(f, "learned"),
            SampleFilter::Original => write!(f, "original"),
        }
    }
}

/// In-memory sample store
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    samples: Vec<Sample>,
    metadata: DatasetMetadata,
}

impl DatasetStore {
    /// Create an empty store with the default catalogs
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with a freshly generated initial dataset.
    ///
    /// Counters are reset to describe only the seeded samples. The catalogs
    /// keep every entry they already had.
    pub fn seed_with<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let samples = seed::seed_samples(rng, &self.metadata.diagnoses, &self.metadata.medications)?;

        self.samples = samples;
        self.metadata.total_samples = self.samples.len();
        self.metadata.original_samples = self.samples.len();
        self.metadata.learned_samples = 0;
        self.metadata.last_updated = Utc::now();

        info!("Seeded dataset with {} samples", self.samples.len());
        Ok(())
    }

    /// Seed using the thread-local generator
    pub fn seed(&mut self) -> Result<()> {
        self.seed_with(&mut rand::rng())
    }

    /// Seed at startup, reporting success as a flag
    pub fn load_initial(&mut self) -> bool {
        self.load_initial_with(&mut rand::rng())
    }

    /// Same as `load_initial` with a caller-supplied generator
    pub fn load_initial_with<R: Rng>(&mut self, rng: &mut R) -> bool {
        match self.seed_with(rng) {
            Ok(()) => true,
            Err(e) => {
                error!("Error loading dataset: {}", e);
                false
            }
        }
    }

    /// Complete a partial sample, store it and return the stored record.
    ///
    /// Every append counts as a learned sample. Non-empty diagnosis and
    /// medication values not seen before are added to the catalogs.
    pub fn append(&mut self, draft: SampleDraft) -> Sample {
        let sample = draft.complete();

        self.samples.push(sample.clone());
        self.metadata.total_samples = self.samples.len();
        self.metadata.learned_samples += 1;
        self.metadata.last_updated = Utc::now();

        if !sample.diagnosis.is_empty() && !self.has_diagnosis(&sample.diagnosis) {
            debug!("New diagnosis learned: {}", sample.diagnosis);
            self.metadata.diagnoses.push(sample.diagnosis.clone());
        }
        if !sample.recommended_medication.is_empty()
            && !self.has_medication(&sample.recommended_medication)
        {
            debug!("New medication learned: {}", sample.recommended_medication);
            self.metadata.medications.push(sample.recommended_medication.clone());
        }

        info!(
            "Appended sample {} ({} -> {}), total {}",
            sample.patient_id, sample.diagnosis, sample.recommended_medication, self.metadata.total_samples
        );
        sample
    }

    /// Snapshot of all samples in insertion order
    pub fn list(&self) -> Vec<Sample> {
        self.samples.clone()
    }

    /// Borrowed view of all samples in insertion order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            total_samples: self.metadata.total_samples,
            original_samples: self.metadata.original_samples,
            learned_samples: self.metadata.learned_samples,
            diagnoses: self.metadata.diagnoses.len(),
            medications: self.metadata.medications.len(),
            last_updated: self.metadata.last_updated,
        }
    }

    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    pub fn has_diagnosis(&self, diagnosis: &str) -> bool {
        self.metadata.diagnoses.iter().any(|d| d == diagnosis)
    }

    pub fn has_medication(&self, medication: &str) -> bool {
        self.metadata.medications.iter().any(|m| m == medication)
    }

    /// Case-insensitive match on patient id, diagnosis or medication
    pub fn search(&self, term: &str) -> Vec<&Sample> {
        self.query(Some(term), SampleFilter::All)
    }

    pub fn filter(&self, filter: SampleFilter) -> Vec<&Sample> {
        self.query(None, filter)
    }

    /// Search term and provenance filter combined, as the dataset viewer applies them
    pub fn query(&self, term: Option<&str>, filter: SampleFilter) -> Vec<&Sample> {
        let term = term.filter(|t| !t.is_empty()).map(|t| t.to_lowercase());

        self.samples
            .iter()
            .filter(|s| match &term {
                Some(t) => {
                    s.patient_id.to_lowercase().contains(t)
                        || s.diagnosis.to_lowercase().contains(t)
                        || s.recommended_medication.to_lowercase().contains(t)
                }
                None => true,
            })
            .filter(|s| filter.matches(s))
            .collect()
    }
}
