//! CSV and metadata export
//!
//! The CSV format is the one offered for download by the dashboard: a
//! header row in `COLUMNS` order, one row per sample, `\n` separated with
//! no trailing newline. Cells are written as-is. A value that itself
//! contains a comma will shift the columns of its row.

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use super::store::DatasetStore;
use crate::error::{DatasetError, Result};
use crate::types::{Sample, COLUMNS};

/// MIME type of the CSV download
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Render samples as CSV text
pub fn samples_to_csv(samples: &[Sample]) -> String {
    let mut lines = Vec::with_capacity(samples.len() + 1);
    lines.push(COLUMNS.join(","));
    for sample in samples {
        lines.push(sample.csv_fields().join(","));
    }
    lines.join("\n")
}

/// Download file name for a given export date
pub fn csv_filename(date: NaiveDate) -> String {
    format!("medication-dataset-{}.csv", date.format("%Y-%m-%d"))
}

impl DatasetStore {
    /// Render the whole dataset as CSV text
    pub fn to_csv(&self) -> String {
        samples_to_csv(self.samples())
    }

    /// Pretty-printed JSON of the dataset metadata
    pub fn export_metadata(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.metadata())?)
    }

    /// Write the CSV download file into `dir`, named after today's date.
    ///
    /// Returns the path written.
    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|source| DatasetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(csv_filename(Utc::now().date_naive()));
        std::fs::write(&path, self.to_csv()).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Exported {} samples to {}", self.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Feedback, SampleDraft};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_store_exports_header_only() {
        let store = DatasetStore::new();
        let csv = store.to_csv();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("patient_id,age,sex,weight"));
        assert!(csv.ends_with("feedback,timestamp"));
    }

    #[test]
    fn test_line_count_matches_total() {
        let mut store = DatasetStore::new();
        store.seed_with(&mut StdRng::seed_from_u64(5)).unwrap();
        store.append(SampleDraft::new().diagnosis("Fibromialgia"));

        let csv = store.to_csv();
        assert_eq!(csv.lines().count(), 1 + store.stats().total_samples);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_hand_authored_row() {
        let mut store = DatasetStore::new();
        store.seed_with(&mut StdRng::seed_from_u64(5)).unwrap();
        let csv = store.to_csv();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "P001,45,M,80,175,140,90,110,36.8,75,98,\
             0,0,1,0,0,0,0,0,0,1,0,0,0,0,\
             0,1,0,0,0,0,0,0,\
             Hipertensión,Enalapril,0.89,original,2024-01-15T10:30:00Z"
        );
    }

    #[test]
    fn test_flags_render_as_digits() {
        let mut store = DatasetStore::new();
        let mut draft = SampleDraft::new().patient_id("X");
        draft.set_flag("rash", true).unwrap();
        let sample = store.append(draft);

        let csv = store.to_csv();
        let cells: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        for (i, column) in COLUMNS.iter().enumerate() {
            if let Some(flag) = sample.flag(column) {
                assert_eq!(cells[i], if flag { "1" } else { "0" }, "column {}", column);
            }
        }
    }

    #[test]
    fn test_unset_feedback_is_empty_cell() {
        let mut sample = SampleDraft::new().patient_id("X").complete();
        sample.feedback = None;
        let csv = samples_to_csv(&[sample]);
        let cells: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(cells[36], "");

        let mut positive = SampleDraft::new().complete();
        positive.feedback = Some(Feedback::Positive);
        assert!(samples_to_csv(&[positive]).contains(",positive,"));
    }

    #[test]
    fn test_csv_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(csv_filename(date), "medication-dataset-2024-03-09.csv");
    }

    #[test]
    fn test_export_metadata_json() {
        let store = DatasetStore::new();
        let json = store.export_metadata().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["totalSamples"], 0);
        assert_eq!(value["columns"].as_array().unwrap().len(), 38);
        assert_eq!(value["diagnoses"][0], "Hipertensión");
    }

    #[test]
    fn test_write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DatasetStore::new();
        store.seed_with(&mut StdRng::seed_from_u64(9)).unwrap();

        let path = store.write_csv(dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("medication-dataset-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), store.to_csv());
    }
}
