//! Shared record types
//!
//! `Sample` is the flat clinical-observation record held by the dataset.
//! `SampleDraft` is the partial form accepted on append; every unset field
//! is filled with a default when the draft is completed.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Dataset column order. Shared by the CSV header and the metadata block.
pub const COLUMNS: [&str; 38] = [
    "patient_id",
    "age",
    "sex",
    "weight",
    "height",
    "systolic_bp",
    "diastolic_bp",
    "glucose",
    "temperature",
    "heart_rate",
    "oxygen_saturation",
    "fever",
    "cough",
    "headache",
    "fatigue",
    "chest_pain",
    "breathing_difficulty",
    "abdominal_pain",
    "vomiting",
    "diarrhea",
    "dizziness",
    "blurred_vision",
    "muscle_pain",
    "rash",
    "swelling",
    "diabetes",
    "hypertension",
    "asthma",
    "copd",
    "kidney_disease",
    "drug_allergy",
    "penicillin_allergy",
    "nsaid_allergy",
    "diagnosis",
    "recommended_medication",
    "confidence",
    "feedback",
    "timestamp",
];

/// Symptom indicator names, in column order
pub const SYMPTOMS: [&str; 14] = [
    "fever",
    "cough",
    "headache",
    "fatigue",
    "chest_pain",
    "breathing_difficulty",
    "abdominal_pain",
    "vomiting",
    "diarrhea",
    "dizziness",
    "blurred_vision",
    "muscle_pain",
    "rash",
    "swelling",
];

/// Medical-history indicator names, in column order
pub const HISTORY: [&str; 8] = [
    "diabetes",
    "hypertension",
    "asthma",
    "copd",
    "kidney_disease",
    "drug_allergy",
    "penicillin_allergy",
    "nsaid_allergy",
];

pub const DEFAULT_SEX: &str = "M";
pub const DEFAULT_TEMPERATURE: f64 = 36.5;

/// Where a sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Part of the seeded dataset
    Original,
    /// Added after a user confirmed a recommendation
    Positive,
}

impl Feedback {
    pub fn as_str(self) -> &'static str {
        match self {
            Feedback::Original => "original",
            Feedback::Positive => "positive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "original" => Some(Feedback::Original),
            "positive" => Some(Feedback::Positive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One clinical observation bundled with its outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub patient_id: String,
    pub age: u32,
    pub sex: String,
    pub weight: f64,
    pub height: f64,
    pub systolic_bp: u32,
    pub diastolic_bp: u32,
    pub glucose: f64,
    pub temperature: f64,
    pub heart_rate: u32,
    pub oxygen_saturation: f64,
    // Symptoms
    pub fever: bool,
    pub cough: bool,
    pub headache: bool,
    pub fatigue: bool,
    pub chest_pain: bool,
    pub breathing_difficulty: bool,
    pub abdominal_pain: bool,
    pub vomiting: bool,
    pub diarrhea: bool,
    pub dizziness: bool,
    pub blurred_vision: bool,
    pub muscle_pain: bool,
    pub rash: bool,
    pub swelling: bool,
    // Medical history
    pub diabetes: bool,
    pub hypertension: bool,
    pub asthma: bool,
    pub copd: bool,
    pub kidney_disease: bool,
    pub drug_allergy: bool,
    pub penicillin_allergy: bool,
    pub nsaid_allergy: bool,
    // Outcome
    pub diagnosis: String,
    pub recommended_medication: String,
    pub confidence: f64,
    // Provenance
    pub feedback: Option<Feedback>,
    pub timestamp: String,
}

impl Sample {
    /// Whether this sample was added through feedback
    pub fn is_learned(&self) -> bool {
        self.feedback == Some(Feedback::Positive)
    }

    /// Read a symptom or history flag by column name
    pub fn flag(&self, name: &str) -> Option<bool> {
        let value = match name {
            "fever" => self.fever,
            "cough" => self.cough,
            "headache" => self.headache,
            "fatigue" => self.fatigue,
            "chest_pain" => self.chest_pain,
            "breathing_difficulty" => self.breathing_difficulty,
            "abdominal_pain" => self.abdominal_pain,
            "vomiting" => self.vomiting,
            "diarrhea" => self.diarrhea,
            "dizziness" => self.dizziness,
            "blurred_vision" => self.blurred_vision,
            "muscle_pain" => self.muscle_pain,
            "rash" => self.rash,
            "swelling" => self.swelling,
            "diabetes" => self.diabetes,
            "hypertension" => self.hypertension,
            "asthma" => self.asthma,
            "copd" => self.copd,
            "kidney_disease" => self.kidney_disease,
            "drug_allergy" => self.drug_allergy,
            "penicillin_allergy" => self.penicillin_allergy,
            "nsaid_allergy" => self.nsaid_allergy,
            _ => return None,
        };
        Some(value)
    }

    /// Cell values in `COLUMNS` order, unescaped.
    ///
    /// Flags render as `1`/`0`, an unset feedback as an empty cell.
    pub fn csv_fields(&self) -> Vec<String> {
        let flag = |b: bool| if b { "1".to_string() } else { "0".to_string() };
        vec![
            self.patient_id.clone(),
            self.age.to_string(),
            self.sex.clone(),
            self.weight.to_string(),
            self.height.to_string(),
            self.systolic_bp.to_string(),
            self.diastolic_bp.to_string(),
            self.glucose.to_string(),
            self.temperature.to_string(),
            self.heart_rate.to_string(),
            self.oxygen_saturation.to_string(),
            flag(self.fever),
            flag(self.cough),
            flag(self.headache),
            flag(self.fatigue),
            flag(self.chest_pain),
            flag(self.breathing_difficulty),
            flag(self.abdominal_pain),
            flag(self.vomiting),
            flag(self.diarrhea),
            flag(self.dizziness),
            flag(self.blurred_vision),
            flag(self.muscle_pain),
            flag(self.rash),
            flag(self.swelling),
            flag(self.diabetes),
            flag(self.hypertension),
            flag(self.asthma),
            flag(self.copd),
            flag(self.kidney_disease),
            flag(self.drug_allergy),
            flag(self.penicillin_allergy),
            flag(self.nsaid_allergy),
            self.diagnosis.clone(),
            self.recommended_medication.clone(),
            self.confidence.to_string(),
            self.feedback.map(|f| f.as_str().to_string()).unwrap_or_default(),
            self.timestamp.clone(),
        ]
    }
}

/// Partial sample accepted by `DatasetStore::append`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleDraft {
    pub patient_id: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub systolic_bp: Option<u32>,
    pub diastolic_bp: Option<u32>,
    pub glucose: Option<f64>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<u32>,
    pub oxygen_saturation: Option<f64>,
    pub fever: Option<bool>,
    pub cough: Option<bool>,
    pub headache: Option<bool>,
    pub fatigue: Option<bool>,
    pub chest_pain: Option<bool>,
    pub breathing_difficulty: Option<bool>,
    pub abdominal_pain: Option<bool>,
    pub vomiting: Option<bool>,
    pub diarrhea: Option<bool>,
    pub dizziness: Option<bool>,
    pub blurred_vision: Option<bool>,
    pub muscle_pain: Option<bool>,
    pub rash: Option<bool>,
    pub swelling: Option<bool>,
    pub diabetes: Option<bool>,
    pub hypertension: Option<bool>,
    pub asthma: Option<bool>,
    pub copd: Option<bool>,
    pub kidney_disease: Option<bool>,
    pub drug_allergy: Option<bool>,
    pub penicillin_allergy: Option<bool>,
    pub nsaid_allergy: Option<bool>,
    pub diagnosis: Option<String>,
    pub recommended_medication: Option<String>,
    pub confidence: Option<f64>,
    pub feedback: Option<Feedback>,
    pub timestamp: Option<String>,
}

impl SampleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = Some(diagnosis.into());
        self
    }

    pub fn medication(mut self, medication: impl Into<String>) -> Self {
        self.recommended_medication = Some(medication.into());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// Set a symptom or history flag by column name
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<(), DatasetError> {
        let slot = match name {
            "fever" => &mut self.fever,
            "cough" => &mut self.cough,
            "headache" => &mut self.headache,
            "fatigue" => &mut self.fatigue,
            "chest_pain" => &mut self.chest_pain,
            "breathing_difficulty" => &mut self.breathing_difficulty,
            "abdominal_pain" => &mut self.abdominal_pain,
            "vomiting" => &mut self.vomiting,
            "diarrhea" => &mut self.diarrhea,
            "dizziness" => &mut self.dizziness,
            "blurred_vision" => &mut self.blurred_vision,
            "muscle_pain" => &mut self.muscle_pain,
            "rash" => &mut self.rash,
            "swelling" => &mut self.swelling,
            "diabetes" => &mut self.diabetes,
            "hypertension" => &mut self.hypertension,
            "asthma" => &mut self.asthma,
            "copd" => &mut self.copd,
            "kidney_disease" => &mut self.kidney_disease,
            "drug_allergy" => &mut self.drug_allergy,
            "penicillin_allergy" => &mut self.penicillin_allergy,
            "nsaid_allergy" => &mut self.nsaid_allergy,
            _ => return Err(DatasetError::UnknownFlag(name.to_string())),
        };
        *slot = Some(value);
        Ok(())
    }

    /// Fill every unset field with its default.
    ///
    /// Numbers default to 0 (temperature to 36.5), flags to false, sex to
    /// "M", feedback to positive, the timestamp to now and the patient id
    /// to `P<unix millis>`.
    pub fn complete(self) -> Sample {
        let now = Utc::now();
        Sample {
            patient_id: self
                .patient_id
                .unwrap_or_else(|| format!("P{}", now.timestamp_millis())),
            age: self.age.unwrap_or(0),
            sex: self.sex.unwrap_or_else(|| DEFAULT_SEX.to_string()),
            weight: self.weight.unwrap_or(0.0),
            height: self.height.unwrap_or(0.0),
            systolic_bp: self.systolic_bp.unwrap_or(0),
            diastolic_bp: self.diastolic_bp.unwrap_or(0),
            glucose: self.glucose.unwrap_or(0.0),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            heart_rate: self.heart_rate.unwrap_or(0),
            oxygen_saturation: self.oxygen_saturation.unwrap_or(0.0),
            fever: self.fever.unwrap_or(false),
            cough: self.cough.unwrap_or(false),
            headache: self.headache.unwrap_or(false),
            fatigue: self.fatigue.unwrap_or(false),
            chest_pain: self.chest_pain.unwrap_or(false),
            breathing_difficulty: self.breathing_difficulty.unwrap_or(false),
            abdominal_pain: self.abdominal_pain.unwrap_or(false),
            vomiting: self.vomiting.unwrap_or(false),
            diarrhea: self.diarrhea.unwrap_or(false),
            dizziness: self.dizziness.unwrap_or(false),
            blurred_vision: self.blurred_vision.unwrap_or(false),
            muscle_pain: self.muscle_pain.unwrap_or(false),
            rash: self.rash.unwrap_or(false),
            swelling: self.swelling.unwrap_or(false),
            diabetes: self.diabetes.unwrap_or(false),
            hypertension: self.hypertension.unwrap_or(false),
            asthma: self.asthma.unwrap_or(false),
            copd: self.copd.unwrap_or(false),
            kidney_disease: self.kidney_disease.unwrap_or(false),
            drug_allergy: self.drug_allergy.unwrap_or(false),
            penicillin_allergy: self.penicillin_allergy.unwrap_or(false),
            nsaid_allergy: self.nsaid_allergy.unwrap_or(false),
            diagnosis: self.diagnosis.unwrap_or_default(),
            recommended_medication: self.recommended_medication.unwrap_or_default(),
            confidence: self.confidence.unwrap_or(0.0),
            feedback: Some(self.feedback.unwrap_or(Feedback::Positive)),
            timestamp: self.timestamp.unwrap_or_else(|| iso_timestamp(now)),
        }
    }
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix
pub fn iso_timestamp(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_cover_flags() {
        for name in SYMPTOMS.iter().chain(HISTORY.iter()) {
            assert!(COLUMNS.contains(name), "missing column {}", name);
        }
        assert_eq!(SYMPTOMS.len(), 14);
        assert_eq!(HISTORY.len(), 8);
    }

    #[test]
    fn test_complete_fills_defaults() {
        let sample = SampleDraft::new().complete();
        assert!(sample.patient_id.starts_with('P'));
        assert_eq!(sample.age, 0);
        assert_eq!(sample.sex, "M");
        assert_eq!(sample.temperature, 36.5);
        assert!(!sample.fever);
        assert!(!sample.nsaid_allergy);
        assert_eq!(sample.diagnosis, "");
        assert_eq!(sample.feedback, Some(Feedback::Positive));
        assert!(sample.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_complete_keeps_given_values() {
        let mut draft = SampleDraft::new()
            .patient_id("X1")
            .diagnosis("Asma")
            .medication("Salbutamol")
            .confidence(0.75);
        draft.set_flag("asthma", true).unwrap();
        draft.feedback = Some(Feedback::Original);

        let sample = draft.complete();
        assert_eq!(sample.patient_id, "X1");
        assert_eq!(sample.diagnosis, "Asma");
        assert_eq!(sample.recommended_medication, "Salbutamol");
        assert_eq!(sample.confidence, 0.75);
        assert!(sample.asthma);
        assert_eq!(sample.feedback, Some(Feedback::Original));
    }

    #[test]
    fn test_set_flag_rejects_unknown_name() {
        let mut draft = SampleDraft::new();
        assert!(draft.set_flag("sneezing", true).is_err());
    }

    #[test]
    fn test_csv_fields_match_column_count() {
        let mut sample = SampleDraft::new().complete();
        sample.feedback = None;
        let fields = sample.csv_fields();
        assert_eq!(fields.len(), COLUMNS.len());
        assert_eq!(fields[36], "");
        assert_eq!(fields[11], "0");
    }

    #[test]
    fn test_feedback_parse() {
        assert_eq!(Feedback::from_str("Positive"), Some(Feedback::Positive));
        assert_eq!(Feedback::from_str("original"), Some(Feedback::Original));
        assert_eq!(Feedback::from_str("negative"), None);
    }
}
