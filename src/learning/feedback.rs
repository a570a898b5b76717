//! Feedback loop - turns confirmed recommendations into learned samples
//!
//! A user reviewing a recommendation either confirms it (positive) or
//! rejects it (negative). Only confirmed recommendations become samples.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dataset::{DatasetStats, DatasetStore};
use crate::types::{Feedback, Sample, SampleDraft};

/// Recommendation shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub medication: String,
    /// Expected in [0, 1]; not enforced
    pub confidence: f64,
}

/// User judgement on a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Negative,
}

/// One feedback submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// Vitals and flags entered for the patient. Outcome fields are ignored.
    pub observation: SampleDraft,
    /// Confirmed diagnosis, either from the catalog or typed in by the user
    pub diagnosis: String,
    pub prediction: Prediction,
    pub verdict: Verdict,
}

impl FeedbackEvent {
    pub fn positive(observation: SampleDraft, diagnosis: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            observation,
            diagnosis: diagnosis.into(),
            prediction,
            verdict: Verdict::Positive,
        }
    }

    pub fn negative(observation: SampleDraft, diagnosis: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            verdict: Verdict::Negative,
            ..Self::positive(observation, diagnosis, prediction)
        }
    }
}

/// Result of applying one feedback event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningOutcome {
    /// The learned sample, if the feedback was positive
    pub sample: Option<Sample>,
    /// The diagnosis was not in the catalog before this event
    pub novel_diagnosis: bool,
    /// The medication was not in the catalog before this event
    pub novel_medication: bool,
    pub stats: DatasetStats,
}

impl LearningOutcome {
    pub fn learned(&self) -> bool {
        self.sample.is_some()
    }
}

/// Apply a feedback event to the store
pub fn apply_feedback(store: &mut DatasetStore, event: FeedbackEvent) -> LearningOutcome {
    if event.verdict == Verdict::Negative {
        warn!(
            "Negative feedback for {} -> {}, nothing learned",
            event.diagnosis, event.prediction.medication
        );
        return LearningOutcome {
            sample: None,
            novel_diagnosis: false,
            novel_medication: false,
            stats: store.stats(),
        };
    }

    let novel_diagnosis = !event.diagnosis.is_empty() && !store.has_diagnosis(&event.diagnosis);
    let novel_medication =
        !event.prediction.medication.is_empty() && !store.has_medication(&event.prediction.medication);

    let mut draft = event.observation;
    draft.diagnosis = Some(event.diagnosis);
    draft.recommended_medication = Some(event.prediction.medication);
    draft.confidence = Some(event.prediction.confidence);
    draft.feedback = Some(Feedback::Positive);
    draft.timestamp = None;

    let sample = store.append(draft);
    if novel_diagnosis {
        info!("Learned new diagnosis: {}", sample.diagnosis);
    }

    LearningOutcome {
        sample: Some(sample),
        novel_diagnosis,
        novel_medication,
        stats: store.stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> DatasetStore {
        let mut store = DatasetStore::new();
        store.seed_with(&mut StdRng::seed_from_u64(21)).unwrap();
        store
    }

    fn observation() -> SampleDraft {
        let mut draft = SampleDraft {
            patient_id: Some("P900".into()),
            age: Some(51),
            sex: Some("F".into()),
            temperature: Some(37.1),
            // ignored: overwritten by the event
            diagnosis: Some("stale".into()),
            ..Default::default()
        };
        draft.set_flag("muscle_pain", true).unwrap();
        draft.set_flag("fatigue", true).unwrap();
        draft
    }

    fn prediction() -> Prediction {
        Prediction {
            medication: "Paracetamol".into(),
            confidence: 0.81,
        }
    }

    #[test]
    fn test_positive_feedback_appends_sample() {
        let mut store = seeded();
        let outcome = apply_feedback(&mut store, FeedbackEvent::positive(observation(), "Dolor muscular", prediction()));

        assert!(outcome.learned());
        assert!(!outcome.novel_diagnosis);
        assert!(!outcome.novel_medication);
        assert_eq!(outcome.stats.total_samples, 101);
        assert_eq!(outcome.stats.learned_samples, 1);

        let sample = outcome.sample.unwrap();
        assert_eq!(sample.patient_id, "P900");
        assert_eq!(sample.diagnosis, "Dolor muscular");
        assert_eq!(sample.recommended_medication, "Paracetamol");
        assert_eq!(sample.confidence, 0.81);
        assert_eq!(sample.feedback, Some(Feedback::Positive));
        assert!(sample.muscle_pain && sample.fatigue);
        assert!(!sample.fever);
    }

    #[test]
    fn test_custom_diagnosis_is_novel() {
        let mut store = seeded();
        let outcome = apply_feedback(&mut store, FeedbackEvent::positive(observation(), "Fibromialgia", prediction()));

        assert!(outcome.novel_diagnosis);
        assert_eq!(outcome.stats.diagnoses, 11);

        let again = apply_feedback(&mut store, FeedbackEvent::positive(observation(), "Fibromialgia", prediction()));
        assert!(!again.novel_diagnosis);
        assert_eq!(again.stats.diagnoses, 11);
        assert_eq!(again.stats.total_samples, 102);
    }

    #[test]
    fn test_novel_medication_reported() {
        let mut store = seeded();
        let prediction = Prediction {
            medication: "Pregabalina".into(),
            confidence: 0.7,
        };
        let outcome = apply_feedback(&mut store, FeedbackEvent::positive(observation(), "Fibromialgia", prediction));
        assert!(outcome.novel_medication);
        assert_eq!(outcome.stats.medications, 11);
    }

    #[test]
    fn test_negative_feedback_leaves_store_untouched() {
        let mut store = seeded();
        let before = store.stats();
        let outcome = apply_feedback(&mut store, FeedbackEvent::negative(observation(), "Fibromialgia", prediction()));

        assert!(!outcome.learned());
        assert_eq!(outcome.stats, before);
        assert!(!store.has_diagnosis("Fibromialgia"));
    }
}
