//! Initial dataset: three hand-authored samples plus generated filler
//!
//! Filler samples draw every vital and flag independently. Flags use fixed
//! per-condition probabilities so common symptoms show up more often than
//! rare history entries.

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::debug;

use crate::error::{DatasetError, Result};
use crate::types::{iso_timestamp, Feedback, Sample, SampleDraft};

/// Number of samples in a freshly seeded dataset
pub const SEED_SIZE: usize = 100;

/// Diagnoses known before any feedback arrives
pub const DIAGNOSES: [&str; 10] = [
    "Hipertensión",
    "Diabetes",
    "Infección respiratoria",
    "Gastritis",
    "Asma",
    "Dolor muscular",
    "Fiebre",
    "Alergia",
    "EPOC",
    "Insuficiencia renal",
];

/// Medications known before any feedback arrives
pub const MEDICATIONS: [&str; 10] = [
    "Paracetamol",
    "Ibuprofeno",
    "Amoxicilina",
    "Omeprazol",
    "Metformina",
    "Enalapril",
    "Salbutamol",
    "Loratadina",
    "Prednisona",
    "Furosemida",
];

/// Probability that each flag is set on a generated sample
const FLAG_PROBABILITIES: [(&str, f64); 22] = [
    ("fever", 0.3),
    ("cough", 0.4),
    ("headache", 0.5),
    ("fatigue", 0.6),
    ("chest_pain", 0.2),
    ("breathing_difficulty", 0.3),
    ("abdominal_pain", 0.4),
    ("vomiting", 0.2),
    ("diarrhea", 0.3),
    ("dizziness", 0.4),
    ("blurred_vision", 0.2),
    ("muscle_pain", 0.5),
    ("rash", 0.1),
    ("swelling", 0.2),
    ("diabetes", 0.2),
    ("hypertension", 0.3),
    ("asthma", 0.1),
    ("copd", 0.05),
    ("kidney_disease", 0.05),
    ("drug_allergy", 0.1),
    ("penicillin_allergy", 0.05),
    ("nsaid_allergy", 0.05),
];

const TIMESTAMP_WINDOW_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// The fixed samples P001..P003
pub fn hand_authored() -> Vec<Sample> {
    let hypertension = SampleDraft {
        patient_id: Some("P001".into()),
        age: Some(45),
        sex: Some("M".into()),
        weight: Some(80.0),
        height: Some(175.0),
        systolic_bp: Some(140),
        diastolic_bp: Some(90),
        glucose: Some(110.0),
        temperature: Some(36.8),
        heart_rate: Some(75),
        oxygen_saturation: Some(98.0),
        headache: Some(true),
        dizziness: Some(true),
        hypertension: Some(true),
        diagnosis: Some("Hipertensión".into()),
        recommended_medication: Some("Enalapril".into()),
        confidence: Some(0.89),
        feedback: Some(Feedback::Original),
        timestamp: Some("2024-01-15T10:30:00Z".into()),
        ..Default::default()
    };

    let diabetes = SampleDraft {
        patient_id: Some("P002".into()),
        age: Some(32),
        sex: Some("F".into()),
        weight: Some(65.0),
        height: Some(160.0),
        systolic_bp: Some(120),
        diastolic_bp: Some(80),
        glucose: Some(180.0),
        temperature: Some(36.5),
        heart_rate: Some(80),
        oxygen_saturation: Some(99.0),
        fatigue: Some(true),
        blurred_vision: Some(true),
        diabetes: Some(true),
        diagnosis: Some("Diabetes".into()),
        recommended_medication: Some("Metformina".into()),
        confidence: Some(0.92),
        feedback: Some(Feedback::Original),
        timestamp: Some("2024-01-15T11:15:00Z".into()),
        ..Default::default()
    };

    let respiratory = SampleDraft {
        patient_id: Some("P003".into()),
        age: Some(28),
        sex: Some("M".into()),
        weight: Some(70.0),
        height: Some(180.0),
        systolic_bp: Some(115),
        diastolic_bp: Some(75),
        glucose: Some(95.0),
        temperature: Some(38.2),
        heart_rate: Some(90),
        oxygen_saturation: Some(96.0),
        fever: Some(true),
        cough: Some(true),
        fatigue: Some(true),
        breathing_difficulty: Some(true),
        diagnosis: Some("Infección respiratoria".into()),
        recommended_medication: Some("Amoxicilina".into()),
        confidence: Some(0.87),
        feedback: Some(Feedback::Original),
        timestamp: Some("2024-01-15T12:00:00Z".into()),
        ..Default::default()
    };

    vec![hypertension.complete(), diabetes.complete(), respiratory.complete()]
}

/// Generate one filler sample numbered `index` (rendered as `P004`, ...).
pub fn generate<R: Rng>(
    rng: &mut R,
    index: usize,
    diagnoses: &[String],
    medications: &[String],
) -> Result<Sample> {
    if diagnoses.is_empty() || medications.is_empty() {
        return Err(DatasetError::Seed(
            "diagnosis and medication catalogs must not be empty".to_string(),
        ));
    }

    let diagnosis = &diagnoses[rng.random_range(0..diagnoses.len())];
    let medication = &medications[rng.random_range(0..medications.len())];
    let temperature = ((rng.random::<f64>() * 3.0 + 36.0) * 10.0).round() / 10.0;
    let confidence = ((rng.random::<f64>() * 0.3 + 0.7) * 100.0).round() / 100.0;
    let age_ms = rng.random_range(0..TIMESTAMP_WINDOW_MS);

    let mut draft = SampleDraft {
        patient_id: Some(format!("P{:03}", index)),
        age: Some(rng.random_range(20..80)),
        sex: Some(if rng.random_bool(0.5) { "M" } else { "F" }.to_string()),
        weight: Some(f64::from(rng.random_range(50u32..100))),
        height: Some(f64::from(rng.random_range(150u32..190))),
        systolic_bp: Some(rng.random_range(100..160)),
        diastolic_bp: Some(rng.random_range(60..100)),
        glucose: Some(f64::from(rng.random_range(70u32..270))),
        temperature: Some(temperature),
        heart_rate: Some(rng.random_range(60..120)),
        oxygen_saturation: Some(f64::from(rng.random_range(85u32..100))),
        diagnosis: Some(diagnosis.clone()),
        recommended_medication: Some(medication.clone()),
        confidence: Some(confidence),
        feedback: Some(Feedback::Original),
        timestamp: Some(iso_timestamp(Utc::now() - Duration::milliseconds(age_ms))),
        ..Default::default()
    };

    for (name, probability) in FLAG_PROBABILITIES {
        draft.set_flag(name, rng.random_bool(probability))?;
    }

    Ok(draft.complete())
}

/// Build the full initial dataset of `SEED_SIZE` samples
pub fn seed_samples<R: Rng>(
    rng: &mut R,
    diagnoses: &[String],
    medications: &[String],
) -> Result<Vec<Sample>> {
    let mut samples = hand_authored();
    let first_generated = samples.len() + 1;

    for index in first_generated..=SEED_SIZE {
        samples.push(generate(rng, index, diagnoses, medications)?);
    }

    debug!("Generated {} filler samples", SEED_SIZE + 1 - first_generated);
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalogs() -> (Vec<String>, Vec<String>) {
        (
            DIAGNOSES.iter().map(|s| s.to_string()).collect(),
            MEDICATIONS.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_hand_authored_samples() {
        let samples = hand_authored();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].patient_id, "P001");
        assert_eq!(samples[0].diagnosis, "Hipertensión");
        assert!(samples[0].headache && samples[0].dizziness && samples[0].hypertension);
        assert!(!samples[0].fever);
        assert_eq!(samples[1].recommended_medication, "Metformina");
        assert_eq!(samples[2].temperature, 38.2);
        assert!(samples.iter().all(|s| s.feedback == Some(Feedback::Original)));
    }

    #[test]
    fn test_seed_samples_size_and_ids() {
        let (diagnoses, medications) = catalogs();
        let mut rng = StdRng::seed_from_u64(7);
        let samples = seed_samples(&mut rng, &diagnoses, &medications).unwrap();

        assert_eq!(samples.len(), SEED_SIZE);
        assert_eq!(samples[3].patient_id, "P004");
        assert_eq!(samples[99].patient_id, "P100");
    }

    #[test]
    fn test_generated_values_stay_in_range() {
        let (diagnoses, medications) = catalogs();
        let mut rng = StdRng::seed_from_u64(42);
        for index in 4..200 {
            let s = generate(&mut rng, index, &diagnoses, &medications).unwrap();
            assert!((20..80).contains(&s.age));
            assert!(s.sex == "M" || s.sex == "F");
            assert!((50.0..100.0).contains(&s.weight));
            assert!((150.0..190.0).contains(&s.height));
            assert!((100..160).contains(&s.systolic_bp));
            assert!((60..100).contains(&s.diastolic_bp));
            assert!((36.0..=39.0).contains(&s.temperature));
            assert!((60..120).contains(&s.heart_rate));
            assert!((85.0..100.0).contains(&s.oxygen_saturation));
            assert!((0.7..=1.0).contains(&s.confidence));
            assert!(diagnoses.contains(&s.diagnosis));
            assert!(medications.contains(&s.recommended_medication));
            assert_eq!(s.feedback, Some(Feedback::Original));
        }
    }

    #[test]
    fn test_same_seed_same_vitals() {
        let (diagnoses, medications) = catalogs();
        let a = generate(&mut StdRng::seed_from_u64(3), 4, &diagnoses, &medications).unwrap();
        let b = generate(&mut StdRng::seed_from_u64(3), 4, &diagnoses, &medications).unwrap();
        assert_eq!(a.age, b.age);
        assert_eq!(a.diagnosis, b.diagnosis);
        assert_eq!(a.fever, b.fever);
    }

    #[test]
    fn test_empty_catalog_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate(&mut rng, 4, &[], &["Paracetamol".to_string()]);
        assert!(matches!(result, Err(DatasetError::Seed(_))));
    }
}
