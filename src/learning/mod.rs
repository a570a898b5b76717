//! Continuous learning from user feedback
//!
//! Positive feedback on a recommendation is folded back into the dataset
//! as a learned sample. There is no model behind it; the dataset is the
//! only thing that learns.

pub mod feedback;

pub use feedback::{apply_feedback, FeedbackEvent, LearningOutcome, Prediction, Verdict};
