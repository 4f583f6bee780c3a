use serde::{Deserialize, Serialize};

use super::LatencySummary;
use crate::postprocessing::RankedClass;

/// Result of scoring one validation entry. Accuracies are running values
/// over the `images_seen` images scored so far, this one included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub index: usize,
    pub image: String,
    pub ground_truth: usize,
    pub ground_truth_label: String,
    pub predictions: Vec<RankedClass>,
    pub elapsed_ms: f64,
    pub top1_hit: bool,
    pub top5_hit: bool,
    pub images_seen: usize,
    pub top1_accuracy: f64,
    pub top5_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedImage {
    pub index: usize,
    pub image: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Scored(ImageRecord),
    Skipped(SkippedImage),
}

impl StepOutcome {
    pub fn index(&self) -> usize {
        match self {
            StepOutcome::Scored(record) => record.index,
            StepOutcome::Skipped(skipped) => skipped.index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub images_total: usize,
    pub images_seen: usize,
    pub images_skipped: usize,
    pub top1_correct: usize,
    pub top5_correct: usize,
    pub top1_accuracy: f64,
    pub top5_accuracy: f64,
    pub latency: LatencySummary,
    /// Set when the run stopped before the end of the validation list.
    pub interrupted: bool,
}
