use std::path::PathBuf;

use classeval::{EvaluationConfig, EvaluationReport};
use serde::{Deserialize, Serialize};

use super::Device;

/// Everything needed to compare two evaluation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub version: String,
    pub timestamp: u64,
    pub device: Device,
    pub images: PathBuf,
    pub scores: PathBuf,
    pub config: EvaluationConfig,
    pub result: EvaluationReport,
}
