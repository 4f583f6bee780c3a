use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::{postprocessing::SoftmaxMode, preprocessing::PreprocessConfig};

/// What to do with a validation entry that cannot be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the entry as skipped and move on. Skipped entries count
    /// towards neither the numerator nor the denominator of accuracy.
    Skip,
    /// Stop the run with the error.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub preprocessing: PreprocessConfig,
    pub softmax: SoftmaxMode,
    /// Applies to decode and crop failures.
    pub on_image_error: FailurePolicy,
    /// Applies to errors raised by the inference backend.
    pub on_backend_error: FailurePolicy,
}

impl EvaluationConfig {
    pub fn new(
        preprocessing: PreprocessConfig,
        softmax: SoftmaxMode,
        on_image_error: FailurePolicy,
        on_backend_error: FailurePolicy,
    ) -> Self {
        Self {
            preprocessing,
            softmax,
            on_image_error,
            on_backend_error,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preprocessing.short_side == 0 {
            return Err(ConfigError::ZeroShortSide);
        }
        Ok(())
    }

    pub fn preprocessing(
        mut self,
        preprocessing: PreprocessConfig,
    ) -> Self {
        self.preprocessing = preprocessing;
        self
    }

    pub fn softmax(
        mut self,
        softmax: SoftmaxMode,
    ) -> Self {
        self.softmax = softmax;
        self
    }

    pub fn on_image_error(
        mut self,
        on_image_error: FailurePolicy,
    ) -> Self {
        self.on_image_error = on_image_error;
        self
    }

    pub fn on_backend_error(
        mut self,
        on_backend_error: FailurePolicy,
    ) -> Self {
        self.on_backend_error = on_backend_error;
        self
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new(
            PreprocessConfig::default(),
            SoftmaxMode::default(),
            FailurePolicy::Skip,
            FailurePolicy::Abort,
        )
    }
}
