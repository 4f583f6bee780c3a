use serde::{Deserialize, Serialize};

use super::PostprocessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoftmaxMode {
    /// `exp(x)` on the raw scores. Overflows once a score exceeds ~88.
    Reference,
    /// `exp(x - max)`; same distribution, no overflow.
    Stable,
}

impl Default for SoftmaxMode {
    fn default() -> Self {
        Self::Stable
    }
}

/// Exponentiates every score and divides by the sum of the exponentials.
/// The sum is accumulated in `f64`.
pub fn softmax(
    scores: &[f32],
    mode: SoftmaxMode,
) -> Result<Box<[f32]>, PostprocessError> {
    if scores.is_empty() {
        return Err(PostprocessError::EmptyScores);
    }

    let shift = match mode {
        SoftmaxMode::Reference => 0.0,
        SoftmaxMode::Stable => {
            scores.iter().copied().fold(f32::NEG_INFINITY, f32::max)
        },
    };

    let mut result: Box<[f32]> =
        scores.iter().map(|&score| (score - shift).exp()).collect();
    let sum: f64 = result.iter().map(|&value| value as f64).sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(PostprocessError::DegenerateDistribution);
    }

    for value in result.iter_mut() {
        *value = (*value as f64 / sum) as f32;
    }
    Ok(result)
}
