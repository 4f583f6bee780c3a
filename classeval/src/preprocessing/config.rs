use serde::{Deserialize, Serialize};

/// How negative values are treated after mean subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeanMode {
    /// Keep the signed result in floating point.
    Float,
    /// Clamp to `0..=255`, as an 8-bit saturating subtraction would.
    Saturating,
}

impl Default for MeanMode {
    fn default() -> Self {
        Self::Float
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub short_side: u32,
    /// Per-channel mean in B, G, R order.
    pub mean: [f32; 3],
    pub mean_mode: MeanMode,
}

impl PreprocessConfig {
    pub fn new(
        short_side: u32,
        mean: [f32; 3],
        mean_mode: MeanMode,
    ) -> Self {
        Self {
            short_side,
            mean,
            mean_mode,
        }
    }

    pub fn short_side(
        mut self,
        short_side: u32,
    ) -> Self {
        self.short_side = short_side;
        self
    }

    pub fn mean(
        mut self,
        mean: [f32; 3],
    ) -> Self {
        self.mean = mean;
        self
    }

    pub fn mean_mode(
        mut self,
        mean_mode: MeanMode,
    ) -> Self {
        self.mean_mode = mean_mode;
        self
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self::new(256, [104.0, 117.0, 123.0], MeanMode::Float)
    }
}
