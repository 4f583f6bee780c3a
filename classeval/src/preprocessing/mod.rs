mod config;
mod error;
mod preprocessor;

pub use config::{MeanMode, PreprocessConfig};
pub use error::PreprocessError;
pub use preprocessor::{
    Preprocessor, central_crop, resize_short_side, short_side_dimensions,
    subtract_mean,
};
