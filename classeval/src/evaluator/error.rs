use thiserror::Error;

use super::EvaluatorState;
use crate::{
    backend::BackendError,
    dataset::ImageLoadError,
    postprocessing::PostprocessError,
    preprocessing::PreprocessError,
    sink::SinkError,
};

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("No images in the validation list")]
    MissingImages,
    #[error("No ground-truth class ids in the validation list")]
    MissingGroundTruth,
    #[error("No class labels")]
    MissingLabels,
    #[error("{images} images but {ground_truth} ground-truth class ids")]
    LengthMismatch {
        images: usize,
        ground_truth: usize,
    },
    #[error("Image {image} has class id {class_id}, but only {labels} labels are known")]
    UnknownClass {
        image: String,
        class_id: usize,
        labels: usize,
    },
    #[error("Backend produces {channels} classes, at least {k} are required")]
    TooFewClasses {
        channels: usize,
        k: usize,
    },
    #[error(
        "Network input {width}x{height} does not fit in images resized to a short side of {short_side}"
    )]
    InputExceedsShortSide {
        width: u32,
        height: u32,
        short_side: u32,
    },
    #[error("{images} images but the backend holds {outputs} recorded outputs")]
    OutputCountMismatch {
        images: usize,
        outputs: usize,
    },
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: EvaluatorState,
    },
    #[error("Unable to load image {image}: {source}")]
    ImageLoad {
        image: String,
        #[source]
        source: ImageLoadError,
    },
    #[error("Unable to preprocess image {image}: {source}")]
    Preprocess {
        image: String,
        #[source]
        source: PreprocessError,
    },
    #[error("Inference failed for image {image}: {source}")]
    Backend {
        image: String,
        #[source]
        source: BackendError,
    },
    #[error("Unable to rank scores of image {image}: {source}")]
    Postprocess {
        image: String,
        #[source]
        source: PostprocessError,
    },
    #[error("Metrics sink failed: {0}")]
    Sink(#[from] SinkError),
    #[error("No images were evaluated, accuracy is undefined")]
    NoImagesEvaluated,
}
