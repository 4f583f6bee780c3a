use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage {
        width: u32,
        height: u32,
    },
    #[error(
        "Crop of {crop_width}x{crop_height} does not fit into \
        {width}x{height} image"
    )]
    InvalidCrop {
        crop_width: u32,
        crop_height: u32,
        width: u32,
        height: u32,
    },
}
