use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unable to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line} is not \"<image> <class id>\": \"{content}\"")]
    MalformedLine {
        line: usize,
        content: String,
    },
    #[error("Line {line} has invalid class id \"{value}\"")]
    InvalidClassId {
        line: usize,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Image {0:?} not found")]
    NotFound(PathBuf),
    #[error("Unable to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
