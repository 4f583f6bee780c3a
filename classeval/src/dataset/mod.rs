mod error;
mod image_source;
mod labels;
mod validation;

pub use error::{ImageLoadError, LoadError};
pub use image_source::{DirectoryImageSource, ImageSource};
pub use labels::{ClassLabels, load_class_labels, parse_class_labels};
pub use validation::{
    ValidationEntry, ValidationSet, load_validation_list,
    parse_validation_list,
};
