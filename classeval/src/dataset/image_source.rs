use std::path::PathBuf;

use super::ImageLoadError;
use crate::raster::Image;

/// Resolves an image identifier from the validation list to decoded pixels.
pub trait ImageSource {
    fn load(
        &self,
        name: &str,
    ) -> Result<Image, ImageLoadError>;
}

/// Decodes image files stored under a single directory.
pub struct DirectoryImageSource {
    root: PathBuf,
}

impl DirectoryImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }
}

impl ImageSource for DirectoryImageSource {
    fn load(
        &self,
        name: &str,
    ) -> Result<Image, ImageLoadError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ImageLoadError::NotFound(path));
        }

        let decoded = image::open(&path).map_err(|source| {
            ImageLoadError::Decode {
                path: path.clone(),
                source,
            }
        })?;
        Ok(Image::from_rgb(&decoded.to_rgb8()))
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn test_directory_source_decodes_as_bgr() {
        let directory = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(3, 2, Rgb([200, 100, 50]))
            .save(directory.path().join("pixel.png"))
            .unwrap();

        let source = DirectoryImageSource::new(directory.path());
        let image = source.load("pixel.png").unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.pixel(2, 1), [50, 100, 200]);
    }

    #[test]
    fn test_directory_source_missing_file() {
        let directory = tempfile::tempdir().unwrap();
        let source = DirectoryImageSource::new(directory.path());
        assert!(matches!(
            source.load("missing.jpg"),
            Err(ImageLoadError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_source_undecodable_file() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(directory.path().join("broken.png"), b"not a png")
            .unwrap();
        let source = DirectoryImageSource::new(directory.path());
        assert!(matches!(
            source.load("broken.png"),
            Err(ImageLoadError::Decode { .. })
        ));
    }
}
