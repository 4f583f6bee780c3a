use image::imageops::{self, FilterType};
use ndarray::Array3;

use super::{MeanMode, PreprocessConfig, PreprocessError};
use crate::raster::{IMAGE_CHANNELS, Image, InputShape, InputTensor};

/// Size after scaling the shorter side to `short_side` with the aspect ratio
/// kept. The scale factor is taken once from the original size and the long
/// side is truncated to whole pixels.
pub fn short_side_dimensions(
    width: u32,
    height: u32,
    short_side: u32,
) -> (u32, u32) {
    if height > width {
        let scale = short_side as f32 / width as f32;
        (short_side, (height as f32 * scale) as u32)
    } else if width > height {
        let scale = short_side as f32 / height as f32;
        ((width as f32 * scale) as u32, short_side)
    } else {
        (short_side, short_side)
    }
}

pub fn resize_short_side(
    image: &mut Image,
    short_side: u32,
) -> Result<(), PreprocessError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(PreprocessError::EmptyImage {
            width,
            height,
        });
    }

    let (new_width, new_height) =
        short_side_dimensions(width, height, short_side);
    if (new_width, new_height) == (width, height) {
        return Ok(());
    }

    let resized = imageops::resize(
        image.buffer(),
        new_width,
        new_height,
        FilterType::Triangle,
    );
    image.replace_buffer(resized);
    Ok(())
}

/// Crops a `crop_width` x `crop_height` window around the image center.
/// Half extents use integer division, so odd sizes lean to the top left.
pub fn central_crop(
    image: &mut Image,
    crop_width: u32,
    crop_height: u32,
) -> Result<(), PreprocessError> {
    let (width, height) = (image.width(), image.height());
    if crop_width == 0
        || crop_height == 0
        || crop_width > width
        || crop_height > height
    {
        return Err(PreprocessError::InvalidCrop {
            crop_width,
            crop_height,
            width,
            height,
        });
    }

    let centre_x = width / 2;
    let centre_y = height / 2;
    let left_x = centre_x - crop_width / 2;
    let top_y = centre_y - crop_height / 2;

    let cropped = imageops::crop_imm(
        image.buffer(),
        left_x,
        top_y,
        crop_width,
        crop_height,
    )
    .to_image();
    image.replace_buffer(cropped);
    Ok(())
}

pub fn subtract_mean(
    image: &Image,
    mean: [f32; 3],
    mode: MeanMode,
) -> InputTensor {
    let buffer = image.buffer();
    let shape = (
        image.height() as usize,
        image.width() as usize,
        IMAGE_CHANNELS,
    );
    let data = Array3::from_shape_fn(shape, |(y, x, channel)| {
        let sample = buffer.get_pixel(x as u32, y as u32).0[channel] as f32;
        let value = sample - mean[channel];
        match mode {
            MeanMode::Float => value,
            MeanMode::Saturating => value.clamp(0.0, u8::MAX as f32),
        }
    });
    InputTensor::new(data)
}

pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self {
            config,
        }
    }

    /// Short-side resize, central crop to `target`, then mean subtraction.
    pub fn preprocess(
        &self,
        mut image: Image,
        target: InputShape,
    ) -> Result<InputTensor, PreprocessError> {
        resize_short_side(&mut image, self.config.short_side)?;
        central_crop(&mut image, target.width, target.height)?;
        Ok(subtract_mean(&image, self.config.mean, self.config.mean_mode))
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(PreprocessConfig::default())
    }
}
