use image::{Rgb, RgbImage};
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

pub const IMAGE_CHANNELS: usize = 3;

/// Decoded 8-bit image. Channels are stored in B, G, R order, which is the
/// order the evaluated networks were trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    buffer: RgbImage,
}

impl Image {
    /// Wraps interleaved B, G, R bytes. Returns `None` if `data` does not
    /// hold exactly `width * height * 3` samples.
    pub fn from_bgr(
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Option<Self> {
        RgbImage::from_raw(width, height, data).map(|buffer| Self {
            buffer,
        })
    }

    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let buffer = RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            Rgb([b, g, r])
        });
        Self {
            buffer,
        }
    }

    pub fn uniform(
        width: u32,
        height: u32,
        bgr: [u8; 3],
    ) -> Self {
        Self {
            buffer: RgbImage::from_pixel(width, height, Rgb(bgr)),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// B, G, R sample at column `x`, row `y`.
    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    pub(crate) fn buffer(&self) -> &RgbImage {
        &self.buffer
    }

    pub(crate) fn replace_buffer(
        &mut self,
        buffer: RgbImage,
    ) {
        self.buffer = buffer;
    }
}

/// Spatial size of the network input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputShape {
    pub width: u32,
    pub height: u32,
}

impl InputShape {
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            width,
            height,
        }
    }
}

impl Default for InputShape {
    fn default() -> Self {
        Self::new(224, 224)
    }
}

/// Preprocessed network input in HWC layout with B, G, R channels.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Array3<f32>,
}

impl InputTensor {
    pub fn new(data: Array3<f32>) -> Self {
        Self {
            data,
        }
    }

    pub fn shape(&self) -> InputShape {
        let (height, width, _) = self.data.dim();
        InputShape::new(width as u32, height as u32)
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    pub fn as_slice(&self) -> Option<&[f32]> {
        self.data.as_slice()
    }

    pub fn into_inner(self) -> Array3<f32> {
        self.data
    }
}
