// THEORY:
// `HsvFrame` is the owned input of one classification pass. It wraps an
// `image::RgbImage` whose three channels are interpreted as hue, saturation and
// value rather than red, green and blue. Reusing the `image` buffer keeps the
// frame compatible with whatever decoded or converted it upstream, and gives us
// bounds-checked pixel access and cheap sub-views for free.

use crate::core_modules::pixel::pixel::HsvPixel;
use crate::error::{Result, VisionError};
use image::{GenericImageView, Rgb, RgbImage};

const CHANNELS: usize = 3;

/// A pre-converted HSV frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvFrame {
    buffer: RgbImage,
}

impl HsvFrame {
    /// Creates a black frame (every channel zero).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbImage::new(width, height),
        }
    }

    /// Wraps an interleaved H,S,V byte buffer in row-major order.
    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        let actual = bytes.len();
        if actual != expected {
            return Err(VisionError::FrameBufferMismatch { expected, actual });
        }
        RgbImage::from_raw(width, height, bytes)
            .map(|buffer| Self { buffer })
            .ok_or(VisionError::FrameBufferMismatch { expected, actual })
    }

    /// Builds a frame by evaluating `f` at every pixel position.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> HsvPixel,
    {
        Self {
            buffer: RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y).to_bytes())),
        }
    }

    /// Converts an RGB image into the half-degree HSV scale.
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        Self::from_fn(rgb.width(), rgb.height(), |x, y| {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            HsvPixel::from_rgb(r, g, b)
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Reads one sample. Panics if `(x, y)` is outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> HsvPixel {
        HsvPixel::from(*self.buffer.get_pixel(x, y))
    }

    /// Overwrites one sample.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: HsvPixel) {
        self.buffer.put_pixel(x, y, Rgb(pixel.to_bytes()));
    }

    /// Paints a rectangle with a single sample, clipped to the frame.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, pixel: HsvPixel) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.put_pixel(px, py, pixel);
            }
        }
    }

    /// Copies the samples of a `size`-by-`size` block in row-major order.
    /// The caller guarantees the block lies inside the frame.
    pub fn block(&self, x: u32, y: u32, size: u32) -> Vec<HsvPixel> {
        self.buffer
            .view(x, y, size, size)
            .pixels()
            .map(|(_, _, sample)| HsvPixel::from(sample))
            .collect()
    }

    pub fn contains_rect(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        x.checked_add(width).is_some_and(|end| end <= self.width())
            && y.checked_add(height).is_some_and(|end| end <= self.height())
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }
}

impl From<RgbImage> for HsvFrame {
    /// Takes an image whose channels already hold H, S and V.
    fn from(buffer: RgbImage) -> Self {
        Self { buffer }
    }
}
