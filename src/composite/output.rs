use crate::foundation::{
    core::{Resolution, Rgba},
    error::{ZMergeError, ZMergeResult},
};

/// Final merged image: one straight RGBA value per pixel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeImage {
    resolution: Resolution,
    pixels: Vec<Rgba>,
}

impl CompositeImage {
    /// Wrap composited pixels; `pixels` must cover `resolution` exactly.
    pub fn new(resolution: Resolution, pixels: Vec<Rgba>) -> ZMergeResult<Self> {
        if pixels.len() != resolution.pixel_count() {
            return Err(ZMergeError::validation(format!(
                "composite of {resolution} expects {} pixels, got {}",
                resolution.pixel_count(),
                pixels.len()
            )));
        }
        Ok(Self { resolution, pixels })
    }

    /// Image dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.resolution.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Consume the image and return its pixels.
    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }
}
