use crate::foundation::{
    core::{BlendMode, Resolution, Rgba},
    error::{ZMergeError, ZMergeResult},
};

/// One pixel of one layer: color plus depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerSample {
    /// Straight `[r, g, b, a]`, nominally in `[0, 1]`.
    pub rgba: Rgba,
    /// Depth, nominally in `[0, 1]`.
    pub z: f32,
}

impl LayerSample {
    /// Build a sample from color and depth.
    pub const fn new(rgba: Rgba, z: f32) -> Self {
        Self { rgba, z }
    }
}

/// A decoded input pass: per-pixel color and depth plus one blend mode.
///
/// Layers are immutable once built. The pixel buffer is row-major and always holds exactly
/// `resolution.pixel_count()` samples.
#[derive(Clone, Debug)]
pub struct Layer {
    resolution: Resolution,
    samples: Vec<LayerSample>,
    mode: BlendMode,
}

impl Layer {
    /// Build a layer, checking that `samples` covers the whole resolution.
    pub fn new(
        resolution: Resolution,
        samples: Vec<LayerSample>,
        mode: BlendMode,
    ) -> ZMergeResult<Self> {
        if resolution.pixel_count() == 0 {
            return Err(ZMergeError::validation(format!(
                "layer resolution {resolution} has no pixels"
            )));
        }
        if samples.len() != resolution.pixel_count() {
            return Err(ZMergeError::validation(format!(
                "layer of {resolution} expects {} samples, got {}",
                resolution.pixel_count(),
                samples.len()
            )));
        }
        Ok(Self {
            resolution,
            samples,
            mode,
        })
    }

    /// Build a layer where every pixel holds the same sample.
    pub fn filled(
        resolution: Resolution,
        sample: LayerSample,
        mode: BlendMode,
    ) -> ZMergeResult<Self> {
        Self::new(resolution, vec![sample; resolution.pixel_count()], mode)
    }

    /// Layer dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Layer-wide blend mode.
    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Row-major pixel samples.
    pub fn samples(&self) -> &[LayerSample] {
        &self.samples
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/model.rs"]
mod tests;
