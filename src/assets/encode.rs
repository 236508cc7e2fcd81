use std::path::Path;

use anyhow::Context;

use crate::{
    ZMergeResult,
    composite::output::CompositeImage,
    foundation::error::ZMergeError,
};

/// Integer sample size of an encoded output image.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BitDepth {
    /// 8 bits per channel.
    Eight,
    /// 16 bits per channel.
    #[default]
    Sixteen,
}

impl BitDepth {
    /// Resolve a bit count (8 or 16).
    pub fn from_bits(bits: u8) -> ZMergeResult<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(ZMergeError::validation(format!(
                "unsupported output bit depth {other} (expected 8 or 16)"
            ))),
        }
    }
}

/// Map a `[0, 1]` channel to `0..=max`: clamp, scale, round.
pub fn quantize_channel(v: f32, max: u16) -> u16 {
    (v.clamp(0.0, 1.0) * f32::from(max)).round() as u16
}

impl CompositeImage {
    /// Quantize to interleaved RGBA8.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels()
            .iter()
            .flat_map(|p| p.map(|c| quantize_channel(c, u16::from(u8::MAX)) as u8))
            .collect()
    }

    /// Quantize to interleaved RGBA16.
    pub fn to_rgba16(&self) -> Vec<u16> {
        self.pixels()
            .iter()
            .flat_map(|p| p.map(|c| quantize_channel(c, u16::MAX)))
            .collect()
    }
}

/// Encode a composite to disk.
///
/// The format follows the file extension (PNG when there is none or it is unknown). The
/// parent directory is created if missing.
#[tracing::instrument(skip(composite), fields(resolution = %composite.resolution()))]
pub fn write_image(composite: &CompositeImage, path: &Path, depth: BitDepth) -> ZMergeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let format = image::ImageFormat::from_path(path).unwrap_or(image::ImageFormat::Png);
    let (w, h) = (composite.width(), composite.height());
    let result = match depth {
        BitDepth::Eight => image::RgbaImage::from_raw(w, h, composite.to_rgba8())
            .ok_or_else(|| ZMergeError::validation("rgba8 buffer does not match image size"))?
            .save_with_format(path, format),
        BitDepth::Sixteen => {
            image::ImageBuffer::<image::Rgba<u16>, _>::from_raw(w, h, composite.to_rgba16())
                .ok_or_else(|| ZMergeError::validation("rgba16 buffer does not match image size"))?
                .save_with_format(path, format)
        }
    };
    result.with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
