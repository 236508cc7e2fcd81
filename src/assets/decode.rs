use std::path::Path;

use anyhow::Context;

use crate::{
    ZMergeResult,
    foundation::{
        core::{DepthOrder, Resolution, Rgba},
        error::ZMergeError,
    },
};

/// Decode a color pass and normalize it to `[0, 1]` floats.
///
/// 8- and 16-bit images are scaled by their integer maximum; images without an alpha
/// channel come back fully opaque.
pub fn decode_color(path: &Path) -> ZMergeResult<(Resolution, Vec<Rgba>)> {
    let img = image::open(path)
        .with_context(|| format!("decode color pass '{}'", path.display()))?;
    let resolution = non_empty(img.width(), img.height(), path)?;
    let pixels = img.to_rgba32f().pixels().map(|p| p.0).collect();
    Ok((resolution, pixels))
}

/// Decode a depth pass to one normalized channel.
///
/// Color depth passes are reduced to luma first.
pub fn decode_depth(path: &Path) -> ZMergeResult<(Resolution, Vec<f32>)> {
    let img = image::open(path)
        .with_context(|| format!("decode depth pass '{}'", path.display()))?;
    let resolution = non_empty(img.width(), img.height(), path)?;
    Ok((resolution, img.to_luma32f().into_raw()))
}

fn non_empty(width: u32, height: u32, path: &Path) -> ZMergeResult<Resolution> {
    if width == 0 || height == 0 {
        return Err(ZMergeError::decode(format!(
            "'{}' decoded to an empty {width}x{height} image",
            path.display()
        )));
    }
    Ok(Resolution::new(width, height))
}

/// Grow the far regions of a depth pass by one pixel.
///
/// Each output pixel takes the farthest of itself, its upper and its left neighbor: the max
/// under [`DepthOrder::NearIsSmall`], the min under [`DepthOrder::FarIsSmall`]. Neighbors
/// outside the image are ignored.
pub fn expand_depth(depth: &[f32], resolution: Resolution, order: DepthOrder) -> Vec<f32> {
    let pick: fn(f32, f32) -> f32 = match order {
        DepthOrder::NearIsSmall => f32::max,
        DepthOrder::FarIsSmall => f32::min,
    };
    let w = resolution.width as usize;

    let mut out = Vec::with_capacity(depth.len());
    for (i, &v) in depth.iter().enumerate() {
        let (y, x) = (i / w, i % w);
        let mut acc = v;
        if y > 0 {
            acc = pick(acc, depth[i - w]);
        }
        if x > 0 {
            acc = pick(acc, depth[i - 1]);
        }
        out.push(acc);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
