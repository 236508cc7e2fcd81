use crate::{
    foundation::{
        core::{BlendMode, Resolution, Rgba},
        error::{ZMergeError, ZMergeResult},
    },
    layer::model::Layer,
};

/// One layer's contribution at one pixel position.
///
/// The sequential engine overwrites `rgba` in place with intermediate blend results.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelEntry {
    /// Straight `[r, g, b, a]`.
    pub rgba: Rgba,
    /// Depth used for ordering.
    pub z: f32,
    /// Blend mode of the layer this entry came from.
    pub mode: BlendMode,
}

impl PixelEntry {
    /// Build an entry.
    pub const fn new(rgba: Rgba, z: f32, mode: BlendMode) -> Self {
        Self { rgba, z, mode }
    }

    /// Alpha channel.
    pub fn alpha(&self) -> f32 {
        self.rgba[3]
    }
}

/// Arena of fixed-size pixel stacks, one per pixel position.
///
/// Stack `i` occupies `entries[i * depth..(i + 1) * depth]` and initially lists layers in
/// input order.
#[derive(Clone, Debug)]
pub struct PixelStacks {
    resolution: Resolution,
    depth: usize,
    entries: Vec<PixelEntry>,
}

impl PixelStacks {
    /// Gather every layer's sample at every pixel position.
    ///
    /// Fails before allocating anything if the layers disagree on resolution.
    #[tracing::instrument(skip(layers), fields(layers = layers.len()))]
    pub fn build(layers: &[Layer]) -> ZMergeResult<Self> {
        let resolution = check_resolutions(layers)?;
        let depth = layers.len();
        let pixels = resolution.pixel_count();
        let len = pixels
            .checked_mul(depth)
            .ok_or_else(|| ZMergeError::validation("pixel stack arena size overflow"))?;

        let mut entries = Vec::with_capacity(len);
        for p in 0..pixels {
            for layer in layers {
                let s = layer.samples()[p];
                entries.push(PixelEntry::new(s.rgba, s.z, layer.mode()));
            }
        }

        Ok(Self {
            resolution,
            depth,
            entries,
        })
    }

    /// Build directly from a flat entry buffer with `depth` entries per pixel.
    pub fn from_entries(
        resolution: Resolution,
        depth: usize,
        entries: Vec<PixelEntry>,
    ) -> ZMergeResult<Self> {
        if depth == 0 {
            return Err(ZMergeError::validation("pixel stacks need at least one layer"));
        }
        let expected = resolution.pixel_count().checked_mul(depth);
        if expected != Some(entries.len()) {
            return Err(ZMergeError::validation(format!(
                "{} entries do not form {depth}-deep stacks over {resolution}",
                entries.len()
            )));
        }
        Ok(Self {
            resolution,
            depth,
            entries,
        })
    }

    /// Shared resolution of the source layers.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Entries per stack (the layer count).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of stacks (the pixel count).
    pub fn len(&self) -> usize {
        self.entries.len() / self.depth
    }

    /// True when there are no pixel positions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stack at pixel index `i`.
    pub fn stack(&self, i: usize) -> Option<&[PixelEntry]> {
        let start = i.checked_mul(self.depth)?;
        self.entries.get(start..start + self.depth)
    }

    /// Iterate stacks in pixel order.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, PixelEntry> {
        self.entries.chunks_exact(self.depth)
    }

    /// Iterate stacks mutably in pixel order.
    pub fn iter_mut(&mut self) -> std::slice::ChunksExactMut<'_, PixelEntry> {
        self.entries.chunks_exact_mut(self.depth)
    }

    /// Flat entry buffer.
    pub fn entries(&self) -> &[PixelEntry] {
        &self.entries
    }
}

/// Check that all layers share the first layer's resolution and return it.
pub fn check_resolutions(layers: &[Layer]) -> ZMergeResult<Resolution> {
    let first = layers
        .first()
        .ok_or_else(|| ZMergeError::validation("at least one layer is required"))?;
    let expected = first.resolution();
    for (i, layer) in layers.iter().enumerate().skip(1) {
        if layer.resolution() != expected {
            return Err(ZMergeError::resolution_mismatch(
                i,
                expected,
                layer.resolution(),
            ));
        }
    }
    Ok(expected)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/stack.rs"]
mod tests;
