use std::time::Instant;

use crate::{
    composite::{
        output::CompositeImage, parallel::composite_stacks_parallel,
        sequential::composite_stacks_sequential, stack::PixelStacks,
    },
    foundation::{
        core::DepthOrder,
        error::{ZMergeError, ZMergeResult},
    },
    layer::model::Layer,
};

/// Threading options for loading and compositing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositeThreading {
    /// Composite pixels on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Minimum pixels handed to one parallel task.
    pub chunk_pixels: usize,
}

impl Default for CompositeThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_pixels: 4096,
        }
    }
}

/// Settings for a whole merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Whether smaller or larger depth values are nearer.
    pub depth_order: DepthOrder,
    /// Grow each depth pass by one pixel while loading (see [`crate::expand_depth`]).
    pub expand_depth: bool,
    /// Threading options.
    pub threading: CompositeThreading,
}

/// Work counters for one composite. Identical for sequential and parallel runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Pixels composited.
    pub pixels: u64,
    /// Pixels whose every entry had zero alpha.
    pub transparent_pixels: u64,
    /// Blend operator applications.
    pub blend_steps: u64,
    /// Entries never visited because they were occluded or transparent.
    pub skipped_entries: u64,
}

impl CompositeStats {
    pub(crate) fn record(&mut self, depth: usize, first_relevant: Option<usize>) {
        self.pixels += 1;
        match first_relevant {
            Some(first) => {
                self.blend_steps += first as u64;
                self.skipped_entries += (depth - 1 - first) as u64;
            }
            None => {
                self.transparent_pixels += 1;
                self.skipped_entries += depth as u64;
            }
        }
    }
}

/// Merge depth-annotated layers into one image.
///
/// Fails with [`ZMergeError::ResolutionMismatch`] before any compositing if the layers
/// disagree on size.
pub fn composite(layers: &[Layer], settings: &MergeSettings) -> ZMergeResult<CompositeImage> {
    composite_with_stats(layers, settings).map(|(image, _)| image)
}

/// [`composite`], also returning work counters.
#[tracing::instrument(skip(layers, settings), fields(layers = layers.len(), parallel = settings.threading.parallel))]
pub fn composite_with_stats(
    layers: &[Layer],
    settings: &MergeSettings,
) -> ZMergeResult<(CompositeImage, CompositeStats)> {
    let t0 = Instant::now();
    let mut stacks = PixelStacks::build(layers)?;
    tracing::debug!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        pixels = stacks.len(),
        "pixel stacks built"
    );

    let t1 = Instant::now();
    let threading = &settings.threading;
    let (pixels, stats) = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        composite_stacks_parallel(
            &stacks,
            settings.depth_order,
            threading.chunk_pixels,
            &pool,
        )
    } else {
        composite_stacks_sequential(&mut stacks, settings.depth_order)
    };
    tracing::info!(
        elapsed_ms = t1.elapsed().as_millis() as u64,
        blend_steps = stats.blend_steps,
        skipped_entries = stats.skipped_entries,
        transparent_pixels = stats.transparent_pixels,
        "pixel blending done"
    );

    let image = CompositeImage::new(stacks.resolution(), pixels)?;
    Ok((image, stats))
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ZMergeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ZMergeError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ZMergeError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/engine.rs"]
mod tests;
