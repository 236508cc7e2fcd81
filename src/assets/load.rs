use std::time::Instant;

use rayon::prelude::*;

use crate::{
    assets::decode::{decode_color, decode_depth, expand_depth},
    composite::{
        engine::{MergeSettings, build_thread_pool},
        stack::check_resolutions,
    },
    foundation::error::{ZMergeError, ZMergeResult},
    layer::{
        manifest::{LayerSpec, Manifest},
        model::{Layer, LayerSample},
    },
};

/// Decode one manifest entry into a [`Layer`].
///
/// The blend mode is resolved before any file is read. `index` only labels errors.
pub fn decode_layer(
    index: usize,
    spec: &LayerSpec,
    manifest: &Manifest,
    settings: &MergeSettings,
) -> ZMergeResult<Layer> {
    let mode = spec.blend_mode(index)?;

    let (resolution, color) = decode_color(&manifest.resolve_path(&spec.color))?;
    let (depth_resolution, mut depth) = decode_depth(&manifest.resolve_path(&spec.depth))?;
    if depth_resolution != resolution {
        return Err(ZMergeError::resolution_mismatch(
            index,
            resolution,
            depth_resolution,
        ));
    }
    if settings.expand_depth {
        depth = expand_depth(&depth, resolution, settings.depth_order);
    }

    let samples = color
        .into_iter()
        .zip(depth)
        .map(|(rgba, z)| LayerSample::new(rgba, z))
        .collect();
    Layer::new(resolution, samples, mode)
}

/// Decode every layer of a manifest concurrently.
///
/// Layers come back in manifest order. Fails with [`ZMergeError::ResolutionMismatch`] if they
/// disagree on size.
#[tracing::instrument(skip(manifest, settings), fields(layers = manifest.layers.len()))]
pub fn load_layers(manifest: &Manifest, settings: &MergeSettings) -> ZMergeResult<Vec<Layer>> {
    let t0 = Instant::now();
    let pool = build_thread_pool(settings.threading.threads)?;
    let layers = pool.install(|| {
        manifest
            .layers
            .par_iter()
            .enumerate()
            .map(|(i, spec)| decode_layer(i, spec, manifest, settings))
            .collect::<ZMergeResult<Vec<_>>>()
    })?;
    let resolution = check_resolutions(&layers)?;

    tracing::info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        %resolution,
        "layers loaded"
    );
    Ok(layers)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
