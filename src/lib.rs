//! zmerge composites depth-annotated render passes into a single RGBA image.
//!
//! Every input layer carries a color pass, a depth (Z) pass and one layer-wide blend mode.
//! Instead of a fixed draw order, visibility is resolved per pixel from the depth values, so
//! separately rendered passes of the same 3-D scene merge back together correctly.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `Manifest -> Vec<Layer>` (decode color + depth, normalize to `[0, 1]`)
//! 2. **Stack**: `&[Layer] -> PixelStacks` (one entry per layer at every pixel position)
//! 3. **Sort**: each stack ordered by depth, nearest first, ties kept in layer order
//! 4. **Composite**: far-to-near fold of each stack with a mode-dependent blend operator
//! 5. **Write** (optional): quantize to 8- or 16-bit RGBA and encode with `image`
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pixel independence**: no state is shared across pixel positions, so the parallel engine
//!   needs no locks and produces the same bits as the sequential one.
//! - **No clamping in the core**: out-of-range inputs propagate; only the encoder clamps.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod composite;
mod foundation;
mod layer;

pub use assets::decode::{decode_color, decode_depth, expand_depth};
pub use assets::encode::{BitDepth, quantize_channel, write_image};
pub use assets::load::{decode_layer, load_layers};
pub use composite::blend::combine;
pub use composite::engine::{
    CompositeStats, CompositeThreading, MergeSettings, composite, composite_with_stats,
};
pub use composite::output::CompositeImage;
pub use composite::parallel::{composite_pixel, composite_stacks_parallel};
pub use composite::sequential::{
    composite_stack, composite_stacks_sequential, first_relevant_index,
};
pub use composite::sort::{sort_stack, sort_stacks, sorted_order};
pub use composite::stack::{PixelEntry, PixelStacks, check_resolutions};
pub use foundation::core::{BlendMode, DepthOrder, Resolution, Rgba};
pub use foundation::error::{ZMergeError, ZMergeResult};
pub use layer::manifest::{LayerSpec, Manifest, ModeId};
pub use layer::model::{Layer, LayerSample};
