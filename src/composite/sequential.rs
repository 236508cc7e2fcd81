use crate::{
    composite::{
        blend::combine,
        engine::CompositeStats,
        sort::sort_stack,
        stack::{PixelEntry, PixelStacks},
    },
    foundation::core::{BlendMode, DepthOrder, Rgba},
};

/// Index of the farthest entry that can still affect a sorted stack's result.
///
/// `entry(i)` yields `(alpha, mode)` of the `i`-th nearest entry. Scanning from the nearest,
/// the scan stops at the first `i` where either nothing farther has nonzero alpha, or entry `i`
/// is an opaque `Normal` layer that hides everything behind it.
///
/// Returns `None` when every entry is fully transparent.
pub fn first_relevant_index(
    len: usize,
    entry: impl Fn(usize) -> (f32, BlendMode),
) -> Option<usize> {
    let last_visible = (0..len).rev().find(|&i| entry(i).0 != 0.0)?;
    (0..last_visible)
        .find(|&i| matches!(entry(i), (a, BlendMode::Normal) if a == 1.0))
        .or(Some(last_visible))
}

/// Composite one depth-sorted stack in place.
///
/// On return `stack[0].rgba` holds the pixel; the other entries up to the first relevant
/// index have been consumed. A fully transparent stack yields `[0, 0, 0, 0]`.
///
/// Returns the first relevant index, or `None` for a fully transparent stack.
pub fn composite_stack(stack: &mut [PixelEntry]) -> Option<usize> {
    let Some(first) = first_relevant_index(stack.len(), |i| (stack[i].alpha(), stack[i].mode))
    else {
        if let Some(top) = stack.first_mut() {
            top.rgba = [0.0; 4];
        }
        return None;
    };

    for j in (1..=first).rev() {
        let src = stack[j].rgba;
        let dst = &mut stack[j - 1];
        dst.rgba = combine(src, dst.rgba, dst.mode);
    }
    Some(first)
}

/// Sort and composite every stack on the calling thread.
///
/// Consumes the arena's contents; returns one color per pixel in row-major order.
#[tracing::instrument(skip(stacks), fields(pixels = stacks.len(), layers = stacks.depth()))]
pub fn composite_stacks_sequential(
    stacks: &mut PixelStacks,
    order: DepthOrder,
) -> (Vec<Rgba>, CompositeStats) {
    let depth = stacks.depth();
    let mut out = Vec::with_capacity(stacks.len());
    let mut stats = CompositeStats::default();

    for stack in stacks.iter_mut() {
        sort_stack(stack, order);
        let first = composite_stack(stack);
        stats.record(depth, first);
        out.push(stack[0].rgba);
    }
    (out, stats)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/sequential.rs"]
mod tests;
