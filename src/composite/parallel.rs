use rayon::prelude::*;

use crate::{
    composite::{
        blend::combine,
        engine::CompositeStats,
        sequential::first_relevant_index,
        sort::sorted_order,
        stack::{PixelEntry, PixelStacks},
    },
    foundation::core::{DepthOrder, Rgba},
};

/// Composite one unsorted stack without mutating it.
///
/// Entries are visited through a nearest-first permutation and folded far-to-near into a
/// register accumulator. The same early-exit rule and blend operator as
/// [`composite_stack`](crate::composite_stack) are applied in the same order, so the result is
/// bit-identical to sorting the stack and compositing it in place.
pub fn composite_pixel(stack: &[PixelEntry], order: DepthOrder) -> (Rgba, Option<usize>) {
    let perm = sorted_order(stack, order);
    let at = |i: usize| &stack[perm[i]];

    let Some(first) = first_relevant_index(perm.len(), |i| (at(i).alpha(), at(i).mode)) else {
        return ([0.0; 4], None);
    };

    let mut acc = at(first).rgba;
    for j in (0..first).rev() {
        let dst = at(j);
        acc = combine(acc, dst.rgba, dst.mode);
    }
    (acc, Some(first))
}

/// Composite every stack on `pool`, one task per run of at least `chunk_pixels` pixels.
///
/// Pixels are independent; the fold inside each pixel stays sequential.
#[tracing::instrument(skip(stacks, pool), fields(pixels = stacks.len(), layers = stacks.depth()))]
pub fn composite_stacks_parallel(
    stacks: &PixelStacks,
    order: DepthOrder,
    chunk_pixels: usize,
    pool: &rayon::ThreadPool,
) -> (Vec<Rgba>, CompositeStats) {
    let depth = stacks.depth();
    let results: Vec<(Rgba, Option<usize>)> = pool.install(|| {
        stacks
            .entries()
            .par_chunks_exact(depth)
            .with_min_len(chunk_pixels.max(1))
            .map(|stack| composite_pixel(stack, order))
            .collect()
    });

    let mut stats = CompositeStats::default();
    let mut out = Vec::with_capacity(results.len());
    for (rgba, first) in results {
        stats.record(depth, first);
        out.push(rgba);
    }
    (out, stats)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/parallel.rs"]
mod tests;
