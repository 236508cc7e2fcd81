use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::{
    composite::stack::{PixelEntry, PixelStacks},
    foundation::core::DepthOrder,
};

/// Stack permutation, inline for typical layer counts.
pub type StackOrder = SmallVec<[usize; 8]>;

fn nearer_first(a: &PixelEntry, b: &PixelEntry, order: DepthOrder) -> Ordering {
    match order {
        DepthOrder::NearIsSmall => a.z.total_cmp(&b.z),
        DepthOrder::FarIsSmall => b.z.total_cmp(&a.z),
    }
}

/// Reorder one stack so index 0 is the nearest entry.
///
/// The sort is stable: entries at equal depth keep their layer input order.
pub fn sort_stack(stack: &mut [PixelEntry], order: DepthOrder) {
    stack.sort_by(|a, b| nearer_first(a, b, order));
}

/// Nearest-first permutation of a stack, leaving the stack itself untouched.
///
/// `stack[sorted_order(stack, o)[i]]` equals `sort_stack`'s element `i`.
pub fn sorted_order(stack: &[PixelEntry], order: DepthOrder) -> StackOrder {
    let mut idx: StackOrder = (0..stack.len()).collect();
    idx.sort_by(|&a, &b| nearer_first(&stack[a], &stack[b], order));
    idx
}

/// Sort every stack in the arena.
#[tracing::instrument(skip(stacks), fields(pixels = stacks.len()))]
pub fn sort_stacks(stacks: &mut PixelStacks, order: DepthOrder) {
    for stack in stacks.iter_mut() {
        sort_stack(stack, order);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/sort.rs"]
mod tests;
