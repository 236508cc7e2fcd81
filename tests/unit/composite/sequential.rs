use super::*;
use crate::foundation::core::Resolution;

fn e(rgb: [f32; 3], a: f32, mode: BlendMode) -> PixelEntry {
    PixelEntry::new([rgb[0], rgb[1], rgb[2], a], 0.0, mode)
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix64(self.0)
    }

    fn unit(&mut self) -> f32 {
        (self.next() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn entry(&mut self) -> PixelEntry {
        let a = match self.next() % 4 {
            0 => 0.0,
            1 => 1.0,
            _ => self.unit(),
        };
        let mode = BlendMode::ALL[(self.next() % 3) as usize];
        PixelEntry::new([self.unit(), self.unit(), self.unit(), a], self.unit(), mode)
    }
}

#[test]
fn fully_transparent_stack_is_zero() {
    let mut stack = [
        e([0.3, 0.6, 0.9], 0.0, BlendMode::Normal),
        e([1.0, 1.0, 1.0], 0.0, BlendMode::Screen),
    ];
    assert_eq!(composite_stack(&mut stack), None);
    assert_eq!(stack[0].rgba, [0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn first_relevant_index_rules() {
    let idx = |stack: &[PixelEntry]| {
        first_relevant_index(stack.len(), |i| (stack[i].alpha(), stack[i].mode))
    };
    let n = BlendMode::Normal;
    let m = BlendMode::Multiply;

    // opaque normal occludes the rest
    assert_eq!(
        idx(&[e([0.0; 3], 0.5, n), e([0.0; 3], 1.0, n), e([0.0; 3], 0.5, n)]),
        Some(1)
    );
    // transparent tail is irrelevant
    assert_eq!(
        idx(&[e([0.0; 3], 0.5, n), e([0.0; 3], 0.5, n), e([0.0; 3], 0.0, n)]),
        Some(1)
    );
    // opaque multiply does not occlude
    assert_eq!(idx(&[e([0.0; 3], 1.0, m), e([0.0; 3], 0.5, n)]), Some(1));
    // transparent near entries do not stop the scan
    assert_eq!(
        idx(&[e([0.0; 3], 0.0, n), e([0.0; 3], 0.0, n), e([0.0; 3], 0.3, m)]),
        Some(2)
    );
    assert_eq!(idx(&[e([0.0; 3], 1.0, n), e([0.0; 3], 1.0, n)]), Some(0));
    assert_eq!(idx(&[e([0.0; 3], 0.7, m)]), Some(0));
    assert_eq!(idx(&[e([0.0; 3], 0.0, n)]), None);
    assert_eq!(idx(&[]), None);
}

#[test]
fn three_layer_scenario() {
    let mut stack = [
        PixelEntry::new([1.0, 0.0, 0.0, 1.0], 0.9, BlendMode::Normal),
        PixelEntry::new([0.0, 1.0, 0.0, 0.5], 0.5, BlendMode::Normal),
        PixelEntry::new([0.0, 0.0, 1.0, 0.5], 0.1, BlendMode::Normal),
    ];
    sort_stack(&mut stack, DepthOrder::NearIsSmall);
    let zs: Vec<f32> = stack.iter().map(|p| p.z).collect();
    assert_eq!(zs, vec![0.1, 0.5, 0.9]);

    assert_eq!(composite_stack(&mut stack), Some(2));
    assert_eq!(stack[0].rgba, [0.25, 0.25, 0.5, 1.0]);
}

#[test]
fn single_layer_is_identity_for_every_mode() {
    for mode in BlendMode::ALL {
        let px = [0.2, 0.4, 0.6, 0.8];
        let mut stack = [PixelEntry::new(px, 0.5, mode)];
        assert_eq!(composite_stack(&mut stack), Some(0));
        assert_eq!(stack[0].rgba, px);
    }
}

#[test]
fn two_layer_normal_reduction() {
    let mut stack = [
        e([0.0, 0.0, 1.0], 0.25, BlendMode::Normal),
        e([1.0, 0.0, 0.0], 0.5, BlendMode::Normal),
    ];
    composite_stack(&mut stack);
    assert_eq!(stack[0].rgba[3], 0.25 + 0.5 * (1.0 - 0.25));

    let near = [0.1, 0.7, 0.3];
    let mut stack = [
        e(near, 1.0, BlendMode::Normal),
        e([1.0, 0.0, 0.0], 0.5, BlendMode::Normal),
    ];
    composite_stack(&mut stack);
    assert_eq!(stack[0].rgba, [near[0], near[1], near[2], 1.0]);
}

#[test]
fn opaque_multiply_and_screen_blend_with_what_is_behind() {
    let mut stack = [
        e([0.5, 0.5, 0.5], 1.0, BlendMode::Multiply),
        e([0.5, 1.0, 0.0], 1.0, BlendMode::Normal),
    ];
    assert_eq!(composite_stack(&mut stack), Some(1));
    assert_eq!(stack[0].rgba, [0.25, 0.5, 0.0, 1.0]);

    let mut stack = [
        e([0.5, 0.5, 0.5], 1.0, BlendMode::Screen),
        e([0.5, 1.0, 0.0], 0.5, BlendMode::Normal),
    ];
    assert_eq!(composite_stack(&mut stack), Some(1));
    // alpha: 1 + 0.5 * 0; color: (1 - 0.5) * d + 0.5 * (s + d - s * d)
    assert_eq!(stack[0].rgba, [0.625, 0.75, 0.5, 1.0]);
}

#[test]
fn far_entries_behind_opaque_normal_never_matter() {
    let mut rng = Rng(7);
    for _ in 0..500 {
        let k = 2 + (rng.next() % 6) as usize;
        let occluder = (rng.next() % k as u64) as usize;
        let mut base: Vec<PixelEntry> = (0..k).map(|_| rng.entry()).collect();
        base[occluder].rgba[3] = 1.0;
        base[occluder].mode = BlendMode::Normal;

        let mut altered = base.clone();
        for entry in altered.iter_mut().skip(occluder + 1) {
            *entry = rng.entry();
        }
        let mut truncated = base[..=occluder].to_vec();

        let mut a = base.clone();
        composite_stack(&mut a);
        composite_stack(&mut altered);
        composite_stack(&mut truncated);

        let bits = |p: Rgba| p.map(f32::to_bits);
        assert_eq!(bits(a[0].rgba), bits(altered[0].rgba));
        assert_eq!(bits(a[0].rgba), bits(truncated[0].rgba));
    }
}

#[test]
fn sequential_stacks_report_stats() {
    let n = BlendMode::Normal;
    let entries = vec![
        // pixel 0: near half alpha over opaque, third entry occluded
        PixelEntry::new([0.0, 0.0, 1.0, 0.5], 0.1, n),
        PixelEntry::new([1.0, 0.0, 0.0, 1.0], 0.5, n),
        PixelEntry::new([0.0, 1.0, 0.0, 1.0], 0.9, n),
        // pixel 1: fully transparent
        PixelEntry::new([0.5, 0.5, 0.5, 0.0], 0.1, n),
        PixelEntry::new([0.5, 0.5, 0.5, 0.0], 0.2, n),
        PixelEntry::new([0.5, 0.5, 0.5, 0.0], 0.3, n),
    ];
    let mut stacks = PixelStacks::from_entries(Resolution::new(2, 1), 3, entries).unwrap();
    let (pixels, stats) = composite_stacks_sequential(&mut stacks, DepthOrder::NearIsSmall);

    assert_eq!(pixels[0], [0.5, 0.0, 0.5, 1.0]);
    assert_eq!(pixels[1], [0.0; 4]);
    assert_eq!(
        stats,
        CompositeStats {
            pixels: 2,
            transparent_pixels: 1,
            blend_steps: 1,
            skipped_entries: 4,
        }
    );
}
