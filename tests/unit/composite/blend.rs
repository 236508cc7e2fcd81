use super::*;

#[test]
fn normal_opaque_dst_replaces_src() {
    let src = [1.0, 0.0, 0.0, 1.0];
    let dst = [0.0, 0.25, 0.5, 1.0];
    assert_eq!(combine(src, dst, BlendMode::Normal), dst);
}

#[test]
fn normal_is_over_for_half_alpha() {
    let src = [1.0, 0.0, 0.0, 1.0];
    let dst = [0.0, 1.0, 0.0, 0.5];
    assert_eq!(
        combine(src, dst, BlendMode::Normal),
        [0.5, 0.5, 0.0, 1.0]
    );
}

#[test]
fn alpha_follows_over_for_every_mode() {
    let src = [0.5, 0.5, 0.5, 0.5];
    let dst = [0.5, 0.5, 0.5, 0.5];
    for mode in BlendMode::ALL {
        assert_eq!(combine(src, dst, mode)[3], 0.75);
    }
}

#[test]
fn multiply_with_opaque_operands_is_product() {
    let src = [0.5, 1.0, 0.0, 1.0];
    let dst = [0.5, 0.5, 0.5, 1.0];
    assert_eq!(
        combine(src, dst, BlendMode::Multiply),
        [0.25, 0.5, 0.0, 1.0]
    );
}

#[test]
fn screen_with_opaque_operands_is_inverted_product() {
    let src = [0.5, 1.0, 0.0, 1.0];
    let dst = [0.5, 0.5, 0.5, 1.0];
    assert_eq!(
        combine(src, dst, BlendMode::Screen),
        [0.75, 1.0, 0.5, 1.0]
    );
}

#[test]
fn mode_color_is_weighted_by_src_alpha() {
    // opaque dst over half-transparent src: (1 - sa) * d + sa * f
    let src = [0.5, 0.5, 0.5, 0.5];
    let dst = [0.5, 0.5, 0.5, 1.0];
    assert_eq!(
        combine(src, dst, BlendMode::Multiply),
        [0.375, 0.375, 0.375, 1.0]
    );
    assert_eq!(
        combine(src, dst, BlendMode::Screen),
        [0.625, 0.625, 0.625, 1.0]
    );
}

#[test]
fn transparent_dst_passes_src_through() {
    let src = [0.25, 0.5, 0.75, 0.5];
    let dst = [1.0, 1.0, 1.0, 0.0];
    for mode in BlendMode::ALL {
        assert_eq!(combine(src, dst, mode), src);
    }
}

#[test]
fn zero_alpha_pair_yields_zero() {
    let src = [0.3, 0.6, 0.9, 0.0];
    let dst = [0.9, 0.6, 0.3, 0.0];
    for mode in BlendMode::ALL {
        assert_eq!(combine(src, dst, mode), [0.0, 0.0, 0.0, 0.0]);
    }
}

#[test]
fn out_of_range_inputs_are_not_clamped() {
    let src = [2.0, 0.0, 0.0, 1.0];
    let dst = [0.0, 0.0, 0.0, 0.0];
    assert_eq!(combine(src, dst, BlendMode::Normal)[0], 2.0);
}
