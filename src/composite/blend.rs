use crate::foundation::core::{BlendMode, Rgba};

/// Composite a nearer color `dst` (carrying `mode`) over a farther color `src`.
///
/// ```text
/// a   = dst.a + src.a * (1 - dst.a)
/// f   = dst.rgb                            (normal)
///     | src.rgb * dst.rgb                  (multiply)
///     | src.rgb + dst.rgb - src.rgb*dst.rgb (screen)
/// rgb = (1 - dst.a/a) * src.rgb + (dst.a/a) * ((1 - src.a) * dst.rgb + src.a * f)
/// ```
///
/// With `mode == Normal` this is Porter-Duff "over". When the resulting alpha is zero the
/// color is zero as well. Inputs are not clamped.
///
/// Both operands are taken by value and the result is returned whole, so every channel of
/// one step reads the same accumulator snapshot.
#[inline]
pub fn combine(src: Rgba, dst: Rgba, mode: BlendMode) -> Rgba {
    let (sa, da) = (src[3], dst[3]);
    let out_a = da + sa * (1.0 - da);
    if out_a == 0.0 {
        return [0.0, 0.0, 0.0, out_a];
    }

    let w = da / out_a;
    let mut out = [0.0, 0.0, 0.0, out_a];
    for c in 0..3 {
        let (s, d) = (src[c], dst[c]);
        let f = match mode {
            BlendMode::Normal => d,
            BlendMode::Multiply => s * d,
            BlendMode::Screen => s + d - s * d,
        };
        out[c] = (1.0 - w) * s + w * ((1.0 - sa) * d + sa * f);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
