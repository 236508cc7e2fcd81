use std::{fmt, str::FromStr};

use crate::foundation::error::{ZMergeError, ZMergeResult};

/// Straight `[r, g, b, a]` color with channels nominally in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Pixel dimensions shared by every layer of a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a resolution from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixel positions (`width * height`).
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Row-major linear index of `(x, y)`, or `None` when out of bounds.
    pub fn index_of(self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Layer-wide blend mode applied when a layer is composited over what lies behind it.
///
/// Numeric identifiers are fixed: `Normal = 0`, `Multiply = 1`, `Screen = 2`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain "over": the nearer color replaces what is behind, weighted by alpha.
    #[default]
    Normal,
    /// Component-wise product of nearer and farther color.
    Multiply,
    /// Inverted product of inverted colors, `s + d - s * d`.
    Screen,
}

impl BlendMode {
    /// All supported modes in identifier order.
    pub const ALL: [BlendMode; 3] = [BlendMode::Normal, BlendMode::Multiply, BlendMode::Screen];

    /// Stable numeric identifier.
    pub fn id(self) -> u8 {
        match self {
            BlendMode::Normal => 0,
            BlendMode::Multiply => 1,
            BlendMode::Screen => 2,
        }
    }

    /// Resolve a numeric identifier.
    pub fn from_id(id: u8) -> ZMergeResult<Self> {
        match id {
            0 => Ok(BlendMode::Normal),
            1 => Ok(BlendMode::Multiply),
            2 => Ok(BlendMode::Screen),
            other => Err(ZMergeError::invalid_mode(format!(
                "unknown mode id {other} (expected 0, 1 or 2)"
            ))),
        }
    }

    /// Lowercase mode name.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
        }
    }
}

impl TryFrom<u8> for BlendMode {
    type Error = ZMergeError;

    fn try_from(id: u8) -> ZMergeResult<Self> {
        Self::from_id(id)
    }
}

impl FromStr for BlendMode {
    type Err = ZMergeError;

    fn from_str(s: &str) -> ZMergeResult<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id);
        }
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ZMergeError::invalid_mode(format!("unknown mode name '{s}'")))
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// How depth values map to distance from the viewer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DepthOrder {
    /// Smaller Z is nearer; stacks sort by ascending Z.
    #[default]
    NearIsSmall,
    /// Larger Z is nearer (inverted depth pass); stacks sort by descending Z.
    FarIsSmall,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
