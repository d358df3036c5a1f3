//! Pixel geometry shared by every layout pass.

use serde::{Deserialize, Serialize};

/// Four-sided pixel inset used to carve a box out of a larger box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Spacing {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, left, right, bottom }
    }

    pub const fn uniform(spacing: f64) -> Self {
        Self::new(spacing, spacing, spacing, spacing)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub const fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Total horizontal inset (left + right)
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom)
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Outer dimensions of a surface or sub-region
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Absolute pixel rectangle produced by insetting an outer box.
///
/// `x2 == x1 + inner_width` and `y2 == y1 + inner_height` always hold.
/// Inner dimensions may be negative for malformed spacing; nothing here clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxCoords {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl BoxCoords {
    /// Build from edges, deriving the inner dimensions
    pub fn from_edges(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            inner_width: x2 - x1,
            inner_height: y2 - y1,
        }
    }

    /// Build from origin and size
    pub fn from_origin(x1: f64, y1: f64, width: f64, height: f64) -> Self {
        Self::from_edges(x1, y1, x1 + width, y1 + height)
    }

    pub const fn zero() -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            inner_width: 0.0,
            inner_height: 0.0,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x1 + self.inner_width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y1 + self.inner_height / 2.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}
