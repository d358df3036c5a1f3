//! Normalized brush selection

use serde::{Deserialize, Serialize};

use crate::IndexWindow;

/// User-adjustable sub-window, every coordinate in `[0, 1]`.
///
/// Valid ranges satisfy `0 <= x1 <= x2 <= 1` and `0 <= y1 <= y2 <= 1`.
/// `y1` is the top edge in screen order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SelectionRange {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whole domain on both axes
    pub const fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn is_valid(&self) -> bool {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        unit(self.x1)
            && unit(self.x2)
            && unit(self.y1)
            && unit(self.y2)
            && self.x1 <= self.x2
            && self.y1 <= self.y2
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Horizontal extent as an index window for data slicing
    pub fn x_window(&self) -> IndexWindow {
        IndexWindow::new(self.x1, self.x2)
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Which axes of the selection area can be dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectType {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "xy")]
    XY,
}

impl SelectType {
    pub fn zooms_x(&self) -> bool {
        matches!(self, Self::X | Self::XY)
    }

    pub fn zooms_y(&self) -> bool {
        matches!(self, Self::Y | Self::XY)
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}
