//! Series data and the domains derived from it

use serde::{Deserialize, Serialize};

use crate::{ChartError, Result};

// ============================================================================
// DATA POINT / SERIES
// ============================================================================

/// Single sample of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, meta: None }
    }

    /// Value of the requested field
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
        }
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Named line series. `data` is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub name: String,
    /// Empty picks the theme's line color for the series index
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub data: Vec<DataPoint>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Series {
    pub fn new(name: impl Into<String>, color: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            data,
            visible: true,
        }
    }

    /// Build from `(x, y)` pairs
    pub fn from_pairs(name: impl Into<String>, color: impl Into<String>, pairs: &[(f64, f64)]) -> Self {
        Self::new(name, color, pairs.iter().copied().map(DataPoint::from).collect())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Data field a domain is measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    X,
    Y,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

/// Numeric `[min, max]` range of a field. Derived per layout pass, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Span, or `DegenerateDomain` when it cannot be divided by
    pub fn checked_span(&self, field: Field) -> Result<f64> {
        if self.is_degenerate() {
            return Err(ChartError::DegenerateDomain { field: field.label() });
        }
        Ok(self.span())
    }

    /// Normalized position of `value` inside the domain, `None` when degenerate
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if self.is_degenerate() {
            None
        } else {
            Some((value - self.min) / self.span())
        }
    }

    /// Same domain with the minimum floored at zero
    pub fn floored_at_zero(self) -> Self {
        Self::new(self.min.min(0.0), self.max)
    }
}

/// Horizontal extent of a selection, used to slice series data by index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexWindow {
    pub start_frac: f64,
    pub end_frac: f64,
}

impl IndexWindow {
    pub const fn new(start_frac: f64, end_frac: f64) -> Self {
        Self { start_frac, end_frac }
    }

    pub const fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Index bounds `[floor(len*start), round(len*end)+1)` clamped to `len`.
    ///
    /// The `+1` keeps the boundary point so a truncated window still draws
    /// a connecting point at its edge. `start` never passes the last index, so
    /// a non-empty series always yields at least one point.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let n = len as f64;
        let start = ((n * self.start_frac).floor().max(0.0) as usize).min(len.saturating_sub(1));
        let end = (((n * self.end_frac).round().max(0.0) as usize) + 1).min(len);
        (start, end.max(start))
    }
}
