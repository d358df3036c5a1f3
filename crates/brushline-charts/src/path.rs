//! SVG path generation
//!
//! Data y grows upward while SVG y grows downward, so every projection flips
//! against the content box bottom.

use std::fmt::{self, Write};

use brushline_core::{BoxCoords, DataPoint, Domain, IndexWindow, Series};

use crate::domain::slice_window;

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Continuous polyline: `M x0,y0 L x1,y1 ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::with_capacity(points.len() * 16).move_to(x, y);
        for &(x, y) in rest {
            builder = builder.line_to(x, y);
        }
        builder.build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: String::with_capacity(capacity),
        }
    }

    fn push(mut self, command: fmt::Arguments<'_>) -> Self {
        if !self.commands.is_empty() {
            self.commands.push(' ');
        }
        let _ = self.commands.write_fmt(command);
        self
    }

    pub fn move_to(self, x: f64, y: f64) -> Self {
        self.push(format_args!("M{:.2},{:.2}", x, y))
    }

    pub fn line_to(self, x: f64, y: f64) -> Self {
        self.push(format_args!("L{:.2},{:.2}", x, y))
    }

    pub fn horizontal_to(self, x: f64) -> Self {
        self.push(format_args!("H{:.2}", x))
    }

    pub fn vertical_to(self, y: f64) -> Self {
        self.push(format_args!("V{:.2}", y))
    }

    pub fn close(self) -> Self {
        self.push(format_args!("Z"))
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// SERIES PATHS
// ============================================================================

/// Pixel position of a data point.
///
/// A degenerate x domain collapses onto the box centerline and a degenerate
/// y domain onto the box bottom.
pub fn project_point(point: &DataPoint, domain_x: Domain, domain_y: Domain, content: &BoxCoords) -> (f64, f64) {
    let x = match domain_x.normalize(point.x) {
        Some(t) => content.x1 + content.inner_width * t,
        None => content.center_x(),
    };
    let y = match domain_y.normalize(point.y) {
        Some(t) => content.y2 - content.inner_height * t,
        None => content.y2,
    };
    (x, y)
}

/// Polyline through the (windowed) points of a series
pub fn build_path(
    series: &Series,
    domain_x: Domain,
    domain_y: Domain,
    content: &BoxCoords,
    window: Option<IndexWindow>,
) -> String {
    let points: Vec<(f64, f64)> = slice_window(&series.data, window)
        .iter()
        .map(|p| project_point(p, domain_x, domain_y, content))
        .collect();
    LinePath.generate(&points)
}
