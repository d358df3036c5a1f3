//! # brushline-core
//!
//! Core domain types for brushline charts.
//! Implements Strategy pattern for tick label formatting.
//!
//! ## Modules
//!
//! - `geometry` - spacing insets, sizes and absolute boxes
//! - `series` - data points, series, domains and index windows
//! - `selection` - normalized brush ranges
//! - `config` - the chart configuration tree and its defaults
//! - `format` - tick formatters
//! - `theme` - day/night color tables
//! - `data` - columnar chart data loader

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod geometry;
pub mod selection;
pub mod series;
pub mod theme;

pub use config::*;
pub use data::*;
pub use error::*;
pub use format::*;
pub use geometry::*;
pub use selection::*;
pub use series::*;
pub use theme::*;

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const BLACK: &str = "#222222";
    pub const WHITE: &str = "#ffffff";
    pub const GREEN: &str = "#3cc23f";
    pub const RED: &str = "#f34c44";
    pub const DARK_GREY: &str = "#96a2aa";
    pub const REGULAR_GREY: &str = "#dfe6eb";
    pub const LIGHT_GREY: &str = "#f2f4f5";
    pub const LIGHT_BLUE: &str = "#c0d1e1";
    pub const DARK_BLUE: &str = "#242f3e";
    pub const NIGHT_GRID: &str = "#293544";
    pub const NIGHT_OVERLAY: &str = "#1f2a38";
    pub const TRANSPARENT: &str = "transparent";

    /// Hex color with an alpha channel as `rgba()`; unparsable input is returned unchanged
    pub fn with_alpha(hex: &str, alpha: f64) -> String {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return hex.to_string();
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => format!("rgba({}, {}, {}, {:.2})", r, g, b, alpha),
            _ => hex.to_string(),
        }
    }
}
