//! Day/night color tables

use serde::{Deserialize, Serialize};

use crate::colors;

/// Active color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKey {
    Day,
    #[default]
    Night,
}

impl ThemeKey {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }

    pub fn styles(&self) -> ThemeStyles {
        match self {
            Self::Day => ThemeStyles::day(),
            Self::Night => ThemeStyles::night(),
        }
    }

    /// Caption for the switch control, naming the mode it switches to
    pub fn switch_label(&self) -> &'static str {
        match self {
            Self::Day => "Switch to Night Mode",
            Self::Night => "Switch to Day Mode",
        }
    }
}

/// Colors every chart component reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyles {
    pub main_font: &'static str,
    pub main_background: &'static str,
    pub line1: &'static str,
    pub line2: &'static str,
    pub x_labels: &'static str,
    pub y_labels: &'static str,
    pub x_axis_line: &'static str,
    pub y_axis_line: &'static str,
    pub x_cursor_line: &'static str,
    pub y_cursor_line: &'static str,
    pub select_frame_borders: &'static str,
    pub select_frame_out_overlay: &'static str,
}

impl ThemeStyles {
    pub const fn day() -> Self {
        Self {
            main_font: colors::BLACK,
            main_background: colors::WHITE,
            line1: colors::GREEN,
            line2: colors::RED,
            x_labels: colors::DARK_GREY,
            y_labels: colors::DARK_GREY,
            x_axis_line: colors::LIGHT_GREY,
            y_axis_line: colors::LIGHT_GREY,
            x_cursor_line: colors::REGULAR_GREY,
            y_cursor_line: colors::REGULAR_GREY,
            select_frame_borders: colors::LIGHT_BLUE,
            select_frame_out_overlay: colors::REGULAR_GREY,
        }
    }

    pub const fn night() -> Self {
        Self {
            main_font: colors::WHITE,
            main_background: colors::DARK_BLUE,
            x_axis_line: colors::NIGHT_GRID,
            y_axis_line: colors::NIGHT_GRID,
            select_frame_out_overlay: colors::NIGHT_OVERLAY,
            ..Self::day()
        }
    }

    /// Line color for the n-th series, cycling through the theme lines
    pub fn line(&self, index: usize) -> &'static str {
        if index % 2 == 0 { self.line1 } else { self.line2 }
    }
}

impl Default for ThemeStyles {
    fn default() -> Self {
        ThemeKey::default().styles()
    }
}
