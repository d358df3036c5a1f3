//! Chart configuration tree
//!
//! Every section implements `Default` with the library defaults and is
//! `#[serde(default)]`, so a partial JSON document resolves once, at
//! construction, into a complete configuration. Hooks that cannot be
//! serialized (label formatters, `on_select`) are attached with builder methods.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    ChartError, Result, SelectType, SelectionRange, Series, SharedFormatter, Size, Spacing,
    ThemeKey, ThemeStyles, TickFormatter,
};

/// Line height factor applied to font sizes when measuring text rows
pub const LINE_HEIGHT: f64 = 1.2;

// ============================================================================
// TEXT
// ============================================================================

/// Horizontal text anchor (SVG `text-anchor`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Vertical text alignment (SVG `dominant-baseline`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantBaseline {
    Hanging,
    #[default]
    Middle,
    Baseline,
}

impl DominantBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hanging => "hanging",
            Self::Middle => "middle",
            Self::Baseline => "baseline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub font_weight: String,
    /// Falls back to the theme color when unset
    pub color: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_weight: "normal".to_string(),
            color: None,
        }
    }
}

impl TextStyle {
    /// Inline CSS for a text node
    pub fn css(&self) -> String {
        format!("font-size:{}px;font-weight:{};", self.font_size, self.font_weight)
    }

    /// Height of one text row
    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleConfig {
    pub enabled: bool,
    pub text: String,
    pub align: TextAnchor,
    pub vertical_align: DominantBaseline,
    pub background_color: String,
    pub spacing: Spacing,
    pub style: TextStyle,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: String::new(),
            align: TextAnchor::Middle,
            vertical_align: DominantBaseline::Middle,
            background_color: "transparent".to_string(),
            spacing: Spacing::new(5.0, 15.0, 5.0, 15.0),
            style: TextStyle {
                font_weight: "bold".to_string(),
                ..TextStyle::default()
            },
        }
    }
}

/// Stroke settings shared by axis lines and gridlines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub enabled: bool,
    /// Falls back to the theme color when unset
    pub color: Option<String>,
    pub width: f64,
    pub dasharray: Option<String>,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: None,
            width: 1.0,
            dasharray: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelsConfig {
    pub enabled: bool,
    /// Offset added to every label position
    pub x: f64,
    pub y: f64,
    pub align: TextAnchor,
    pub vertical_align: DominantBaseline,
    pub style: TextStyle,
    #[serde(skip)]
    pub formatter: Option<SharedFormatter>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            align: TextAnchor::Start,
            vertical_align: DominantBaseline::Middle,
            style: TextStyle {
                font_size: 12.0,
                ..TextStyle::default()
            },
            formatter: None,
        }
    }
}

/// Whether the y domain minimum is floored at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YBaseline {
    /// Always include zero (`min(domain.min, 0)`)
    #[default]
    Zero,
    /// Use the measured minimum, negative or positive
    DataMin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XAxisConfig {
    pub enabled: bool,
    pub ticks_amount: usize,
    pub spacing: Spacing,
    pub line: LineConfig,
    pub labels: LabelsConfig,
}

impl Default for XAxisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ticks_amount: 5,
            spacing: Spacing::new(5.0, 15.0, 30.0, 15.0),
            line: LineConfig::default(),
            labels: LabelsConfig {
                y: 20.0,
                vertical_align: DominantBaseline::Baseline,
                ..LabelsConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YAxisConfig {
    pub enabled: bool,
    pub ticks_amount: usize,
    pub spacing: Spacing,
    pub baseline: YBaseline,
    pub line: LineConfig,
    pub grid_line: LineConfig,
    pub labels: LabelsConfig,
}

impl Default for YAxisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ticks_amount: 5,
            spacing: Spacing::new(5.0, 15.0, 30.0, 15.0),
            baseline: YBaseline::Zero,
            line: LineConfig::default(),
            grid_line: LineConfig::default(),
            labels: LabelsConfig {
                y: -10.0,
                ..LabelsConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendConfig {
    pub enabled: bool,
    pub spacing: Spacing,
    pub item_width: f64,
    pub box_size: f64,
    pub style: TextStyle,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing: Spacing::new(8.0, 15.0, 8.0, 15.0),
            item_width: 120.0,
            box_size: 16.0,
            style: TextStyle {
                font_size: 14.0,
                ..TextStyle::default()
            },
        }
    }
}

impl LegendConfig {
    /// Vertical band reserved at the bottom of the chart, zero when disabled
    pub fn band_height(&self) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        self.spacing.vertical() + self.box_size.max(self.style.line_height())
    }
}

/// Host hook run on every accepted selection; may snap or replace the range
#[derive(Clone)]
pub struct SelectHook(
    pub Arc<dyn Fn(SelectionRange, &ChartConfig) -> Option<SelectionRange> + Send + Sync>,
);

impl SelectHook {
    pub fn new(
        hook: impl Fn(SelectionRange, &ChartConfig) -> Option<SelectionRange> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(hook))
    }

    pub fn call(&self, range: SelectionRange, config: &ChartConfig) -> Option<SelectionRange> {
        (self.0)(range, config)
    }
}

impl fmt::Debug for SelectHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectHook(..)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectAreaConfig {
    #[serde(rename = "type")]
    pub select_type: SelectType,
    /// Initial selection
    pub ranges: SelectionRange,
    pub spacing: Spacing,
    pub border_width: f64,
    pub border_color: Option<String>,
    pub overlay_color: Option<String>,
    pub overlay_opacity: f64,
    #[serde(skip)]
    pub on_select: Option<SelectHook>,
}

impl Default for SelectAreaConfig {
    fn default() -> Self {
        Self {
            select_type: SelectType::None,
            ranges: SelectionRange::full(),
            spacing: Spacing::new(5.0, 15.0, 5.0, 15.0),
            border_width: 6.0,
            border_color: None,
            overlay_color: None,
            overlay_opacity: 0.6,
            on_select: None,
        }
    }
}

/// Inset of the series drawing area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOptions {
    pub spacing: Spacing,
    pub stroke_width: f64,
}

impl Default for AreaOptions {
    fn default() -> Self {
        Self {
            spacing: Spacing::new(5.0, 15.0, 30.0, 15.0),
            stroke_width: 2.0,
        }
    }
}

// ============================================================================
// CHART CONFIG
// ============================================================================

/// Fully resolved chart configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub chart: ChartSection,
    pub title: TitleConfig,
    pub x_axis: XAxisConfig,
    pub y_axis: YAxisConfig,
    pub legend: LegendConfig,
    pub select_area: SelectAreaConfig,
    pub area_options: AreaOptions,
    pub series: Vec<Series>,
    pub theme: ThemeKey,
}

impl ChartConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            chart: ChartSection { width, height },
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON document, filling defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_series(mut self, series: Vec<Series>) -> Self {
        self.series = series;
        self
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title.enabled = true;
        self.title.text = text.into();
        self
    }

    pub fn without_title(mut self) -> Self {
        self.title.enabled = false;
        self
    }

    pub fn without_axes(mut self) -> Self {
        self.x_axis.enabled = false;
        self.y_axis.enabled = false;
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.legend.enabled = false;
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_area_spacing(mut self, spacing: Spacing) -> Self {
        self.area_options.spacing = spacing;
        self
    }

    pub fn with_select_area(mut self, select_type: SelectType, ranges: SelectionRange) -> Self {
        self.select_area.select_type = select_type;
        self.select_area.ranges = ranges;
        self
    }

    pub fn with_on_select(
        mut self,
        hook: impl Fn(SelectionRange, &ChartConfig) -> Option<SelectionRange> + Send + Sync + 'static,
    ) -> Self {
        self.select_area.on_select = Some(SelectHook::new(hook));
        self
    }

    pub fn with_x_formatter(mut self, formatter: impl TickFormatter + 'static) -> Self {
        self.x_axis.labels.formatter = Some(SharedFormatter::new(formatter));
        self
    }

    pub fn with_y_formatter(mut self, formatter: impl TickFormatter + 'static) -> Self {
        self.y_axis.labels.formatter = Some(SharedFormatter::new(formatter));
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.chart.width, self.chart.height)
    }

    /// Chart surface minus the legend band
    pub fn plot_size(&self) -> Size {
        Size::new(self.chart.width, self.chart.height - self.legend.band_height())
    }

    pub fn styles(&self) -> ThemeStyles {
        self.theme.styles()
    }

    /// Series color, falling back to the theme line color for its position
    pub fn series_color(&self, index: usize) -> String {
        match self.series.get(index) {
            Some(s) if !s.color.is_empty() => s.color.clone(),
            _ => self.styles().line(index).to_string(),
        }
    }

    /// Reject configurations no layout pass can recover from
    pub fn validate(&self) -> Result<()> {
        let ChartSection { width, height } = self.chart;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ChartError::invalid_input(format!(
                "chart size must be finite and positive, got {width}x{height}"
            )));
        }
        if self.x_axis.ticks_amount == 0 || self.y_axis.ticks_amount == 0 {
            return Err(ChartError::invalid_input("ticksAmount must be at least 1"));
        }
        for series in &self.series {
            if let Some(p) = series.data.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
                return Err(ChartError::invalid_input(format!(
                    "series \"{}\" has a non-finite point ({}, {})",
                    series.name, p.x, p.y
                )));
            }
        }
        if !self.select_area.ranges.is_valid() {
            return Err(ChartError::OutOfBoundsSelection(self.select_area.ranges));
        }
        Ok(())
    }
}
