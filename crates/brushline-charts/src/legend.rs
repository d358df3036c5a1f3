//! Legend entries laid out left to right below the plot area

use brushline_core::{BoxCoords, ChartConfig, Result, colors};
use brushline_state::LegendMap;

use crate::path::PathBuilder;
use crate::scene::{Attrs, NodeId, SceneHost, ShapeKind};

/// Gap between checkbox and label
const LABEL_GAP: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntryLayout {
    pub name: String,
    pub color: String,
    pub checkbox: BoxCoords,
    pub check: String,
    pub label_x: f64,
    pub label_y: f64,
    /// Clickable region of the entry
    pub hit: BoxCoords,
}

pub fn layout_legend(config: &ChartConfig) -> Vec<LegendEntryLayout> {
    let legend = &config.legend;
    if !legend.enabled {
        return Vec::new();
    }

    let row_height = legend.box_size.max(legend.style.line_height());
    let top = config.plot_size().height + legend.spacing.top;
    let b = legend.box_size;

    config
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let x = legend.spacing.left + i as f64 * legend.item_width;
            let checkbox = BoxCoords::from_origin(x, top + (row_height - b) / 2.0, b, b);
            let check = PathBuilder::new()
                .move_to(checkbox.x1 + 0.2 * b, checkbox.y1 + 0.5 * b)
                .line_to(checkbox.x1 + 0.42 * b, checkbox.y1 + 0.72 * b)
                .line_to(checkbox.x1 + 0.8 * b, checkbox.y1 + 0.3 * b)
                .build();

            LegendEntryLayout {
                name: series.name.clone(),
                color: config.series_color(i),
                checkbox,
                check,
                label_x: checkbox.x2 + LABEL_GAP,
                label_y: top + row_height / 2.0,
                hit: BoxCoords::from_origin(x, top, legend.item_width, row_height),
            }
        })
        .collect()
}

fn check_opacity(hidden: bool) -> &'static str {
    if hidden { "0" } else { "1" }
}

#[derive(Debug, Clone)]
pub struct LegendEntryView {
    pub name: String,
    pub hit: BoxCoords,
    pub checkbox: NodeId,
    pub check: NodeId,
    pub label: NodeId,
}

#[derive(Debug, Clone)]
pub struct LegendView {
    pub group: NodeId,
    pub entries: Vec<LegendEntryView>,
}

impl LegendView {
    pub fn mount(host: &mut dyn SceneHost, config: &ChartConfig, layout: &[LegendEntryLayout]) -> Result<Self> {
        let style = &config.legend.style;
        let font = style.color.as_deref().unwrap_or(config.styles().main_font);
        let mut entries = Vec::with_capacity(layout.len());
        let mut children = Vec::with_capacity(layout.len());

        for (entry, series) in layout.iter().zip(&config.series) {
            let cb = &entry.checkbox;
            let checkbox = host.create_shape(
                ShapeKind::Rect,
                Attrs::rect(cb.x1, cb.y1, cb.inner_width, cb.inner_height)
                    .with("rx", cb.inner_width / 4.0)
                    .with("fill", &entry.color)
                    .with("stroke", &entry.color)
                    .with("cursor", "pointer"),
                &[],
            )?;
            let check = host.create_shape(
                ShapeKind::Path,
                Attrs::new()
                    .with("d", &entry.check)
                    .with("fill", "none")
                    .with("stroke", colors::WHITE)
                    .with("stroke-width", 2)
                    .with("opacity", check_opacity(!series.visible))
                    .with("pointer-events", "none"),
                &[],
            )?;
            let label = host.create_shape(
                ShapeKind::Text,
                Attrs::new()
                    .with("x", entry.label_x)
                    .with("y", entry.label_y)
                    .with("dominant-baseline", "middle")
                    .with("fill", font)
                    .with("style", style.css())
                    .with("cursor", "pointer")
                    .with_text(&entry.name),
                &[],
            )?;
            let group = host.create_shape(
                ShapeKind::Group,
                Attrs::new().with("class", "legend-entry"),
                &[checkbox, check, label],
            )?;

            children.push(group);
            entries.push(LegendEntryView {
                name: entry.name.clone(),
                hit: entry.hit,
                checkbox,
                check,
                label,
            });
        }

        let group = host.create_shape(ShapeKind::Group, Attrs::new().with("class", "legend"), &children)?;
        Ok(Self { group, entries })
    }

    /// Show or hide the check marks
    pub fn apply_visibility(&self, host: &mut dyn SceneHost, legend: &LegendMap) -> Result<()> {
        for entry in &self.entries {
            let hidden = legend.get(&entry.name).copied().unwrap_or(false);
            host.set_attributes(entry.check, &Attrs::new().with("opacity", check_opacity(hidden)))?;
        }
        Ok(())
    }

    /// Series name of the entry under a chart-local point
    pub fn entry_at(&self, x: f64, y: f64) -> Option<&str> {
        self.entries.iter().find(|e| e.hit.contains(x, y)).map(|e| e.name.as_str())
    }
}
