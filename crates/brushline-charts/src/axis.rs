//! X and y axes: axis line, y gridlines and tick labels
//!
//! Labels and gridlines are created once per tick; a selection change only
//! rewrites their text and positions.

use brushline_core::{BoxCoords, ChartConfig, LabelsConfig, LineConfig, Result, SelectionRange};

use crate::coords::content_box_below_title;
use crate::domain::view_domains;
use crate::path::PathBuilder;
use crate::scene::{Attrs, NodeId, SceneHost, ShapeKind};
use crate::ticks::{Axis, TickSet, format_ticks, generate_ticks};

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub axis: Axis,
    pub content: BoxCoords,
    pub line: String,
    /// Gridline drawn at y = 0 and moved into place with a transform
    pub grid_line: String,
    pub ticks: TickSet,
    pub labels: Vec<TickLabel>,
}

struct AxisParts<'a> {
    ticks_amount: usize,
    line: &'a LineConfig,
    grid_line: Option<&'a LineConfig>,
    labels: &'a LabelsConfig,
    line_color: &'static str,
    label_color: &'static str,
}

fn parts(config: &ChartConfig, axis: Axis) -> AxisParts<'_> {
    let styles = config.styles();
    match axis {
        Axis::X => AxisParts {
            ticks_amount: config.x_axis.ticks_amount,
            line: &config.x_axis.line,
            grid_line: None,
            labels: &config.x_axis.labels,
            line_color: styles.x_axis_line,
            label_color: styles.x_labels,
        },
        Axis::Y => AxisParts {
            ticks_amount: config.y_axis.ticks_amount,
            line: &config.y_axis.line,
            grid_line: Some(&config.y_axis.grid_line),
            labels: &config.y_axis.labels,
            line_color: styles.y_axis_line,
            label_color: styles.y_labels,
        },
    }
}

/// Whether the axis is drawn at all
pub fn axis_enabled(config: &ChartConfig, axis: Axis) -> bool {
    match axis {
        Axis::X => config.x_axis.enabled,
        Axis::Y => config.y_axis.enabled,
    }
}

/// Lay out an axis for the data visible through `range`
pub fn layout_axis(config: &ChartConfig, axis: Axis, range: &SelectionRange) -> Result<AxisLayout> {
    let parts = parts(config, axis);
    let spacing = match axis {
        Axis::X => &config.x_axis.spacing,
        Axis::Y => &config.y_axis.spacing,
    };
    let content = content_box_below_title(config, spacing);
    let (domain_x, domain_y) = view_domains(config, range)?;

    let (domain, line) = match axis {
        Axis::X => (
            domain_x,
            PathBuilder::new().move_to(content.x1, content.y2).horizontal_to(content.x2).build(),
        ),
        Axis::Y => (
            domain_y,
            PathBuilder::new().move_to(content.x1, content.y1).vertical_to(content.y2).build(),
        ),
    };

    let ticks = generate_ticks(domain, parts.ticks_amount, &content, axis);
    let texts = format_ticks(&ticks, parts.labels.formatter.as_ref(), config);
    let labels = ticks
        .iter()
        .zip(texts)
        .map(|(tick, text)| match axis {
            Axis::X => TickLabel {
                text,
                x: tick.position + parts.labels.x,
                y: content.y2 + parts.labels.y,
            },
            Axis::Y => TickLabel {
                text,
                x: content.x1 + parts.labels.x,
                y: tick.position + parts.labels.y,
            },
        })
        .collect();

    Ok(AxisLayout {
        axis,
        content,
        line,
        grid_line: PathBuilder::new().move_to(content.x1, 0.0).horizontal_to(content.x2).build(),
        ticks,
        labels,
    })
}

fn stroke(line: &LineConfig, fallback: &str) -> Attrs {
    Attrs::new()
        .with("fill", "none")
        .with("stroke", line.color.as_deref().unwrap_or(fallback))
        .with("stroke-width", line.width)
        .with_opt("stroke-dasharray", line.dasharray.as_deref())
}

fn translate_y(y: f64) -> String {
    format!("translate(0,{y})")
}

// ============================================================================
// VIEW
// ============================================================================

#[derive(Debug, Clone)]
pub struct AxisView {
    pub axis: Axis,
    pub group: NodeId,
    pub line: Option<NodeId>,
    pub grid: Vec<NodeId>,
    pub labels: Vec<NodeId>,
}

impl AxisView {
    pub fn mount(host: &mut dyn SceneHost, config: &ChartConfig, layout: &AxisLayout) -> Result<Self> {
        let parts = parts(config, layout.axis);
        let mut children = Vec::new();

        let mut grid = Vec::new();
        if let Some(grid_line) = parts.grid_line.filter(|g| g.enabled) {
            for tick in &layout.ticks {
                let node = host.create_shape(
                    ShapeKind::Path,
                    stroke(grid_line, parts.line_color)
                        .with("d", &layout.grid_line)
                        .with("transform", translate_y(tick.position)),
                    &[],
                )?;
                grid.push(node);
            }
        }
        children.extend(&grid);

        let line = if parts.line.enabled {
            let node = host.create_shape(
                ShapeKind::Path,
                stroke(parts.line, parts.line_color).with("d", &layout.line),
                &[],
            )?;
            children.push(node);
            Some(node)
        } else {
            None
        };

        let mut labels = Vec::new();
        if parts.labels.enabled {
            let style = &parts.labels.style;
            for label in &layout.labels {
                let node = host.create_shape(
                    ShapeKind::Text,
                    Attrs::new()
                        .with("x", label.x)
                        .with("y", label.y)
                        .with("text-anchor", parts.labels.align.as_str())
                        .with("dominant-baseline", parts.labels.vertical_align.as_str())
                        .with("fill", style.color.as_deref().unwrap_or(parts.label_color))
                        .with("style", style.css())
                        .with_text(&label.text),
                    &[],
                )?;
                labels.push(node);
            }
        }
        children.extend(&labels);

        let class = match layout.axis {
            Axis::X => "x-axis",
            Axis::Y => "y-axis",
        };
        let group = host.create_shape(ShapeKind::Group, Attrs::new().with("class", class), &children)?;

        Ok(Self {
            axis: layout.axis,
            group,
            line,
            grid,
            labels,
        })
    }

    /// Move gridlines and rewrite labels in place
    pub fn update(&self, host: &mut dyn SceneHost, layout: &AxisLayout) -> Result<()> {
        for (&node, tick) in self.grid.iter().zip(&layout.ticks) {
            host.set_attributes(node, &Attrs::new().with("transform", translate_y(tick.position)))?;
        }
        for (&node, label) in self.labels.iter().zip(&layout.labels) {
            host.set_attributes(
                node,
                &Attrs::new().with("x", label.x).with("y", label.y).with_text(&label.text),
            )?;
        }
        Ok(())
    }
}
