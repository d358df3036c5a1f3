//! Chart title row

use brushline_core::{BoxCoords, ChartConfig, Result, Size};

use crate::coords::{align_to_anchor, align_to_baseline, ascent_correction, inset_box, title_height};
use crate::scene::{Attrs, NodeId, SceneHost, ShapeKind};

#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    /// Full-width band behind the text
    pub background: BoxCoords,
    pub text_x: f64,
    pub text_y: f64,
}

/// `None` when the title is disabled
pub fn layout_title(config: &ChartConfig) -> Option<TitleLayout> {
    let title = &config.title;
    if !title.enabled {
        return None;
    }

    let band = Size::new(config.chart.width, title_height(config));
    let inner = inset_box(Some(&title.spacing), Some(band));

    Some(TitleLayout {
        background: BoxCoords::from_origin(0.0, 0.0, band.width, band.height),
        text_x: align_to_anchor(title.align, &inner),
        text_y: align_to_baseline(title.vertical_align, &inner, ascent_correction(title.style.font_size)),
    })
}

#[derive(Debug, Clone)]
pub struct TitleView {
    pub group: NodeId,
    pub background: NodeId,
    pub text: NodeId,
}

impl TitleView {
    pub fn mount(host: &mut dyn SceneHost, config: &ChartConfig, layout: &TitleLayout) -> Result<Self> {
        let title = &config.title;
        let bg = &layout.background;

        let background = host.create_shape(
            ShapeKind::Rect,
            Attrs::rect(bg.x1, bg.y1, bg.inner_width, bg.inner_height).with("fill", &title.background_color),
            &[],
        )?;

        let fill = title.style.color.as_deref().unwrap_or(config.styles().main_font);
        let text = host.create_shape(
            ShapeKind::Text,
            Attrs::new()
                .with("x", layout.text_x)
                .with("y", layout.text_y)
                .with("text-anchor", title.align.as_str())
                .with("dominant-baseline", title.vertical_align.as_str())
                .with("fill", fill)
                .with("style", title.style.css())
                .with_text(&title.text),
            &[],
        )?;

        let group = host.create_shape(ShapeKind::Group, Attrs::new().with("class", "title"), &[background, text])?;

        Ok(Self { group, background, text })
    }
}
