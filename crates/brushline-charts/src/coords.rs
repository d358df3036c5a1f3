//! Coordinate space
//!
//! Converts spacing insets and text alignment into absolute pixel positions.
//! Every function is pure; the configuration is passed in explicitly.

use brushline_core::{
    BoxCoords, ChartConfig, DominantBaseline, LINE_HEIGHT, Size, Spacing, TextAnchor,
};

/// Inset `outer` by `spacing`.
///
/// Missing `outer` yields a zero box, missing `spacing` the full outer box.
/// Negative results are returned as-is.
pub fn inset_box(spacing: Option<&Spacing>, outer: Option<Size>) -> BoxCoords {
    let Some(outer) = outer else {
        return BoxCoords::zero();
    };
    let spacing = spacing.copied().unwrap_or_default();

    BoxCoords {
        x1: spacing.left,
        y1: spacing.top,
        x2: outer.width - spacing.right,
        y2: outer.height - spacing.bottom,
        inner_width: outer.width - spacing.left - spacing.right,
        inner_height: outer.height - spacing.top - spacing.bottom,
    }
}

/// Horizontal text position for an anchor inside a box
pub fn align_to_anchor(anchor: TextAnchor, bounds: &BoxCoords) -> f64 {
    match anchor {
        TextAnchor::Start => bounds.x1,
        TextAnchor::Middle => bounds.x1 + bounds.inner_width / 2.0,
        TextAnchor::End => bounds.x1 + bounds.inner_width,
    }
}

/// Vertical text position for a baseline inside a box
pub fn align_to_baseline(baseline: DominantBaseline, bounds: &BoxCoords, ascent_correction: f64) -> f64 {
    match baseline {
        DominantBaseline::Hanging => bounds.y1,
        DominantBaseline::Middle => bounds.y1 + bounds.inner_height / 2.0,
        DominantBaseline::Baseline => bounds.y1 + bounds.inner_height - ascent_correction,
    }
}

/// Half the leading of a text row, lifted off the bottom edge for `baseline` alignment
pub fn ascent_correction(font_size: f64) -> f64 {
    (font_size * LINE_HEIGHT - font_size) / 2.0
}

/// Vertical space taken by the title row, zero when disabled
pub fn title_height(config: &ChartConfig) -> f64 {
    let title = &config.title;
    if !title.enabled {
        return 0.0;
    }
    title.spacing.top + title.spacing.bottom + title.style.font_size * LINE_HEIGHT
}

/// Plot area inset by `spacing`, starting below the title row
pub fn content_box_below_title(config: &ChartConfig, spacing: &Spacing) -> BoxCoords {
    let mut content = inset_box(Some(spacing), Some(config.plot_size()));
    content.y1 += title_height(config);
    content.inner_height = content.y2 - content.y1;
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_box_invariant() {
        for (spacing, size) in [
            (Spacing::new(5.0, 15.0, 30.0, 15.0), Size::new(600.0, 400.0)),
            (Spacing::uniform(0.0), Size::new(1.0, 1.0)),
            (Spacing::new(-4.0, 2.5, 7.0, 100.0), Size::new(50.0, 20.0)),
        ] {
            let b = inset_box(Some(&spacing), Some(size));
            assert_eq!(b.x2, b.x1 + b.inner_width);
            assert_eq!(b.y2, b.y1 + b.inner_height);
        }
    }

    #[test]
    fn test_inset_box_values() {
        let b = inset_box(Some(&Spacing::new(5.0, 15.0, 30.0, 10.0)), Some(Size::new(600.0, 400.0)));
        assert_eq!(b, BoxCoords::from_edges(10.0, 5.0, 585.0, 370.0));
        assert_eq!(b.inner_width, 575.0);
        assert_eq!(b.inner_height, 365.0);
    }

    #[test]
    fn test_inset_box_missing_inputs() {
        assert_eq!(inset_box(Some(&Spacing::uniform(3.0)), None), BoxCoords::zero());
        assert_eq!(
            inset_box(None, Some(Size::new(80.0, 40.0))),
            BoxCoords::from_edges(0.0, 0.0, 80.0, 40.0)
        );
    }

    #[test]
    fn test_inset_box_does_not_clamp() {
        let b = inset_box(Some(&Spacing::uniform(30.0)), Some(Size::new(40.0, 40.0)));
        assert_eq!(b.inner_width, -20.0);
        assert!(b.x2 < b.x1);
    }

    #[test]
    fn test_alignment() {
        let b = BoxCoords::from_edges(10.0, 20.0, 110.0, 60.0);
        assert_eq!(align_to_anchor(TextAnchor::Start, &b), 10.0);
        assert_eq!(align_to_anchor(TextAnchor::Middle, &b), 60.0);
        assert_eq!(align_to_anchor(TextAnchor::End, &b), 110.0);
        assert_eq!(align_to_baseline(DominantBaseline::Hanging, &b, 2.0), 20.0);
        assert_eq!(align_to_baseline(DominantBaseline::Middle, &b, 2.0), 40.0);
        assert_eq!(align_to_baseline(DominantBaseline::Baseline, &b, 2.0), 58.0);
    }

    #[test]
    fn test_ascent_correction() {
        assert!((ascent_correction(20.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_title_height() {
        let config = ChartConfig::new(600.0, 400.0);
        assert!((title_height(&config) - (5.0 + 5.0 + 16.0 * 1.2)).abs() < 1e-9);
        assert_eq!(title_height(&config.without_title()), 0.0);
    }

    #[test]
    fn test_content_box_below_title() {
        let config = ChartConfig::new(600.0, 400.0).without_legend();
        let spacing = Spacing::new(5.0, 15.0, 30.0, 15.0);
        let content = content_box_below_title(&config, &spacing);
        let th = title_height(&config);

        assert_eq!(content.y1, 5.0 + th);
        assert_eq!(content.y2, 370.0);
        assert_eq!(content.inner_height, content.y2 - content.y1);
        assert_eq!(content.inner_width, 570.0);
    }
}
