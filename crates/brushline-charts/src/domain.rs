//! Series domains
//!
//! The y minimum is never floored here: callers apply the configured
//! [`YBaseline`] with [`apply_baseline`] so the axis and the series layout
//! agree on the same domain.

use brushline_core::{ChartConfig, ChartError, DataPoint, Domain, Field, IndexWindow, Result, SelectionRange, Series, YBaseline};

/// Data points inside an index window
pub fn slice_window(data: &[DataPoint], window: Option<IndexWindow>) -> &[DataPoint] {
    match window {
        Some(window) => {
            let (start, end) = window.bounds(data.len());
            &data[start..end]
        }
        None => data,
    }
}

/// Min and max of `field` over every (windowed) point of every series
pub fn min_max(series: &[Series], field: Field, window: Option<IndexWindow>) -> Result<Domain> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = 0usize;

    for s in series {
        for point in slice_window(&s.data, window) {
            let value = point.get(field);
            if !value.is_finite() {
                return Err(ChartError::invalid_input(format!(
                    "series \"{}\" has a non-finite {} value",
                    s.name,
                    field.label()
                )));
            }
            min = min.min(value);
            max = max.max(value);
            seen += 1;
        }
    }

    if seen == 0 {
        return Err(ChartError::invalid_input(format!(
            "no data points to measure the {} domain",
            field.label()
        )));
    }

    Ok(Domain::new(min, max))
}

/// Apply the y baseline policy
pub fn apply_baseline(domain: Domain, baseline: YBaseline) -> Domain {
    match baseline {
        YBaseline::Zero => domain.floored_at_zero(),
        YBaseline::DataMin => domain,
    }
}

/// Narrow a domain to the fraction `[lo, hi]` of its span
pub fn focus(domain: Domain, lo: f64, hi: f64) -> Domain {
    if lo == 0.0 && hi == 1.0 {
        return domain;
    }
    let span = domain.span();
    Domain::new(domain.min + span * lo, domain.min + span * hi)
}

/// X and y domains seen through a selection.
///
/// The x window slices the data by index; the y extent of the selection then
/// narrows the baseline-adjusted y domain (`y1` is the top edge).
pub fn view_domains(config: &ChartConfig, range: &SelectionRange) -> Result<(Domain, Domain)> {
    let window = Some(range.x_window());
    let x = min_max(&config.series, Field::X, window)?;
    let y = apply_baseline(min_max(&config.series, Field::Y, window)?, config.y_axis.baseline);
    Ok((x, focus(y, 1.0 - range.y2, 1.0 - range.y1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<Series> {
        vec![
            Series::from_pairs("a", "", &[(0.0, 5.0), (1.0, 9.0), (2.0, 3.0), (3.0, 7.0)]),
            Series::from_pairs("b", "", &[(0.0, -2.0), (1.0, 4.0), (2.0, 12.0), (3.0, 1.0)]),
        ]
    }

    #[test]
    fn test_min_max_full() {
        assert_eq!(min_max(&series(), Field::Y, None).unwrap(), Domain::new(-2.0, 12.0));
        assert_eq!(min_max(&series(), Field::X, None).unwrap(), Domain::new(0.0, 3.0));
    }

    #[test]
    fn test_min_max_window_keeps_boundary_point() {
        // len 4, window [0, 0.25] -> indices [0, 2)
        let d = min_max(&series(), Field::X, Some(IndexWindow::new(0.0, 0.25))).unwrap();
        assert_eq!(d, Domain::new(0.0, 1.0));
    }

    #[test]
    fn test_min_max_narrowing_window_narrows_domain() {
        let full = min_max(&series(), Field::Y, None).unwrap();
        for (s, e) in [(0.0, 0.5), (0.25, 0.5), (0.5, 1.0), (0.3, 0.31)] {
            let d = min_max(&series(), Field::Y, Some(IndexWindow::new(s, e))).unwrap();
            assert!(d.min >= full.min && d.max <= full.max);
            assert!(d.min <= d.max);
        }
    }

    #[test]
    fn test_brush_on_last_point_gives_degenerate_domains() {
        let two = vec![Series::from_pairs("a", "", &[(0.0, 0.0), (10.0, 100.0)])];
        let window = Some(SelectionRange::new(0.5, 0.0, 1.0, 1.0).x_window());

        let x = min_max(&two, Field::X, window).unwrap();
        let y = min_max(&two, Field::Y, window).unwrap();
        assert_eq!(x, Domain::new(10.0, 10.0));
        assert_eq!(y, Domain::new(100.0, 100.0));
        assert!(x.min == x.max && y.min == y.max);
    }

    #[test]
    fn test_window_at_right_edge_is_never_empty() {
        let window = Some(IndexWindow::new(1.0, 1.0));
        assert_eq!(min_max(&series(), Field::X, window).unwrap(), Domain::new(3.0, 3.0));
    }

    #[test]
    fn test_min_max_empty_is_invalid() {
        assert!(matches!(min_max(&[], Field::Y, None), Err(ChartError::InvalidInput(_))));
        let empty = vec![Series::from_pairs("a", "", &[])];
        assert!(min_max(&empty, Field::X, None).is_err());
    }

    #[test]
    fn test_min_max_rejects_nan() {
        let bad = vec![Series::from_pairs("a", "", &[(0.0, f64::NAN)])];
        assert!(min_max(&bad, Field::Y, None).is_err());
    }

    #[test]
    fn test_apply_baseline() {
        let d = Domain::new(3.0, 9.0);
        assert_eq!(apply_baseline(d, YBaseline::Zero), Domain::new(0.0, 9.0));
        assert_eq!(apply_baseline(d, YBaseline::DataMin), d);
        assert_eq!(apply_baseline(Domain::new(-4.0, 1.0), YBaseline::Zero), Domain::new(-4.0, 1.0));
    }

    #[test]
    fn test_focus() {
        assert_eq!(focus(Domain::new(0.0, 100.0), 0.25, 0.5), Domain::new(25.0, 50.0));
        let d = Domain::new(-0.3, 0.7);
        assert_eq!(focus(d, 0.0, 1.0), d);
    }

    #[test]
    fn test_view_domains_y_selection_is_screen_ordered() {
        let config = ChartConfig::new(100.0, 100.0)
            .with_series(vec![Series::from_pairs("a", "", &[(0.0, 0.0), (1.0, 100.0)])]);
        // top half of the screen is the upper half of the values
        let (_, y) = view_domains(&config, &SelectionRange::new(0.0, 0.0, 1.0, 0.5)).unwrap();
        assert_eq!(y, Domain::new(50.0, 100.0));
    }
}
