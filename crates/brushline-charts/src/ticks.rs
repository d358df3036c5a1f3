//! Tick generation
//!
//! Y positions divide the box height by `n + 1` so the last gridline falls
//! outside the visible box; x positions divide by `n` so the last label sits
//! on the right edge.

use brushline_core::{BoxCoords, ChartConfig, Domain, PlainFormatter, SharedFormatter, TickFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One labeled position on an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
}

pub type TickSet = Vec<Tick>;

/// `ticks_amount + 1` evenly stepped ticks over `domain`
pub fn generate_ticks(domain: Domain, ticks_amount: usize, content: &BoxCoords, axis: Axis) -> TickSet {
    let n = ticks_amount as f64;
    let step = if ticks_amount == 0 { 0.0 } else { domain.span() / n };

    (0..=ticks_amount)
        .map(|i| {
            let i = i as f64;
            let position = match axis {
                Axis::Y => content.y2 - i * (content.inner_height / (n + 1.0)),
                Axis::X if ticks_amount == 0 => content.x1,
                Axis::X => content.x1 + i * (content.inner_width / n),
            };
            Tick {
                value: (domain.min + i * step).round(),
                position,
            }
        })
        .collect()
}

/// Label text for every tick, with the plain formatter when none is configured
pub fn format_ticks(ticks: &[Tick], formatter: Option<&SharedFormatter>, config: &ChartConfig) -> Vec<String> {
    ticks
        .iter()
        .enumerate()
        .map(|(i, tick)| match formatter {
            Some(f) => f.format(tick.value, i, config),
            None => PlainFormatter.format(tick.value, i, config),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> BoxCoords {
        BoxCoords::from_edges(10.0, 20.0, 110.0, 140.0)
    }

    #[test]
    fn test_tick_count_is_n_plus_one() {
        for n in 1..=10 {
            for domain in [Domain::new(0.0, 100.0), Domain::new(-7.5, 3.2), Domain::new(4.0, 4.0)] {
                assert_eq!(generate_ticks(domain, n, &content(), Axis::Y).len(), n + 1);
                assert_eq!(generate_ticks(domain, n, &content(), Axis::X).len(), n + 1);
            }
        }
    }

    #[test]
    fn test_tick_values_are_rounded_steps() {
        let ticks = generate_ticks(Domain::new(0.0, 100.0), 4, &content(), Axis::Y);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);

        let ticks = generate_ticks(Domain::new(0.0, 10.0), 3, &content(), Axis::Y);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 3.0, 7.0, 10.0]);
    }

    #[test]
    fn test_y_positions_leave_room_above_last_tick() {
        // inner height 120, n = 5 -> spacing 20
        let ticks = generate_ticks(Domain::new(0.0, 50.0), 5, &content(), Axis::Y);
        assert_eq!(ticks[0].position, 140.0);
        assert_eq!(ticks[1].position, 120.0);
        assert_eq!(ticks[5].position, 40.0);
        assert!(ticks[5].position > content().y1);
    }

    #[test]
    fn test_x_positions_reach_right_edge() {
        let ticks = generate_ticks(Domain::new(0.0, 50.0), 5, &content(), Axis::X);
        assert_eq!(ticks[0].position, 10.0);
        assert_eq!(ticks[5].position, 110.0);
    }

    #[test]
    fn test_degenerate_domain_repeats_value() {
        let ticks = generate_ticks(Domain::new(7.0, 7.0), 3, &content(), Axis::X);
        assert!(ticks.iter().all(|t| t.value == 7.0));
    }

    #[test]
    fn test_format_ticks() {
        let config = ChartConfig::default();
        let ticks = generate_ticks(Domain::new(0.0, 10.0), 2, &content(), Axis::Y);
        assert_eq!(format_ticks(&ticks, None, &config), vec!["0", "5", "10"]);

        let custom = SharedFormatter::new(|v: f64, i: usize, _: &ChartConfig| format!("{i}:{v}"));
        assert_eq!(format_ticks(&ticks, Some(&custom), &config), vec!["0:0", "1:5", "2:10"]);
    }
}
