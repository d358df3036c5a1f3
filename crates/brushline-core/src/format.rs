//! Tick label formatters
//!
//! Strategy trait so axes can swap label rendering without touching layout.

use std::fmt;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::ChartConfig;

/// Strategy trait converting a numeric tick into display text
pub trait TickFormatter: Send + Sync {
    fn format(&self, value: f64, index: usize, config: &ChartConfig) -> String;
}

impl<F> TickFormatter for F
where
    F: Fn(f64, usize, &ChartConfig) -> String + Send + Sync,
{
    fn format(&self, value: f64, index: usize, config: &ChartConfig) -> String {
        self(value, index, config)
    }
}

/// Cloneable handle to a formatter stored in configuration
#[derive(Clone)]
pub struct SharedFormatter(pub Arc<dyn TickFormatter>);

impl SharedFormatter {
    pub fn new(formatter: impl TickFormatter + 'static) -> Self {
        Self(Arc::new(formatter))
    }

    pub fn format(&self, value: f64, index: usize, config: &ChartConfig) -> String {
        self.0.format(value, index, config)
    }
}

impl fmt::Debug for SharedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedFormatter(..)")
    }
}

/// Identity formatter: prints the (already rounded) value
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl TickFormatter for PlainFormatter {
    fn format(&self, value: f64, _index: usize, _config: &ChartConfig) -> String {
        if value == 0.0 {
            // avoids "-0"
            return "0".to_string();
        }
        format!("{}", value)
    }
}

/// Epoch-millisecond values as short dates ("Mar 04")
#[derive(Debug, Clone)]
pub struct DateFormatter {
    pub pattern: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            pattern: "%b %d".to_string(),
        }
    }
}

impl TickFormatter for DateFormatter {
    fn format(&self, value: f64, index: usize, config: &ChartConfig) -> String {
        match Utc.timestamp_millis_opt(value as i64).single() {
            Some(dt) => dt.format(&self.pattern).to_string(),
            None => PlainFormatter.format(value, index, config),
        }
    }
}

/// Large numbers with K/M/B suffixes
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFormatter;

impl TickFormatter for CompactFormatter {
    fn format(&self, value: f64, _index: usize, _config: &ChartConfig) -> String {
        let abs = value.abs();
        let sign = if value < 0.0 { "-" } else { "" };

        if abs >= 1_000_000_000.0 {
            format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
        } else if abs >= 1_000_000.0 {
            format!("{}{:.1}M", sign, abs / 1_000_000.0)
        } else if abs >= 1_000.0 {
            format!("{}{:.1}K", sign, abs / 1_000.0)
        } else {
            format!("{}{}", sign, abs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter() {
        let config = ChartConfig::default();
        assert_eq!(PlainFormatter.format(120.0, 0, &config), "120");
        assert_eq!(PlainFormatter.format(-0.0, 0, &config), "0");
    }

    #[test]
    fn test_date_formatter() {
        let config = ChartConfig::default();
        // 2019-03-04T00:00:00Z
        assert_eq!(DateFormatter::default().format(1_551_657_600_000.0, 0, &config), "Mar 04");
    }

    #[test]
    fn test_compact_formatter() {
        let config = ChartConfig::default();
        assert_eq!(CompactFormatter.format(1_500_000.0, 0, &config), "1.5M");
        assert_eq!(CompactFormatter.format(-2_500.0, 0, &config), "-2.5K");
        assert_eq!(CompactFormatter.format(500.0, 0, &config), "500");
    }

    #[test]
    fn test_closure_formatter() {
        let config = ChartConfig::default();
        let f = SharedFormatter::new(|v: f64, i: usize, _: &ChartConfig| format!("{i}:{v}"));
        assert_eq!(f.format(4.0, 2, &config), "2:4");
    }
}
