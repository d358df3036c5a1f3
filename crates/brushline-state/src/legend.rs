//! Series visibility map shared by every chart on the page

use std::collections::BTreeMap;

use brushline_core::Series;
use serde::{Deserialize, Serialize};

/// Series name to hidden flag
pub type LegendMap = BTreeMap<String, bool>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendState {
    hidden: LegendMap,
}

impl LegendState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from series, honouring their initial `visible` flag
    pub fn from_series(series: &[Series]) -> Self {
        let hidden = series.iter().map(|s| (s.name.clone(), !s.visible)).collect();
        Self { hidden }
    }

    /// Flip a series; unknown names start out visible
    pub fn toggle(&mut self, name: &str) -> bool {
        let hidden = self.hidden.entry(name.to_string()).or_insert(false);
        *hidden = !*hidden;
        *hidden
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.get(name).copied().unwrap_or(false)
    }

    pub fn map(&self) -> &LegendMap {
        &self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<Series> {
        vec![
            Series::from_pairs("#0", "", &[(0.0, 1.0)]),
            Series::from_pairs("#1", "", &[(0.0, 2.0)]),
        ]
    }

    #[test]
    fn test_toggle_twice_restores_map() {
        let mut legend = LegendState::from_series(&series());
        let before = legend.clone();

        assert!(legend.toggle("#0"));
        assert!(legend.is_hidden("#0"));
        assert_ne!(legend, before);

        assert!(!legend.toggle("#0"));
        assert_eq!(legend, before);
    }

    #[test]
    fn test_unknown_series_is_visible() {
        let mut legend = LegendState::new();
        assert!(!legend.is_hidden("ghost"));
        assert!(legend.toggle("ghost"));
    }

    #[test]
    fn test_from_series_respects_visibility() {
        let mut input = series();
        input[1].visible = false;
        let legend = LegendState::from_series(&input);
        assert!(!legend.is_hidden("#0"));
        assert!(legend.is_hidden("#1"));
        assert_eq!(legend.map().len(), 2);
    }

    #[test]
    fn test_map_serializes_by_name() {
        let mut legend = LegendState::from_series(&series());
        legend.toggle("#1");
        let json = serde_json::to_string(legend.map()).unwrap();
        assert_eq!(json, r##"{"#0":false,"#1":true}"##);
    }
}
