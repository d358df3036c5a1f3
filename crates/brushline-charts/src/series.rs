//! Series lines
//!
//! One path node per series. Selection changes rewrite `d`; legend toggles
//! only flip `stroke-opacity`.

use brushline_core::{BoxCoords, ChartConfig, Field, Result, SelectionRange};
use brushline_state::LegendMap;

use crate::coords::content_box_below_title;
use crate::domain::view_domains;
use crate::path::build_path;
use crate::scene::{Attrs, NodeId, SceneHost, ShapeKind};

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayout {
    pub content: BoxCoords,
    /// Path data in series order
    pub paths: Vec<String>,
}

/// Paths for every series as seen through `range`
pub fn layout_series(config: &ChartConfig, range: &SelectionRange) -> Result<SeriesLayout> {
    let content = content_box_below_title(config, &config.area_options.spacing);
    let (domain_x, domain_y) = view_domains(config, range)?;
    let window = Some(range.x_window());

    for (field, domain) in [(Field::X, domain_x), (Field::Y, domain_y)] {
        if let Err(e) = domain.checked_span(field) {
            tracing::debug!(error = %e, "drawing flat fallback");
        }
    }

    let paths = config
        .series
        .iter()
        .map(|s| build_path(s, domain_x, domain_y, &content, window))
        .collect();

    Ok(SeriesLayout { content, paths })
}

fn opacity(visible: bool) -> &'static str {
    if visible { "1" } else { "0" }
}

#[derive(Debug, Clone)]
pub struct SeriesView {
    pub group: NodeId,
    /// Series name and its path node
    pub paths: Vec<(String, NodeId)>,
}

impl SeriesView {
    pub fn mount(host: &mut dyn SceneHost, config: &ChartConfig, layout: &SeriesLayout) -> Result<Self> {
        let mut paths = Vec::with_capacity(layout.paths.len());

        for (i, (series, d)) in config.series.iter().zip(&layout.paths).enumerate() {
            let node = host.create_shape(
                ShapeKind::Path,
                Attrs::new()
                    .with("d", d)
                    .with("fill", "none")
                    .with("stroke", config.series_color(i))
                    .with("stroke-width", config.area_options.stroke_width)
                    .with("stroke-linejoin", "round")
                    .with("stroke-opacity", opacity(series.visible))
                    .with("style", "transition: stroke-opacity 0.2s ease"),
                &[],
            )?;
            paths.push((series.name.clone(), node));
        }

        let nodes: Vec<NodeId> = paths.iter().map(|(_, id)| *id).collect();
        let group = host.create_shape(ShapeKind::Group, Attrs::new().with("class", "series"), &nodes)?;

        Ok(Self { group, paths })
    }

    /// Rewrite path data only
    pub fn update(&self, host: &mut dyn SceneHost, layout: &SeriesLayout) -> Result<()> {
        for ((_, node), d) in self.paths.iter().zip(&layout.paths) {
            host.set_attributes(*node, &Attrs::new().with("d", d))?;
        }
        Ok(())
    }

    pub fn apply_visibility(&self, host: &mut dyn SceneHost, legend: &LegendMap) -> Result<()> {
        for (name, node) in &self.paths {
            let hidden = legend.get(name).copied().unwrap_or(false);
            host.set_attributes(*node, &Attrs::new().with("stroke-opacity", opacity(!hidden)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use brushline_core::Series;

    fn config() -> ChartConfig {
        ChartConfig::new(400.0, 300.0).with_series(vec![
            Series::from_pairs("a", "#111111", &[(0.0, 1.0), (1.0, 4.0), (2.0, 2.0)]),
            Series::from_pairs("b", "", &[(0.0, 3.0), (1.0, 0.0), (2.0, 5.0)]),
        ])
    }

    #[test]
    fn test_layout_one_path_per_series() {
        let layout = layout_series(&config(), &SelectionRange::full()).unwrap();
        assert_eq!(layout.paths.len(), 2);
        assert!(layout.paths.iter().all(|d| d.starts_with('M') && d.matches('L').count() == 2));
    }

    #[test]
    fn test_update_rewrites_only_d() {
        let config = config();
        let mut scene = Scene::new();
        let view = SeriesView::mount(&mut scene, &config, &layout_series(&config, &SelectionRange::full()).unwrap())
            .unwrap();
        let created = scene.node_count();
        let stroke = scene.attr(view.paths[0].1, "stroke").map(str::to_string);

        let zoomed = layout_series(&config, &SelectionRange::new(0.0, 0.0, 0.3, 1.0)).unwrap();
        view.update(&mut scene, &zoomed).unwrap();

        assert_eq!(scene.node_count(), created);
        assert_eq!(scene.attr(view.paths[0].1, "d"), Some(zoomed.paths[0].as_str()));
        assert_eq!(scene.attr(view.paths[0].1, "stroke").map(str::to_string), stroke);
    }

    #[test]
    fn test_visibility_sets_opacity() {
        let config = config();
        let mut scene = Scene::new();
        let view = SeriesView::mount(&mut scene, &config, &layout_series(&config, &SelectionRange::full()).unwrap())
            .unwrap();

        let mut legend = LegendMap::new();
        legend.insert("b".to_string(), true);
        view.apply_visibility(&mut scene, &legend).unwrap();

        assert_eq!(scene.attr(view.paths[0].1, "stroke-opacity"), Some("1"));
        assert_eq!(scene.attr(view.paths[1].1, "stroke-opacity"), Some("0"));
    }
}
