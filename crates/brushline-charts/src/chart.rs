//! Chart assembly
//!
//! Builds every component against one resolved configuration and groups
//! their nodes under a root `g`. After mounting, a chart only ever rewrites
//! attributes: selection changes re-run the layout of axes and series,
//! legend changes flip opacities.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use brushline_core::{ChartConfig, ChartError, Result, SelectionRange};
use brushline_state::{EventBus, LegendChanged, LegendMap, SelectionChanged, SubscriptionId};

use crate::axis::{AxisView, axis_enabled, layout_axis};
use crate::legend::{LegendView, layout_legend};
use crate::scene::{Attrs, NodeId, SceneHost, ShapeKind};
use crate::selection::SelectionController;
use crate::series::{SeriesView, layout_series};
use crate::ticks::Axis;
use crate::title::{TitleView, layout_title};

/// Latest bus payloads not yet applied to the scene
#[derive(Debug, Default)]
struct Inbox {
    selection: Cell<Option<SelectionRange>>,
    legend: RefCell<Option<LegendMap>>,
}

#[derive(Debug, Clone, Copy)]
enum Subscription {
    Selection(SubscriptionId),
    Legend(SubscriptionId),
}

fn layout_or_skip<T>(component: &'static str, layout: Result<T>) -> Option<T> {
    match layout {
        Ok(layout) => Some(layout),
        Err(e) if e.is_recoverable() => {
            tracing::debug!(component, error = %e, "skipping component layout");
            None
        }
        Err(e) => {
            tracing::warn!(component, error = %e, "skipping component layout");
            None
        }
    }
}

// ============================================================================
// CHART
// ============================================================================

#[derive(Debug)]
pub struct Chart {
    config: Rc<ChartConfig>,
    bus: Rc<EventBus>,
    root: NodeId,
    title: Option<TitleView>,
    y_axis: Option<AxisView>,
    x_axis: Option<AxisView>,
    series: Option<SeriesView>,
    legend: Option<LegendView>,
    selection: Option<SelectionController>,
    view: SelectionRange,
    inbox: Rc<Inbox>,
    subscriptions: Vec<Subscription>,
}

impl Chart {
    /// Validate `config` and build every enabled component.
    ///
    /// A component whose layout fails is logged and left out; validation and
    /// host failures abort the whole chart.
    pub fn mount(config: ChartConfig, host: &mut dyn SceneHost, bus: Rc<EventBus>) -> Result<Self> {
        config.validate()?;
        let config = Rc::new(config);
        let view = SelectionRange::full();
        let mut children = Vec::new();

        let title = match layout_title(&config) {
            Some(layout) => Some(TitleView::mount(host, &config, &layout)?),
            None => None,
        };

        let mut axes: [Option<AxisView>; 2] = [None, None];
        for (slot, axis) in axes.iter_mut().zip([Axis::Y, Axis::X]) {
            if !axis_enabled(&config, axis) {
                continue;
            }
            if let Some(layout) = layout_or_skip("axis", layout_axis(&config, axis, &view)) {
                *slot = Some(AxisView::mount(host, &config, &layout)?);
            }
        }
        let [y_axis, x_axis] = axes;

        let series = match layout_or_skip("series", layout_series(&config, &view)) {
            Some(layout) => Some(SeriesView::mount(host, &config, &layout)?),
            None => None,
        };

        let legend = if config.legend.enabled {
            Some(LegendView::mount(host, &config, &layout_legend(&config))?)
        } else {
            None
        };

        let selection = if config.select_area.select_type.is_enabled() {
            Some(SelectionController::mount(host, Rc::clone(&config))?)
        } else {
            None
        };

        children.extend(title.as_ref().map(|t| t.group));
        children.extend(y_axis.as_ref().map(|a| a.group));
        children.extend(x_axis.as_ref().map(|a| a.group));
        children.extend(series.as_ref().map(|s| s.group));
        children.extend(legend.as_ref().map(|l| l.group));
        children.extend(selection.as_ref().map(|s| s.group()));

        let styles = config.styles();
        let root = host.create_shape(
            ShapeKind::Group,
            Attrs::new()
                .with("class", "brushline-chart")
                .with("font-family", "sans-serif")
                .with("color", styles.main_font),
            &children,
        )?;

        tracing::info!(
            width = config.chart.width,
            height = config.chart.height,
            series = config.series.len(),
            selectable = selection.is_some(),
            "chart mounted"
        );

        Ok(Self {
            config,
            bus,
            root,
            title,
            y_axis,
            x_axis,
            series,
            legend,
            selection,
            view,
            inbox: Rc::new(Inbox::default()),
            subscriptions: Vec::new(),
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Selection the chart is currently drawn through
    pub fn view(&self) -> SelectionRange {
        self.view
    }

    pub fn title(&self) -> Option<&TitleView> {
        self.title.as_ref()
    }

    pub fn y_axis(&self) -> Option<&AxisView> {
        self.y_axis.as_ref()
    }

    pub fn x_axis(&self) -> Option<&AxisView> {
        self.x_axis.as_ref()
    }

    pub fn series(&self) -> Option<&SeriesView> {
        self.series.as_ref()
    }

    pub fn legend(&self) -> Option<&LegendView> {
        self.legend.as_ref()
    }

    pub fn selection(&self) -> Option<&SelectionController> {
        self.selection.as_ref()
    }

    pub fn selection_range(&self) -> Option<SelectionRange> {
        self.selection.as_ref().map(SelectionController::range)
    }

    // ========================================================================
    // In-place updates
    // ========================================================================

    /// Redraw axes and series for the data visible through `range`
    pub fn apply_selection(&mut self, host: &mut dyn SceneHost, range: SelectionRange) -> Result<()> {
        if !range.is_valid() {
            return Err(ChartError::OutOfBoundsSelection(range));
        }
        self.view = range;

        for view in [&self.y_axis, &self.x_axis].into_iter().flatten() {
            if let Some(layout) = layout_or_skip("axis", layout_axis(&self.config, view.axis, &range)) {
                view.update(host, &layout)?;
            }
        }
        if let Some(view) = &self.series {
            if let Some(layout) = layout_or_skip("series", layout_series(&self.config, &range)) {
                view.update(host, &layout)?;
            }
        }
        Ok(())
    }

    /// Show or hide series and legend check marks
    pub fn apply_legend(&mut self, host: &mut dyn SceneHost, legend: &LegendMap) -> Result<()> {
        if let Some(series) = &self.series {
            series.apply_visibility(host, legend)?;
        }
        if let Some(view) = &self.legend {
            view.apply_visibility(host, legend)?;
        }
        Ok(())
    }

    // ========================================================================
    // Bus
    // ========================================================================

    /// Queue selections published on the bus for [`Chart::sync`]
    pub fn follow_selection(&mut self) {
        let inbox = Rc::clone(&self.inbox);
        let id = self
            .bus
            .subscribe::<SelectionChanged>(move |e| inbox.selection.set(Some(e.0)));
        self.subscriptions.push(Subscription::Selection(id));
    }

    /// Queue legend maps published on the bus for [`Chart::sync`]
    pub fn follow_legend(&mut self) {
        let inbox = Rc::clone(&self.inbox);
        let id = self
            .bus
            .subscribe::<LegendChanged>(move |e| *inbox.legend.borrow_mut() = Some(e.0.clone()));
        self.subscriptions.push(Subscription::Legend(id));
    }

    /// Apply queued bus payloads; returns whether anything changed
    pub fn sync(&mut self, host: &mut dyn SceneHost) -> Result<bool> {
        let mut changed = false;
        if let Some(range) = self.inbox.selection.take() {
            self.apply_selection(host, range)?;
            changed = true;
        }
        let legend = self.inbox.legend.borrow_mut().take();
        if let Some(legend) = legend {
            self.apply_legend(host, &legend)?;
            changed = true;
        }
        Ok(changed)
    }

    // ========================================================================
    // Pointer input (chart-local coordinates)
    // ========================================================================

    /// Start a drag when the point hits the selection frame
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let Some(controller) = self.selection.as_mut() else {
            return false;
        };
        match controller.target_at(x, y) {
            Some(target) => controller.pointer_down(target, (x, y)),
            None => false,
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.selection.as_mut().is_some_and(|c| c.pointer_move((x, y)))
    }

    pub fn pointer_up(&mut self, host: &mut dyn SceneHost) -> Result<Option<SelectionRange>> {
        match self.selection.as_mut() {
            Some(controller) => controller.pointer_up(host, &self.bus),
            None => Ok(None),
        }
    }

    pub fn on_animation_frame(&mut self, host: &mut dyn SceneHost) -> Result<Option<SelectionRange>> {
        match self.selection.as_mut() {
            Some(controller) => controller.on_animation_frame(host, &self.bus),
            None => Ok(None),
        }
    }

    pub fn cancel_drag(&mut self) {
        if let Some(controller) = self.selection.as_mut() {
            controller.cancel();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.as_ref().is_some_and(|c| !c.is_idle())
    }

    /// Programmatic selection; a chart without a selection area ignores it
    pub fn select(&mut self, host: &mut dyn SceneHost, range: SelectionRange) -> Result<Option<SelectionRange>> {
        match self.selection.as_mut() {
            Some(controller) => controller.select(host, &self.bus, range),
            None => Ok(None),
        }
    }

    /// Series name of the legend entry under a chart-local point
    pub fn legend_entry_at(&self, x: f64, y: f64) -> Option<&str> {
        self.legend.as_ref().and_then(|l| l.entry_at(x, y))
    }
}

impl Drop for Chart {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            match subscription {
                Subscription::Selection(id) => self.bus.unsubscribe::<SelectionChanged>(id),
                Subscription::Legend(id) => self.bus.unsubscribe::<LegendChanged>(id),
            };
        }
    }
}

// ============================================================================
// CHART PAIR
// ============================================================================

/// A main chart zoomed by the selection area of a brush chart
#[derive(Debug)]
pub struct ChartPair {
    main: Chart,
    brush: Chart,
}

impl ChartPair {
    pub fn mount(
        main: ChartConfig,
        brush: ChartConfig,
        host: &mut dyn SceneHost,
        bus: Rc<EventBus>,
    ) -> Result<Self> {
        if !brush.select_area.select_type.is_enabled() {
            return Err(ChartError::invalid_input("brush chart needs a selectArea type"));
        }

        let mut main = Chart::mount(main, host, Rc::clone(&bus))?;
        let mut brush = Chart::mount(brush, host, bus)?;

        main.follow_selection();
        main.follow_legend();
        brush.follow_legend();

        if let Some(range) = brush.selection_range().filter(|r| *r != SelectionRange::full()) {
            main.apply_selection(host, range)?;
        }

        Ok(Self { main, brush })
    }

    pub fn main(&self) -> &Chart {
        &self.main
    }

    pub fn brush(&self) -> &Chart {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Chart {
        &mut self.brush
    }

    /// Apply the brush's queued candidate, then let both charts catch up
    pub fn on_animation_frame(&mut self, host: &mut dyn SceneHost) -> Result<bool> {
        let applied = self.brush.on_animation_frame(host)?;
        self.sync(host)?;
        Ok(applied.is_some())
    }

    pub fn pointer_up(&mut self, host: &mut dyn SceneHost) -> Result<bool> {
        let applied = self.brush.pointer_up(host)?;
        self.sync(host)?;
        Ok(applied.is_some())
    }

    /// Restore legend visibility on both charts, e.g. after a remount
    pub fn apply_legend(&mut self, host: &mut dyn SceneHost, legend: &LegendMap) -> Result<()> {
        self.main.apply_legend(host, legend)?;
        self.brush.apply_legend(host, legend)
    }

    pub fn sync(&mut self, host: &mut dyn SceneHost) -> Result<()> {
        self.main.sync(host)?;
        self.brush.sync(host)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::selection::Edge;
    use brushline_core::{SelectType, Series, ThemeKey};
    use brushline_state::AppState;

    fn series() -> Vec<Series> {
        let a: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 10.0, (i * 7 % 11) as f64 + 1.0)).collect();
        let b: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 10.0, (i * 3 % 5) as f64 + 2.0)).collect();
        vec![Series::from_pairs("#0", "", &a), Series::from_pairs("#1", "", &b)]
    }

    fn main_config() -> ChartConfig {
        ChartConfig::new(600.0, 400.0).with_title("Followers").with_series(series())
    }

    fn brush_config() -> ChartConfig {
        ChartConfig::new(600.0, 100.0)
            .without_title()
            .without_axes()
            .without_legend()
            .with_series(series())
            .with_select_area(SelectType::X, SelectionRange::full())
    }

    #[test]
    fn test_mount_builds_all_components() {
        let mut scene = Scene::new();
        let chart = Chart::mount(main_config(), &mut scene, Rc::new(EventBus::new())).unwrap();

        assert!(chart.title().is_some());
        assert!(chart.y_axis().is_some());
        assert!(chart.x_axis().is_some());
        assert_eq!(chart.series().unwrap().paths.len(), 2);
        assert_eq!(chart.legend().unwrap().entries.len(), 2);
        assert!(chart.selection().is_none());
        assert_eq!(scene.find_all(chart.root(), ShapeKind::Path).len(), 6 + 1 + 1 + 2 + 2);
    }

    #[test]
    fn test_invalid_config_fails_mount() {
        let mut scene = Scene::new();
        let mut config = main_config();
        config.chart.width = 0.0;
        assert!(Chart::mount(config, &mut scene, Rc::new(EventBus::new())).is_err());
    }

    #[test]
    fn test_empty_series_skips_data_components() {
        let mut scene = Scene::new();
        let chart = Chart::mount(ChartConfig::new(300.0, 200.0), &mut scene, Rc::new(EventBus::new())).unwrap();

        assert!(chart.title().is_some());
        assert!(chart.y_axis().is_none());
        assert!(chart.series().is_none());
    }

    #[test]
    fn test_apply_selection_creates_no_nodes() {
        let mut scene = Scene::new();
        let mut chart = Chart::mount(main_config(), &mut scene, Rc::new(EventBus::new())).unwrap();
        let created = scene.node_count();
        let path = chart.series().unwrap().paths[0].1;
        let before = scene.attr(path, "d").map(str::to_string);

        chart.apply_selection(&mut scene, SelectionRange::new(0.2, 0.0, 0.5, 1.0)).unwrap();

        assert_eq!(scene.node_count(), created);
        assert_ne!(scene.attr(path, "d").map(str::to_string), before);
        assert_eq!(chart.view(), SelectionRange::new(0.2, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_single_point_window_stays_finite() {
        let mut scene = Scene::new();
        let mut chart = Chart::mount(main_config(), &mut scene, Rc::new(EventBus::new())).unwrap();

        // len 10, window [0.5, 0.5] -> one point, degenerate x domain
        chart.apply_selection(&mut scene, SelectionRange::new(0.5, 0.0, 0.5, 1.0)).unwrap();

        let series = chart.series().unwrap();
        for (_, node) in &series.paths {
            let d = scene.attr(*node, "d").unwrap();
            assert!(!d.contains("NaN") && !d.contains("inf"));
            assert!(!d.contains('L'));
        }
        let label = chart.x_axis().unwrap().labels[0];
        assert_eq!(scene.text(label), Some("50"));
    }

    #[test]
    fn test_pair_drag_zooms_main_chart() {
        let mut scene = Scene::new();
        let bus = Rc::new(EventBus::new());
        let mut pair = ChartPair::mount(main_config(), brush_config(), &mut scene, Rc::clone(&bus)).unwrap();
        let created = scene.node_count();
        let path = pair.main().series().unwrap().paths[0].1;
        let before = scene.attr(path, "d").map(str::to_string);

        let left = pair.brush().selection().unwrap().geometry().handles[Edge::Left.index()];
        let (x, y) = (left.center_x(), left.center_y());
        assert!(pair.brush_mut().pointer_down(x, y));
        for dx in [20.0, 60.0, 120.0] {
            assert!(pair.brush_mut().pointer_move(x + dx, y));
        }
        assert!(pair.on_animation_frame(&mut scene).unwrap());

        assert_eq!(scene.node_count(), created);
        assert_ne!(scene.attr(path, "d").map(str::to_string), before);
        let view = pair.main().view();
        assert!(view.x1 > 0.0 && view.x2 == 1.0);
        assert_eq!(Some(view), pair.brush().selection_range());
        // the brush keeps drawing its full data
        assert_eq!(pair.brush().view(), SelectionRange::full());

        assert!(!pair.pointer_up(&mut scene).unwrap());
        assert!(!pair.brush().is_dragging());
    }

    #[test]
    fn test_brush_collapsed_at_right_edge_redraws_main() {
        let mut scene = Scene::new();
        let mut pair = ChartPair::mount(main_config(), brush_config(), &mut scene, Rc::new(EventBus::new())).unwrap();
        let path = pair.main().series().unwrap().paths[0].1;
        let label = pair.main().x_axis().unwrap().labels[0];
        let before = scene.attr(path, "d").map(str::to_string);
        assert_eq!(scene.text(label), Some("0"));

        let controller = pair.brush().selection().unwrap();
        let track = controller.content().inner_width - pair.brush().config().select_area.border_width;
        let left = controller.geometry().handles[Edge::Left.index()];
        let (x, y) = (left.center_x(), left.center_y());
        assert!(pair.brush_mut().pointer_down(x, y));
        assert!(pair.brush_mut().pointer_move(x + track, y));
        assert!(pair.pointer_up(&mut scene).unwrap());

        let collapsed = SelectionRange::new(1.0, 0.0, 1.0, 1.0);
        assert_eq!(pair.brush().selection_range(), Some(collapsed));
        assert_eq!(pair.main().view(), collapsed);

        let d = scene.attr(path, "d").unwrap();
        assert_ne!(Some(d.to_string()), before);
        assert!(d.starts_with('M') && !d.contains('L'));
        assert!(!d.contains("NaN") && !d.contains("inf"));
        assert_eq!(scene.text(label), Some("90"));
    }

    #[test]
    fn test_pair_applies_initial_range() {
        let mut scene = Scene::new();
        let brush = brush_config().with_select_area(SelectType::X, SelectionRange::new(0.0, 0.0, 0.5, 1.0));
        let pair = ChartPair::mount(main_config(), brush, &mut scene, Rc::new(EventBus::new())).unwrap();
        assert_eq!(pair.main().view(), SelectionRange::new(0.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_pair_requires_selectable_brush() {
        let mut scene = Scene::new();
        let brush = brush_config().with_select_area(SelectType::None, SelectionRange::full());
        assert!(ChartPair::mount(main_config(), brush, &mut scene, Rc::new(EventBus::new())).is_err());
    }

    #[test]
    fn test_legend_toggle_reaches_both_charts() {
        let mut scene = Scene::new();
        let state = AppState::new(ThemeKey::Day).with_series(&series());
        let mut pair = ChartPair::mount(main_config(), brush_config(), &mut scene, state.bus()).unwrap();
        let created = scene.node_count();

        state.toggle_series("#1");
        pair.sync(&mut scene).unwrap();

        let main_path = pair.main().series().unwrap().paths[1].1;
        let brush_path = pair.brush().series().unwrap().paths[1].1;
        assert_eq!(scene.attr(main_path, "stroke-opacity"), Some("0"));
        assert_eq!(scene.attr(brush_path, "stroke-opacity"), Some("0"));
        assert_eq!(scene.node_count(), created);

        state.toggle_series("#1");
        pair.sync(&mut scene).unwrap();
        assert_eq!(scene.attr(main_path, "stroke-opacity"), Some("1"));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let mut scene = Scene::new();
        let bus = Rc::new(EventBus::new());
        let pair = ChartPair::mount(main_config(), brush_config(), &mut scene, Rc::clone(&bus)).unwrap();
        assert_eq!(bus.subscriber_count::<LegendChanged>(), 2);
        drop(pair);
        assert_eq!(bus.subscriber_count::<LegendChanged>(), 0);
        assert_eq!(bus.subscriber_count::<SelectionChanged>(), 0);
    }

    #[test]
    fn test_svg_output() {
        let mut scene = Scene::new();
        let chart = Chart::mount(main_config(), &mut scene, Rc::new(EventBus::new())).unwrap();
        let svg = scene.to_svg(chart.root(), 600.0, 400.0);
        assert!(svg.contains("Followers"));
        assert!(svg.contains(r#"class="series""#));
    }
}
