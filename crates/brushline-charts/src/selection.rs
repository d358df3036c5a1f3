//! Brush selection area
//!
//! A draggable frame over the plot area: four border handles, an interior
//! drag area and four dimming rects covering everything outside the frame.
//!
//! ## State machine
//!
//! ```text
//! Idle --pointer_down(border, zoomable)--> DraggingBorder(edge)
//! Idle --pointer_down(area)--------------> DraggingArea
//! Dragging* --pointer_move--> Dragging* (queues a pending candidate)
//! Dragging* --pointer_up / cancel--> Idle
//! ```
//!
//! Pointer moves only queue a candidate. The latest candidate is applied on
//! the next animation frame (or on pointer-up), so bursts of moves cost one
//! layout pass per frame.

use std::rc::Rc;

use brushline_core::{BoxCoords, ChartConfig, ChartError, Result, SelectType, SelectionRange};
use brushline_state::{EventBus, SelectionChanged};

use crate::coords::content_box_below_title;
use crate::scene::{Attrs, NodeId, SceneHost, ShapeKind};

// ============================================================================
// TARGETS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Top => 2,
            Self::Bottom => 3,
        }
    }

    /// Left/right need an x zoom, top/bottom a y zoom
    pub fn is_zoomable(&self, select_type: SelectType) -> bool {
        match self {
            Self::Left | Self::Right => select_type.zooms_x(),
            Self::Top | Self::Bottom => select_type.zooms_y(),
        }
    }

    fn cursor(&self) -> &'static str {
        match self {
            Self::Left | Self::Right => "ew-resize",
            Self::Top | Self::Bottom => "ns-resize",
        }
    }
}

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Border(Edge),
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    DraggingBorder {
        edge: Edge,
        origin: (f64, f64),
        start: SelectionRange,
    },
    DraggingArea {
        origin: (f64, f64),
        start: SelectionRange,
    },
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Pixel rectangles of the selection frame.
///
/// Handles travel over `inner - border_width` so a handle at either end of
/// the range stays inside the content box, and a pointer delta of `d` pixels
/// moves a handle by exactly `d` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionGeometry {
    /// Indexed by [`Edge::index`]
    pub handles: [BoxCoords; 4],
    pub area: BoxCoords,
    /// Left, right, top, bottom
    pub dimming: [BoxCoords; 4],
}

impl SelectionGeometry {
    pub fn compute(content: &BoxCoords, range: &SelectionRange, border_width: f64) -> Self {
        let bw = border_width;
        let track_w = content.inner_width - bw;
        let track_h = content.inner_height - bw;

        let left = content.x1 + range.x1 * track_w;
        let right = content.x1 + range.x2 * track_w;
        let top = content.y1 + range.y1 * track_h;
        let bottom = content.y1 + range.y2 * track_h;

        let frame = BoxCoords::from_edges(left, top, right + bw, bottom + bw);

        Self {
            handles: [
                BoxCoords::from_origin(left, top, bw, frame.inner_height),
                BoxCoords::from_origin(right, top, bw, frame.inner_height),
                BoxCoords::from_origin(left, top, frame.inner_width, bw),
                BoxCoords::from_origin(left, bottom, frame.inner_width, bw),
            ],
            area: BoxCoords::from_edges(left + bw, top + bw, right, bottom),
            dimming: [
                BoxCoords::from_edges(content.x1, content.y1, frame.x1, content.y2),
                BoxCoords::from_edges(frame.x2, content.y1, content.x2, content.y2),
                BoxCoords::from_edges(frame.x1, content.y1, frame.x2, frame.y1),
                BoxCoords::from_edges(frame.x1, frame.y2, frame.x2, content.y2),
            ],
        }
    }

    /// Border first, then the interior
    pub fn target_at(&self, x: f64, y: f64) -> Option<DragTarget> {
        Edge::ALL
            .into_iter()
            .find(|edge| self.handles[edge.index()].contains(x, y))
            .map(DragTarget::Border)
            .or_else(|| self.area.contains(x, y).then_some(DragTarget::Area))
    }
}

fn rect_attrs(b: &BoxCoords) -> Attrs {
    Attrs::rect(b.x1, b.y1, b.inner_width, b.inner_height)
}

// ============================================================================
// CONTROLLER
// ============================================================================

#[derive(Debug, Clone)]
struct SelectionNodes {
    group: NodeId,
    handles: [NodeId; 4],
    area: NodeId,
    dimming: [NodeId; 4],
}

/// Owns the live selection range and its overlay nodes
#[derive(Debug)]
pub struct SelectionController {
    config: Rc<ChartConfig>,
    content: BoxCoords,
    range: SelectionRange,
    state: DragState,
    pending: Option<SelectionRange>,
    nodes: SelectionNodes,
}

impl SelectionController {
    pub fn mount(host: &mut dyn SceneHost, config: Rc<ChartConfig>) -> Result<Self> {
        let area_config = &config.select_area;
        if !area_config.ranges.is_valid() {
            return Err(ChartError::OutOfBoundsSelection(area_config.ranges));
        }

        let content = content_box_below_title(&config, &area_config.spacing);
        let range = area_config.ranges;
        let geometry = SelectionGeometry::compute(&content, &range, area_config.border_width);
        let styles = config.styles();

        let overlay = area_config.overlay_color.as_deref().unwrap_or(styles.select_frame_out_overlay);
        let mut dimming = [NodeId(0); 4];
        for (slot, b) in dimming.iter_mut().zip(&geometry.dimming) {
            *slot = host.create_shape(
                ShapeKind::Rect,
                rect_attrs(b)
                    .with("fill", overlay)
                    .with("fill-opacity", area_config.overlay_opacity)
                    .with("pointer-events", "none"),
                &[],
            )?;
        }

        let area = host.create_shape(
            ShapeKind::Rect,
            rect_attrs(&geometry.area).with("fill", "transparent").with("cursor", "move"),
            &[],
        )?;

        let border = area_config.border_color.as_deref().unwrap_or(styles.select_frame_borders);
        let mut handles = [NodeId(0); 4];
        for edge in Edge::ALL {
            let zoomable = edge.is_zoomable(area_config.select_type);
            handles[edge.index()] = host.create_shape(
                ShapeKind::Rect,
                rect_attrs(&geometry.handles[edge.index()])
                    .with("fill", border)
                    .with("cursor", if zoomable { edge.cursor() } else { "move" }),
                &[],
            )?;
        }

        let mut children = dimming.to_vec();
        children.push(area);
        children.extend(handles);
        let group = host.create_shape(ShapeKind::Group, Attrs::new().with("class", "select-area"), &children)?;

        Ok(Self {
            config,
            content,
            range,
            state: DragState::Idle,
            pending: None,
            nodes: SelectionNodes {
                group,
                handles,
                area,
                dimming,
            },
        })
    }

    pub fn group(&self) -> NodeId {
        self.nodes.group
    }

    pub fn range(&self) -> SelectionRange {
        self.range
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn pending(&self) -> Option<SelectionRange> {
        self.pending
    }

    pub fn content(&self) -> &BoxCoords {
        &self.content
    }

    fn select_type(&self) -> SelectType {
        self.config.select_area.select_type
    }

    fn border_width(&self) -> f64 {
        self.config.select_area.border_width
    }

    pub fn geometry(&self) -> SelectionGeometry {
        SelectionGeometry::compute(&self.content, &self.range, self.border_width())
    }

    /// Hit-test a chart-local point against the current frame
    pub fn target_at(&self, x: f64, y: f64) -> Option<DragTarget> {
        self.geometry().target_at(x, y)
    }

    // ========================================================================
    // Pointer protocol
    // ========================================================================

    /// Start a drag; returns whether the state left `Idle`
    pub fn pointer_down(&mut self, target: DragTarget, pointer: (f64, f64)) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = match target {
            DragTarget::Border(edge) if edge.is_zoomable(self.select_type()) => DragState::DraggingBorder {
                edge,
                origin: pointer,
                start: self.range,
            },
            DragTarget::Border(_) => return false,
            DragTarget::Area => DragState::DraggingArea {
                origin: pointer,
                start: self.range,
            },
        };
        tracing::debug!(?target, "selection drag started");
        true
    }

    /// Queue a candidate for the next frame; returns whether one was queued
    pub fn pointer_move(&mut self, pointer: (f64, f64)) -> bool {
        let Some(candidate) = self.candidate(pointer) else {
            return false;
        };
        if !candidate.is_valid() {
            tracing::debug!(
                error = %ChartError::OutOfBoundsSelection(candidate),
                "discarding selection candidate"
            );
            return false;
        }
        self.pending = Some(candidate);
        true
    }

    fn candidate(&self, pointer: (f64, f64)) -> Option<SelectionRange> {
        let (origin, start) = match self.state {
            DragState::Idle => return None,
            DragState::DraggingBorder { origin, start, .. } | DragState::DraggingArea { origin, start } => {
                (origin, start)
            }
        };

        let bw = self.border_width();
        let normalize = |delta: f64, inner: f64| {
            let track = inner - bw;
            if track > 0.0 { delta / track } else { 0.0 }
        };
        let dx = normalize(pointer.0 - origin.0, self.content.inner_width);
        let dy = normalize(pointer.1 - origin.1, self.content.inner_height);

        let mut next = start;
        match self.state {
            DragState::DraggingBorder { edge, .. } => match edge {
                Edge::Left => next.x1 += dx,
                Edge::Right => next.x2 += dx,
                Edge::Top => next.y1 += dy,
                Edge::Bottom => next.y2 += dy,
            },
            DragState::DraggingArea { .. } => {
                let select_type = self.select_type();
                if select_type.zooms_x() {
                    next.x1 += dx;
                    next.x2 += dx;
                }
                if select_type.zooms_y() {
                    next.y1 += dy;
                    next.y2 += dy;
                }
            }
            DragState::Idle => return None,
        }
        Some(next)
    }

    /// Apply the latest queued candidate
    pub fn on_animation_frame(&mut self, host: &mut dyn SceneHost, bus: &EventBus) -> Result<Option<SelectionRange>> {
        match self.pending.take() {
            Some(candidate) => self.apply(host, bus, candidate),
            None => Ok(None),
        }
    }

    /// End any drag, flushing the queued candidate first
    pub fn pointer_up(&mut self, host: &mut dyn SceneHost, bus: &EventBus) -> Result<Option<SelectionRange>> {
        let applied = self.on_animation_frame(host, bus);
        if !self.is_idle() {
            tracing::debug!(range = ?self.range, "selection drag finished");
        }
        self.state = DragState::Idle;
        applied
    }

    /// Drop the drag and its queued candidate without applying it
    pub fn cancel(&mut self) {
        self.pending = None;
        self.state = DragState::Idle;
    }

    /// Programmatic override through the same validation and notification path
    pub fn select(
        &mut self,
        host: &mut dyn SceneHost,
        bus: &EventBus,
        range: SelectionRange,
    ) -> Result<Option<SelectionRange>> {
        self.apply(host, bus, range)
    }

    fn apply(
        &mut self,
        host: &mut dyn SceneHost,
        bus: &EventBus,
        candidate: SelectionRange,
    ) -> Result<Option<SelectionRange>> {
        let accepted = match &self.config.select_area.on_select {
            Some(hook) => hook.call(candidate, &self.config).unwrap_or(candidate),
            None => candidate,
        };
        if !accepted.is_valid() {
            tracing::debug!(
                error = %ChartError::OutOfBoundsSelection(accepted),
                "discarding selection candidate"
            );
            return Ok(None);
        }
        if accepted == self.range {
            return Ok(None);
        }

        self.range = accepted;
        bus.publish(SelectionChanged(accepted));
        self.redraw(host)?;
        Ok(Some(accepted))
    }

    fn redraw(&self, host: &mut dyn SceneHost) -> Result<()> {
        let geometry = self.geometry();
        for (node, b) in self.nodes.handles.iter().zip(&geometry.handles) {
            host.set_attributes(*node, &rect_attrs(b))?;
        }
        for (node, b) in self.nodes.dimming.iter().zip(&geometry.dimming) {
            host.set_attributes(*node, &rect_attrs(b))?;
        }
        host.set_attributes(self.nodes.area, &rect_attrs(&geometry.area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use std::cell::RefCell;

    const BW: f64 = 10.0;

    // content box 0..110 x 0..110, track 100 px on both axes
    fn config(select_type: SelectType) -> ChartConfig {
        let mut config = ChartConfig::new(110.0, 110.0)
            .without_title()
            .without_legend()
            .with_select_area(select_type, SelectionRange::full());
        config.select_area.spacing = brushline_core::Spacing::zero();
        config.select_area.border_width = BW;
        config
    }

    fn mount(config: ChartConfig) -> (Scene, SelectionController) {
        let mut scene = Scene::new();
        let controller = SelectionController::mount(&mut scene, Rc::new(config)).unwrap();
        (scene, controller)
    }

    fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<SelectionRange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe::<SelectionChanged>(move |e| sink.borrow_mut().push(e.0));
        seen
    }

    #[test]
    fn test_geometry_full_range() {
        let content = BoxCoords::from_edges(0.0, 0.0, 110.0, 110.0);
        let g = SelectionGeometry::compute(&content, &SelectionRange::full(), BW);

        assert_eq!(g.handles[Edge::Left.index()], BoxCoords::from_origin(0.0, 0.0, BW, 110.0));
        assert_eq!(g.handles[Edge::Right.index()], BoxCoords::from_origin(100.0, 0.0, BW, 110.0));
        assert_eq!(g.area, BoxCoords::from_edges(10.0, 10.0, 100.0, 100.0));
        assert!(g.dimming.iter().all(|d| d.inner_width == 0.0 || d.inner_height == 0.0));
    }

    #[test]
    fn test_geometry_partial_range() {
        let content = BoxCoords::from_edges(0.0, 0.0, 110.0, 110.0);
        let g = SelectionGeometry::compute(&content, &SelectionRange::new(0.2, 0.0, 0.6, 1.0), BW);

        assert_eq!(g.handles[Edge::Left.index()].x1, 20.0);
        assert_eq!(g.handles[Edge::Right.index()].x1, 60.0);
        assert_eq!(g.dimming[0], BoxCoords::from_edges(0.0, 0.0, 20.0, 110.0));
        assert_eq!(g.dimming[1], BoxCoords::from_edges(70.0, 0.0, 110.0, 110.0));
        assert_eq!(g.target_at(25.0, 50.0), Some(DragTarget::Border(Edge::Left)));
        assert_eq!(g.target_at(45.0, 50.0), Some(DragTarget::Area));
        assert_eq!(g.target_at(90.0, 50.0), None);
    }

    #[test]
    fn test_non_zoomable_border_stays_idle() {
        let (_, mut c) = mount(config(SelectType::X));
        assert!(!c.pointer_down(DragTarget::Border(Edge::Top), (50.0, 0.0)));
        assert!(c.is_idle());
        assert!(c.pointer_down(DragTarget::Border(Edge::Left), (0.0, 50.0)));
        assert!(matches!(c.state(), DragState::DraggingBorder { edge: Edge::Left, .. }));
    }

    #[test]
    fn test_border_drag_moves_one_edge() {
        let (mut scene, mut c) = mount(config(SelectType::X));
        let bus = EventBus::new();
        let seen = recorder(&bus);

        c.pointer_down(DragTarget::Border(Edge::Left), (0.0, 50.0));
        assert!(c.pointer_move((30.0, 80.0)));
        let applied = c.on_animation_frame(&mut scene, &bus).unwrap();

        assert_eq!(applied, Some(SelectionRange::new(0.3, 0.0, 1.0, 1.0)));
        assert_eq!(*seen.borrow(), vec![SelectionRange::new(0.3, 0.0, 1.0, 1.0)]);
        assert!(!c.is_idle());
    }

    #[test]
    fn test_right_border_past_domain_is_discarded() {
        let (mut scene, mut c) = mount(config(SelectType::X));
        let bus = EventBus::new();
        let seen = recorder(&bus);

        c.pointer_down(DragTarget::Border(Edge::Right), (100.0, 50.0));
        // +50 px on a 100 px track -> x2 = 1.5
        assert!(!c.pointer_move((150.0, 50.0)));
        c.pointer_up(&mut scene, &bus).unwrap();

        assert_eq!(c.range(), SelectionRange::full());
        assert!(c.is_idle());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_crossing_edges_is_discarded() {
        let mut config = config(SelectType::X);
        config.select_area.ranges = SelectionRange::new(0.4, 0.0, 0.6, 1.0);
        let (_, mut c) = mount(config);

        c.pointer_down(DragTarget::Border(Edge::Left), (40.0, 50.0));
        assert!(!c.pointer_move((70.0, 50.0)));
        assert_eq!(c.pending(), None);
    }

    #[test]
    fn test_area_drag_pans_active_axes() {
        let mut config = config(SelectType::X);
        config.select_area.ranges = SelectionRange::new(0.2, 0.0, 0.4, 1.0);
        let (mut scene, mut c) = mount(config);
        let bus = EventBus::new();

        assert!(c.pointer_down(DragTarget::Area, (30.0, 50.0)));
        c.pointer_move((50.0, 90.0));
        c.pointer_up(&mut scene, &bus).unwrap();

        let r = c.range();
        assert!((r.x1 - 0.4).abs() < 1e-9 && (r.x2 - 0.6).abs() < 1e-9);
        assert_eq!((r.y1, r.y2), (0.0, 1.0));
        assert!(c.is_idle());
    }

    #[test]
    fn test_area_drag_pans_both_axes_for_xy() {
        let mut config = config(SelectType::XY);
        config.select_area.ranges = SelectionRange::new(0.25, 0.25, 0.5, 0.5);
        let (mut scene, mut c) = mount(config);
        let bus = EventBus::new();

        c.pointer_down(DragTarget::Area, (0.0, 0.0));
        c.pointer_move((25.0, -25.0));
        c.pointer_up(&mut scene, &bus).unwrap();

        assert_eq!(c.range(), SelectionRange::new(0.5, 0.0, 0.75, 0.25));
    }

    #[test]
    fn test_frame_applies_latest_candidate_only() {
        let (mut scene, mut c) = mount(config(SelectType::X));
        let bus = EventBus::new();
        let seen = recorder(&bus);

        c.pointer_down(DragTarget::Border(Edge::Left), (0.0, 50.0));
        for x in [10.0, 20.0, 40.0] {
            c.pointer_move((x, 50.0));
        }
        c.on_animation_frame(&mut scene, &bus).unwrap();
        c.on_animation_frame(&mut scene, &bus).unwrap();

        assert_eq!(*seen.borrow(), vec![SelectionRange::new(0.4, 0.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_pointer_up_flushes_pending() {
        let (mut scene, mut c) = mount(config(SelectType::X));
        let bus = EventBus::new();

        c.pointer_down(DragTarget::Border(Edge::Left), (0.0, 50.0));
        c.pointer_move((20.0, 50.0));
        let applied = c.pointer_up(&mut scene, &bus).unwrap();

        assert_eq!(applied, Some(SelectionRange::new(0.2, 0.0, 1.0, 1.0)));
        assert!(c.is_idle());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let (mut scene, mut c) = mount(config(SelectType::X));
        let bus = EventBus::new();

        c.pointer_down(DragTarget::Border(Edge::Left), (0.0, 50.0));
        c.pointer_move((20.0, 50.0));
        c.cancel();

        assert!(c.is_idle());
        assert_eq!(c.on_animation_frame(&mut scene, &bus).unwrap(), None);
        assert_eq!(c.range(), SelectionRange::full());
    }

    #[test]
    fn test_hook_replaces_candidate() {
        let config = config(SelectType::X).with_on_select(|r, _| {
            Some(SelectionRange::new((r.x1 * 10.0).round() / 10.0, r.y1, r.x2, r.y2))
        });
        let (mut scene, mut c) = mount(config);
        let bus = EventBus::new();

        let applied = c.select(&mut scene, &bus, SelectionRange::new(0.33, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(applied, Some(SelectionRange::new(0.3, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hook_result_is_validated() {
        let config = config(SelectType::X).with_on_select(|_, _| Some(SelectionRange::new(0.9, 0.0, 0.1, 1.0)));
        let (mut scene, mut c) = mount(config);
        let bus = EventBus::new();

        let applied = c.select(&mut scene, &bus, SelectionRange::new(0.2, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(applied, None);
        assert_eq!(c.range(), SelectionRange::full());
    }

    #[test]
    fn test_accepted_range_is_clamp_idempotent() {
        let (mut scene, mut c) = mount(config(SelectType::XY));
        let bus = EventBus::new();
        let seen = recorder(&bus);
        let range = SelectionRange::new(0.1, 0.2, 0.7, 0.9);

        assert_eq!(c.select(&mut scene, &bus, range).unwrap(), Some(range));
        assert_eq!(c.select(&mut scene, &bus, range).unwrap(), None);
        assert_eq!(c.range(), range);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_any_candidate_sequence_keeps_range_valid() {
        let (mut scene, mut c) = mount(config(SelectType::XY));
        let bus = EventBus::new();
        let targets = [
            DragTarget::Border(Edge::Left),
            DragTarget::Border(Edge::Right),
            DragTarget::Border(Edge::Top),
            DragTarget::Border(Edge::Bottom),
            DragTarget::Area,
        ];

        // deterministic pointer offsets in [-150, 150) px over a 100 px track
        let mut seed = 0x2545_f491_u64;
        let mut offset = move || {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (seed >> 33) as f64 / (1u64 << 31) as f64 * 300.0 - 150.0
        };

        let (mut queued, mut discarded) = (0, 0);
        for step in 0..300 {
            if c.is_idle() {
                c.pointer_down(targets[step % targets.len()], (0.0, 0.0));
            }
            if c.pointer_move((offset(), offset())) {
                queued += 1;
            } else {
                discarded += 1;
            }
            if let Some(pending) = c.pending() {
                assert!(pending.is_valid(), "step {step}: pending {pending:?}");
            }
            if step % 3 == 0 {
                c.on_animation_frame(&mut scene, &bus).unwrap();
            }
            if step % 7 == 0 {
                c.pointer_up(&mut scene, &bus).unwrap();
            }
            assert!(c.range().is_valid(), "step {step}: range {:?}", c.range());
        }
        assert!(queued > 0 && discarded > 0);
    }

    #[test]
    fn test_redraw_only_updates_attributes() {
        let (mut scene, mut c) = mount(config(SelectType::X));
        let bus = EventBus::new();
        let created = scene.node_count();

        c.select(&mut scene, &bus, SelectionRange::new(0.5, 0.0, 1.0, 1.0)).unwrap();

        assert_eq!(scene.node_count(), created);
        assert_eq!(scene.update_count(), 9);
        assert_eq!(scene.attr(c.nodes.handles[Edge::Left.index()], "x"), Some("50"));
    }
}
