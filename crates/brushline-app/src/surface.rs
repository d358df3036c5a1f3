//! Browser wiring for a mounted chart pair
//!
//! Pointer input on the brush starts a drag; moves anywhere in the window
//! feed it, and at most one animation frame is requested per burst of moves.
//! Clicks on the main chart's legend toggle series through [`AppState`].

use std::cell::RefCell;
use std::rc::Rc;

use brushline_charts::ChartPair;
use brushline_core::{ChartConfig, ChartError, Result, SelectionRange};
use brushline_state::AppState;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, MouseEvent, Window};

use crate::dom::{DomHost, js_error};

/// Pointer position relative to an element's top-left corner
fn local_point(element: &Element, event: &MouseEvent) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (event.client_x() as f64 - rect.left(), event.client_y() as f64 - rect.top())
}

fn log_failure(action: &'static str, result: Result<bool>) {
    match result {
        Err(e) if e.is_recoverable() => tracing::debug!(action, error = %e, "chart update skipped"),
        Err(e) => tracing::error!(action, error = %e, "chart update failed"),
        Ok(_) => {}
    }
}

// ============================================================================
// LISTENER
// ============================================================================

/// Registered DOM listener, removed on drop
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| js_error(event, e))?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

// ============================================================================
// SURFACE
// ============================================================================

struct Session {
    host: DomHost,
    pair: ChartPair,
    /// Handle of the requested animation frame, if any
    frame: Option<i32>,
}

/// A chart pair mounted into a container element, with its event wiring
pub struct ChartSurface {
    window: Window,
    session: Rc<RefCell<Session>>,
    listeners: Vec<Listener>,
    _on_frame: Rc<Closure<dyn FnMut(f64)>>,
}

impl ChartSurface {
    pub fn mount(container: &Element, main: ChartConfig, brush: ChartConfig, state: Rc<AppState>) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| ChartError::InvalidHost("no window available".to_string()))?;
        let mut host = DomHost::new()?;

        let main_svg = host.create_surface(main.chart.width, main.chart.height)?;
        let brush_svg = host.create_surface(brush.chart.width, brush.chart.height)?;

        let mut pair = ChartPair::mount(main, brush, &mut host, state.bus())?;
        pair.apply_legend(&mut host, &state.legend())?;
        host.attach(pair.main().root(), &main_svg)?;
        host.attach(pair.brush().root(), &brush_svg)?;

        for svg in [&main_svg, &brush_svg] {
            container.append_child(svg).map_err(|e| js_error("appendChild", e))?;
        }
        tracing::debug!(nodes = host.node_count(), "chart pair attached");

        let session = Rc::new(RefCell::new(Session {
            host,
            pair,
            frame: None,
        }));

        let on_frame = {
            let session = Rc::clone(&session);
            Rc::new(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
                let mut session = session.borrow_mut();
                session.frame = None;
                let Session { host, pair, .. } = &mut *session;
                log_failure("frame", pair.on_animation_frame(host));
            }))
        };

        let mut listeners = Vec::new();

        // Drag start on the brush
        {
            let session = Rc::clone(&session);
            let target = brush_svg.clone();
            listeners.push(Listener::add(&brush_svg, "pointerdown", move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let (x, y) = local_point(&target, event);
                if session.borrow_mut().pair.brush_mut().pointer_down(x, y) {
                    event.prevent_default();
                }
            })?);
        }

        // Moves are coalesced into one frame
        {
            let session = Rc::clone(&session);
            let target = brush_svg.clone();
            let frame_window = window.clone();
            let on_frame = Rc::clone(&on_frame);
            listeners.push(Listener::add(&window, "pointermove", move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let mut session = session.borrow_mut();
                if !session.pair.brush().is_dragging() {
                    return;
                }

                let (x, y) = local_point(&target, event);
                if !session.pair.brush_mut().pointer_move(x, y) || session.frame.is_some() {
                    return;
                }

                let callback: &Closure<dyn FnMut(f64)> = &on_frame;
                match frame_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(handle) => session.frame = Some(handle),
                    Err(e) => tracing::error!(error = ?e, "requestAnimationFrame failed"),
                }
            })?);
        }

        // Release anywhere flushes the pending candidate
        {
            let session = Rc::clone(&session);
            let frame_window = window.clone();
            listeners.push(Listener::add(&window, "pointerup", move |_event: Event| {
                let mut session = session.borrow_mut();
                if !session.pair.brush().is_dragging() {
                    return;
                }
                if let Some(handle) = session.frame.take() {
                    let _ = frame_window.cancel_animation_frame(handle);
                }
                let Session { host, pair, .. } = &mut *session;
                log_failure("pointerup", pair.pointer_up(host));
            })?);
        }

        for event in ["pointercancel", "blur"] {
            let session = Rc::clone(&session);
            listeners.push(Listener::add(&window, event, move |_event: Event| {
                session.borrow_mut().pair.brush_mut().cancel_drag();
            })?);
        }

        // Legend toggles
        {
            let session = Rc::clone(&session);
            let target = main_svg.clone();
            listeners.push(Listener::add(&main_svg, "click", move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let (x, y) = local_point(&target, event);
                let name = session.borrow().pair.main().legend_entry_at(x, y).map(str::to_string);
                let Some(name) = name else { return };

                let hidden = state.toggle_series(&name);
                tracing::debug!(series = %name, hidden, "legend toggled");

                let mut session = session.borrow_mut();
                let Session { host, pair, .. } = &mut *session;
                log_failure("legend", pair.sync(host).map(|_| true));
            })?);
        }

        Ok(Self {
            window,
            session,
            listeners,
            _on_frame: on_frame,
        })
    }

    /// Current brush selection
    pub fn selection_range(&self) -> Option<SelectionRange> {
        self.session.borrow().pair.brush().selection_range()
    }
}

impl Drop for ChartSurface {
    fn drop(&mut self) {
        if let Some(handle) = self.session.borrow_mut().frame.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        tracing::debug!(listeners = self.listeners.len(), "chart surface dropped");
    }
}
