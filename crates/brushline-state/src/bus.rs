//! Typed publish/subscribe bus
//!
//! The event set is closed: every payload type owns a dedicated channel on the
//! bus, so subscribers are matched by type rather than by name.
//!
//! ```ignore
//! let bus = EventBus::new();
//! bus.subscribe::<SelectionChanged>(|e| println!("{:?}", e.0));
//! bus.publish(SelectionChanged(SelectionRange::full()));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use brushline_core::{SelectionRange, ThemeKey};

use crate::LegendMap;

// ============================================================================
// EVENTS
// ============================================================================

/// Brush selection was accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionChanged(pub SelectionRange);

/// Legend visibility map after a toggle (`name -> hidden`)
#[derive(Debug, Clone, PartialEq)]
pub struct LegendChanged(pub LegendMap);

/// Color scheme was switched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSwitched(pub ThemeKey);

/// Payload type with a channel on [`EventBus`]
pub trait BusEvent: Sized + 'static {
    fn channel(bus: &EventBus) -> &Channel<Self>;
}

impl BusEvent for SelectionChanged {
    fn channel(bus: &EventBus) -> &Channel<Self> {
        &bus.selection
    }
}

impl BusEvent for LegendChanged {
    fn channel(bus: &EventBus) -> &Channel<Self> {
        &bus.legend
    }
}

impl BusEvent for ThemeSwitched {
    fn channel(bus: &EventBus) -> &Channel<Self> {
        &bus.theme
    }
}

// ============================================================================
// CHANNEL
// ============================================================================

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

/// Subscriber list for a single event type
pub struct Channel<E> {
    handlers: RefCell<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> Default for Channel<E> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<E> Channel<E> {
    fn add(&self, id: SubscriptionId, handler: Handler<E>) {
        self.handlers.borrow_mut().push((id, handler));
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != id);
        handlers.len() != before
    }

    fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    fn dispatch(&self, event: &E) -> usize {
        // Snapshot so handlers may subscribe or publish while being called
        let snapshot: Vec<Handler<E>> = self.handlers.borrow().iter().map(|(_, h)| Rc::clone(h)).collect();
        for handler in &snapshot {
            handler(event);
        }
        snapshot.len()
    }
}

// ============================================================================
// EVENT BUS
// ============================================================================

/// Single-threaded event bus shared by a chart pair
#[derive(Default)]
pub struct EventBus {
    selection: Channel<SelectionChanged>,
    legend: Channel<LegendChanged>,
    theme: Channel<ThemeSwitched>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for events of type `E`
    pub fn subscribe<E: BusEvent>(&self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        E::channel(self).add(id, Rc::new(handler));
        id
    }

    /// Remove a handler; returns whether it was registered
    pub fn unsubscribe<E: BusEvent>(&self, id: SubscriptionId) -> bool {
        E::channel(self).remove(id)
    }

    /// Deliver `event` to every handler in subscription order.
    /// Returns the number of handlers called.
    pub fn publish<E: BusEvent>(&self, event: E) -> usize {
        let delivered = E::channel(self).dispatch(&event);
        tracing::trace!(event = std::any::type_name::<E>(), delivered, "published");
        delivered
    }

    pub fn subscriber_count<E: BusEvent>(&self) -> usize {
        E::channel(self).len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("selection", &self.selection.len())
            .field("legend", &self.legend.len())
            .field("theme", &self.theme.len())
            .finish()
    }
}
