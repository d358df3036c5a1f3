//! # brushline-state
//!
//! Shared interaction state for brushline charts.
//! A chart pair talks through a typed [`EventBus`]; theme and legend
//! visibility are page-wide and owned by [`AppState`].
//!
//! ## Modules
//!
//! - `bus` - typed publish/subscribe channels
//! - `legend` - series visibility map

pub mod bus;
pub mod legend;

pub use bus::*;
pub use legend::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use brushline_core::{Series, ThemeKey};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Page-wide state; mutations are published on the bus
#[derive(Debug, Default)]
pub struct AppState {
    theme: Cell<ThemeKey>,
    legend: RefCell<LegendState>,
    bus: Rc<EventBus>,
}

impl AppState {
    pub fn new(theme: ThemeKey) -> Self {
        Self {
            theme: Cell::new(theme),
            ..Self::default()
        }
    }

    /// Seed the legend map from the series of the first chart
    pub fn with_series(self, series: &[Series]) -> Self {
        *self.legend.borrow_mut() = LegendState::from_series(series);
        self
    }

    pub fn bus(&self) -> Rc<EventBus> {
        Rc::clone(&self.bus)
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn theme(&self) -> ThemeKey {
        self.theme.get()
    }

    /// Toggle theme
    pub fn toggle_theme(&self) -> ThemeKey {
        self.set_theme(self.theme.get().toggle());
        self.theme.get()
    }

    /// Set theme; publishes only when it changes and returns whether it did
    pub fn set_theme(&self, theme: ThemeKey) -> bool {
        let changed = self.theme.replace(theme) != theme;
        if changed {
            tracing::debug!(?theme, "theme switched");
            self.bus.publish(ThemeSwitched(theme));
        }
        changed
    }

    // ========================================================================
    // Legend
    // ========================================================================

    /// Flip a series and publish the resulting map
    pub fn toggle_series(&self, name: &str) -> bool {
        let (hidden, map) = {
            let mut legend = self.legend.borrow_mut();
            let hidden = legend.toggle(name);
            (hidden, legend.map().clone())
        };
        tracing::debug!(series = name, hidden, "legend toggled");
        self.bus.publish(LegendChanged(map));
        hidden
    }

    pub fn is_series_hidden(&self, name: &str) -> bool {
        self.legend.borrow().is_hidden(name)
    }

    pub fn legend(&self) -> LegendMap {
        self.legend.borrow().map().clone()
    }
}
