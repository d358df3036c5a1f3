//! # brushline-charts
//!
//! Layout engine and retained SVG scene for brushline line charts.
//!
//! ## Architecture
//!
//! Layout is a set of pure functions from configuration to layout records.
//! Components turn layout records into scene nodes once, then only rewrite
//! attributes. Uses Strategy pattern for:
//! - Path generation (`PathGenerator`)
//! - Tick label formatting (`TickFormatter`, from brushline-core)
//! - Rendering surface (`SceneHost`)
//!
//! ## Modules
//!
//! - `coords` - spacing insets, text alignment, title offsets
//! - `domain` - series min/max with index windows
//! - `ticks` - tick values and positions
//! - `path` - SVG path strings
//! - `scene` - node handles, `SceneHost` and the in-memory `Scene`
//! - `title`, `axis`, `series`, `legend` - chart components
//! - `selection` - brush selection state machine
//! - `chart` - `Chart` assembly and the main/brush `ChartPair`

pub mod axis;
pub mod chart;
pub mod coords;
pub mod domain;
pub mod legend;
pub mod path;
pub mod scene;
pub mod selection;
pub mod series;
pub mod ticks;
pub mod title;

pub use axis::*;
pub use chart::*;
pub use coords::*;
pub use domain::*;
pub use legend::*;
pub use path::*;
pub use scene::*;
pub use selection::*;
pub use series::*;
pub use ticks::*;
pub use title::*;

// Re-export colors from brushline-core for convenience
pub use brushline_core::colors;
