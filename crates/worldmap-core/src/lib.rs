// crates/worldmap-core/src/lib.rs

//! # worldmap-core
//!
//! State and decisions of an interactive world map, with no rendering and no
//! I/O of its own. A front-end (the browser binding, the CLI) owns the map
//! library and the network; it forwards events into [`MapApp`] and applies
//! the [`Effect`]s that come back.

pub mod app; // Application context + event dispatch
pub mod config;
pub mod effect; // Typed commands for the front-end
pub mod error;
pub mod geo;
pub mod loader; // One-shot boundary load
pub mod manual;
pub mod names;
pub mod overlay; // Small-region markers
pub mod region;
pub mod search;
pub mod selection;
pub mod style;
pub mod text;
pub mod viewport;
// Wire structs of the two external sources
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::app::{AppEvent, MapApp, MapStats};
pub use crate::config::Config;
pub use crate::effect::{Effect, Effects, MapCommand, SearchEffect, Tone};
pub use crate::error::{MapError, Result};
pub use crate::geo::{Bounds, LatLng};
pub use crate::region::{MapRegion, Region, RegionId, RegionKind, RegionLayer, StyleState};
pub use crate::search::{SearchEngine, SearchPhase, SearchResultItem, Ticket};
pub use crate::selection::{Framing, PointerTarget, SelectionEngine};
pub use crate::text::BilingualName;
pub use crate::viewport::{headless, ElementProbe, Viewport};

pub mod prelude {
    pub use crate::app::{AppEvent, MapApp, MapStats};
    pub use crate::config::Config;
    pub use crate::effect::{Effect, MapCommand, SearchEffect, Tone};
    pub use crate::error::{MapError, Result};
    pub use crate::geo::{Bounds, LatLng};
    pub use crate::region::{MapRegion, RegionId};
    pub use crate::search::{SearchKey, SearchResultItem, Ticket};
    pub use crate::selection::PointerTarget;
    pub use crate::text::BilingualName;
    pub use crate::viewport::headless;
}
