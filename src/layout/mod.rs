//! Layout module orchestrator.
//!
//! Sections are logical content blocks, zones are fixed positional slots;
//! the manager keeps their assignment a bijection while the operator drags
//! panels around or resizes individual zones. Everything here is orthogonal
//! to the tally: only section identifiers and pointer coordinates cross the
//! boundary.

mod core;
mod drag;

pub use core::{
    LayoutManager, LayoutView, MIN_ZONE_HEIGHT, MIN_ZONE_HEIGHT_MINIMIZED, MIN_ZONE_WIDTH,
    Section, SwapRecord, ZONE_BOTTOM_LEFT, ZONE_BOTTOM_RIGHT, ZONE_TOP, Zone, ZoneId, ZoneView,
};
pub use drag::DragState;
