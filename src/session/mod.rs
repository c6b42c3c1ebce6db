//! Session controller orchestrator.
//!
//! One controller object owns the entire session (tally, timer, combo,
//! edit mode, layout) so the ordering invariants between them live in one
//! place instead of being a convention across call sites.

mod core;
mod edit;
pub mod events;

pub use core::SessionController;
pub use edit::QuantityEditor;
pub use events::{InputEvent, RejectReason, SessionEvent, SessionSummary};
