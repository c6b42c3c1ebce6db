//! Manifest module orchestrator. The manifest is the fixed list of items and
//! expected quantities supplied by the host at session start; it never
//! changes for the lifetime of a session.

mod core;

pub use core::{ItemId, Manifest, ManifestEntry};
