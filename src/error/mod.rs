//! Error module orchestrator; implementation lives in the private `types`
//! submodule.

mod types;

pub use types::{Result, SessionError};
