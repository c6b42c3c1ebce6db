use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the fulfillment session core.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by the session core. All of these are local and
/// recoverable; a failed operation leaves prior state unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("manifest entry `{0}` appears more than once")]
    DuplicateEntry(String),
    #[error("manifest entry `{0}` has an expected quantity of zero")]
    ZeroQuantity(String),
    #[error("item `{0}` is not part of the manifest")]
    UnknownItem(String),
    #[error("zone `{0}` not found")]
    ZoneNotFound(String),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
