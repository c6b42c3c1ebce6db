//! Packline: the state core of a warehouse order-fulfillment screen.
//!
//! Operators scan or click items against an order manifest; this crate owns
//! the tally ledger, scan validation, combo scoring, the completion-gated
//! session clock, transactional quantity edits, and the drag-swappable
//! panel layout. Rendering, audio, and order loading are external
//! collaborators: they feed input events in and drain [`SessionEvent`]s
//! out.

pub mod combo;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod ledger;
pub mod logging;
pub mod manifest;
pub mod metrics;
pub mod scan;
pub mod session;
pub mod timer;

pub use combo::{ComboScorer, ComboState};
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use geometry::{Point, Rect, Size};
pub use layout::{
    DragState, LayoutManager, LayoutView, Section, SwapRecord, ZONE_BOTTOM_LEFT,
    ZONE_BOTTOM_RIGHT, ZONE_TOP, Zone, ZoneId, ZoneView,
};
pub use ledger::{Partition, Progress, TallyLedger, count_fingerprint, partition, progress};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use manifest::{ItemId, Manifest, ManifestEntry};
pub use metrics::{MetricSnapshot, SessionMetrics};
pub use scan::{ScanOutcome, validate};
pub use session::{
    InputEvent, QuantityEditor, RejectReason, SessionController, SessionEvent, SessionSummary,
};
pub use timer::{SessionTimer, Tick, TimerState, TimerTransition};
