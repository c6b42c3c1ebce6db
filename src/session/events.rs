use serde::Serialize;

use crate::geometry::Point;
use crate::layout::{Section, ZoneId};
use crate::manifest::ItemId;

/// Discrete inputs a host can feed through
/// [`SessionController::apply`](super::SessionController::apply). Every
/// mutation of the session happens as a synchronous reaction to one of
/// these.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ScanSubmitted(String),
    AddOne(ItemId),
    RemoveOne(ItemId),
    BeginEdit(ItemId),
    CommitEdit(ItemId, i64),
    CancelEdit,
    BeginDrag(Section),
    UpdateDrag(Point),
    EndDrag(Point),
    CancelDrag,
    ResizeZone(ZoneId, i32, i32),
    Tick,
}

/// Why a scan or add was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Code matched nothing in the manifest. Resets the combo streak.
    UnknownCode,
    /// Harmless duplicate of a complete item. Leaves the streak alone.
    AlreadyFulfilled,
}

/// Package delivered to the session-complete collaborator, exactly once per
/// fulfillment episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub elapsed_seconds: u64,
    /// Ledger snapshot in fulfillment order.
    pub fulfilled_ids: Vec<ItemId>,
    /// Accepted scans as a percentage of all scan attempts; 100 when the
    /// session saw no scans.
    pub accuracy: u8,
    /// True when no unknown code was ever scanned.
    pub perfect_streak: bool,
    /// Blake3 hex fingerprint of the per-item counts, for host-side dedupe.
    pub fingerprint: String,
}

/// Events emitted for the rendering/audio collaborators, drained through
/// [`SessionController::take_events`](super::SessionController::take_events).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ScanAccepted {
        id: ItemId,
    },
    ScanRejected {
        code: String,
        reason: RejectReason,
    },
    /// An item just reached its expected quantity.
    ItemFulfilled {
        id: ItemId,
    },
    /// One unit was removed from the tally.
    ItemRemoved {
        id: ItemId,
    },
    ComboThreshold {
        streak: u32,
    },
    /// Two sections exchanged zones via drag-and-drop.
    SectionsSwapped {
        section: Section,
        zone: ZoneId,
        displaced: Option<Section>,
    },
    /// Sixty accumulated seconds passed while the clock was running.
    MinuteTick {
        elapsed_seconds: u64,
    },
    SessionComplete(SessionSummary),
}
