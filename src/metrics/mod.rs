use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated over one fulfillment session. Snapshots are emitted
/// through the structured logger at a configurable interval.
#[derive(Debug, Default, Clone)]
pub struct SessionMetrics {
    scans_accepted: u64,
    scans_rejected: u64,
    units_added: u64,
    units_removed: u64,
    edits_committed: u64,
    section_swaps: u64,
    ticks: u64,
    completions: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scan_accepted(&mut self) {
        self.scans_accepted = self.scans_accepted.saturating_add(1);
        self.units_added = self.units_added.saturating_add(1);
    }

    pub fn record_scan_rejected(&mut self) {
        self.scans_rejected = self.scans_rejected.saturating_add(1);
    }

    pub fn record_units_added(&mut self, count: u32) {
        self.units_added = self.units_added.saturating_add(u64::from(count));
    }

    pub fn record_units_removed(&mut self, count: u32) {
        self.units_removed = self.units_removed.saturating_add(u64::from(count));
    }

    pub fn record_edit_committed(&mut self) {
        self.edits_committed = self.edits_committed.saturating_add(1);
    }

    pub fn record_section_swap(&mut self) {
        self.section_swaps = self.section_swaps.saturating_add(1);
    }

    pub fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn record_completion(&mut self) {
        self.completions = self.completions.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            scans_accepted: self.scans_accepted,
            scans_rejected: self.scans_rejected,
            units_added: self.units_added,
            units_removed: self.units_removed,
            edits_committed: self.edits_committed,
            section_swaps: self.section_swaps,
            ticks: self.ticks,
            completions: self.completions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub scans_accepted: u64,
    pub scans_rejected: u64,
    pub units_added: u64,
    pub units_removed: u64,
    pub edits_committed: u64,
    pub section_swaps: u64,
    pub ticks: u64,
    pub completions: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("scans_accepted".to_string(), json!(self.scans_accepted));
        map.insert("scans_rejected".to_string(), json!(self.scans_rejected));
        map.insert("units_added".to_string(), json!(self.units_added));
        map.insert("units_removed".to_string(), json!(self.units_removed));
        map.insert("edits_committed".to_string(), json!(self.edits_committed));
        map.insert("section_swaps".to_string(), json!(self.section_swaps));
        map.insert("ticks".to_string(), json!(self.ticks));
        map.insert("completions".to_string(), json!(self.completions));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target,
            "session_metrics".to_string(),
            self.as_fields(),
        )
    }
}
