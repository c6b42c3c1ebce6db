use std::collections::HashMap;
use std::time::Instant;

use serde_json::{Value, json};

use crate::combo::{ComboScorer, ComboState};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::ledger::{Partition, Progress, TallyLedger, count_fingerprint, partition, progress};
use crate::layout::{LayoutManager, LayoutView, Section, ZoneId};
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::manifest::{ItemId, Manifest};
use crate::metrics::SessionMetrics;
use crate::scan::{ScanOutcome, validate};
use crate::timer::{SessionTimer, TimerState, TimerTransition};

use super::edit::QuantityEditor;
use super::events::{InputEvent, RejectReason, SessionEvent, SessionSummary};

const SESSION_TARGET: &str = "packline::session";

/// Owns every piece of session state and reconciles all input into it.
///
/// Each operation runs the same fixed pipeline: ledger mutation, derived
/// view recompute, completion check, timer gate, combo update. Collaborators
/// never observe a ledger write without the matching completion and timer
/// state applied in the same step. Emitted [`SessionEvent`]s queue up until
/// the host drains them with [`take_events`](Self::take_events).
pub struct SessionController {
    manifest: Manifest,
    ledger: TallyLedger,
    scorer: ComboScorer,
    timer: SessionTimer,
    editor: QuantityEditor,
    layout: LayoutManager,
    config: SessionConfig,
    events: Vec<SessionEvent>,
    selected: Option<ItemId>,
    perfect_streak: bool,
    scans_accepted: u64,
    scans_rejected: u64,
    start_instant: Instant,
    last_metrics_emit: Instant,
}

impl SessionController {
    pub fn new(manifest: Manifest, layout: LayoutManager, config: SessionConfig) -> Self {
        let now = Instant::now();
        let scorer = ComboScorer::new(config.combo_threshold);
        let controller = Self {
            manifest,
            ledger: TallyLedger::new(),
            scorer,
            timer: SessionTimer::new(),
            editor: QuantityEditor::new(),
            layout,
            config,
            events: Vec::new(),
            selected: None,
            perfect_streak: true,
            scans_accepted: 0,
            scans_rejected: 0,
            start_instant: now,
            last_metrics_emit: now,
        };
        controller.log(
            LogLevel::Info,
            "session_started",
            [
                json_kv("items", json!(controller.manifest.len())),
                json_kv("expected_units", json!(controller.manifest.total_expected())),
            ],
        );
        controller
    }

    /// Dispatch for scripted input. Mirrors the direct operation surface
    /// one-to-one.
    pub fn apply(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::ScanSubmitted(code) => {
                self.submit_scan(&code);
            }
            InputEvent::AddOne(id) => {
                self.add_one(&id);
            }
            InputEvent::RemoveOne(id) => {
                self.remove_one(&id);
            }
            InputEvent::BeginEdit(id) => {
                self.begin_edit(&id);
            }
            InputEvent::CommitEdit(id, value) => {
                self.commit_edit(&id, value);
            }
            InputEvent::CancelEdit => {
                self.cancel_edit();
            }
            InputEvent::BeginDrag(section) => {
                self.begin_drag(section);
            }
            InputEvent::UpdateDrag(pointer) => {
                self.update_drag(pointer);
            }
            InputEvent::EndDrag(pointer) => {
                self.end_drag(pointer);
            }
            InputEvent::CancelDrag => {
                self.force_clear_drag();
            }
            InputEvent::ResizeZone(zone, dx, dy) => {
                self.resize_zone(&zone, dx, dy)?;
            }
            InputEvent::Tick => self.tick(),
        }
        Ok(())
    }

    // ---- tally input -----------------------------------------------------

    /// Validates a scanned or typed code and applies the outcome. Blank
    /// input is ignored entirely, matching scanner behavior where an empty
    /// submit is accidental.
    pub fn submit_scan(&mut self, code: &str) -> ScanOutcome {
        if code.trim().is_empty() {
            return ScanOutcome::UnknownCode;
        }
        let outcome = validate(code, &self.manifest, &self.ledger);
        match &outcome {
            ScanOutcome::Accepted(id) => {
                let id = id.clone();
                self.scans_accepted += 1;
                self.with_metrics(|m| m.record_scan_accepted());
                self.apply_acceptance(id, 1);
            }
            ScanOutcome::AlreadyFulfilled(id) => {
                self.scans_rejected += 1;
                self.with_metrics(|m| m.record_scan_rejected());
                self.events.push(SessionEvent::ScanRejected {
                    code: code.trim().to_string(),
                    reason: RejectReason::AlreadyFulfilled,
                });
                self.log(
                    LogLevel::Debug,
                    "scan_rejected",
                    [
                        json_kv("id", json!(id)),
                        json_kv("reason", json!("already_fulfilled")),
                    ],
                );
            }
            ScanOutcome::UnknownCode => {
                self.scans_rejected += 1;
                self.perfect_streak = false;
                self.with_metrics(|m| m.record_scan_rejected());
                self.events.push(SessionEvent::ScanRejected {
                    code: code.trim().to_string(),
                    reason: RejectReason::UnknownCode,
                });
                self.scorer.on_failure();
                self.log(
                    LogLevel::Debug,
                    "scan_rejected",
                    [
                        json_kv("code", json!(code.trim())),
                        json_kv("reason", json!("unknown_code")),
                    ],
                );
            }
        }
        outcome
    }

    /// Click-path increment. Returns false for unknown ids and for items
    /// already at their expected quantity; the duplicate case emits a
    /// rejection event but, unlike an unknown scan, leaves the streak alone.
    pub fn add_one(&mut self, id: &str) -> bool {
        let (canonical, expected) = match self.manifest.get(id) {
            Some(entry) => (entry.id.clone(), entry.expected_quantity),
            None => {
                self.log(LogLevel::Warn, "add_unknown_item", [json_kv("id", json!(id))]);
                return false;
            }
        };
        if self.ledger.count(id) >= expected {
            self.events.push(SessionEvent::ScanRejected {
                code: id.to_string(),
                reason: RejectReason::AlreadyFulfilled,
            });
            return false;
        }
        self.with_metrics(|m| m.record_units_added(1));
        self.apply_acceptance(canonical, 1);
        true
    }

    /// Removes the most recently fulfilled unit of `id`. Any removal resets
    /// the combo streak and may reopen a completed session.
    pub fn remove_one(&mut self, id: &str) -> bool {
        if !self.ledger.remove_last(id) {
            return false;
        }
        self.selected = Some(id.to_string());
        self.with_metrics(|m| m.record_units_removed(1));
        self.events.push(SessionEvent::ItemRemoved { id: id.to_string() });
        self.after_mutation();
        self.scorer.on_failure();
        self.log(
            LogLevel::Debug,
            "unit_removed",
            [
                json_kv("id", json!(id)),
                json_kv("count", json!(self.ledger.count(id))),
            ],
        );
        true
    }

    // ---- quantity editing ------------------------------------------------

    /// Enters edit mode for `id`, implicitly cancelling any other in-flight
    /// edit without applying it.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        if self.manifest.get(id).is_none() {
            self.log(LogLevel::Warn, "edit_unknown_item", [json_kv("id", json!(id))]);
            return false;
        }
        if let Some(cancelled) = self.editor.begin(id.to_string()) {
            self.log(
                LogLevel::Debug,
                "edit_cancelled_on_switch",
                [
                    json_kv("cancelled", json!(cancelled)),
                    json_kv("id", json!(id)),
                ],
            );
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Commits a direct overwrite of one item's fulfilled count, expressed
    /// as a single ledger delta transaction. The value clamps to
    /// `[0, expected_quantity]`; edits are always best effort. Returns false
    /// when `id` is not the current edit subject.
    pub fn commit_edit(&mut self, id: &str, value: i64) -> bool {
        if !self.editor.take_if(id) {
            self.log(
                LogLevel::Warn,
                "edit_commit_without_subject",
                [json_kv("id", json!(id))],
            );
            return false;
        }
        let Some(expected) = self.manifest.expected(id) else {
            return false;
        };
        let target = value.clamp(0, i64::from(expected)) as u32;
        let current = self.ledger.count(id);
        self.with_metrics(|m| m.record_edit_committed());
        self.log(
            LogLevel::Info,
            "edit_committed",
            [
                json_kv("id", json!(id)),
                json_kv("from", json!(current)),
                json_kv("to", json!(target)),
            ],
        );

        if target > current {
            let delta = target - current;
            self.with_metrics(|m| m.record_units_added(delta));
            // One transaction: a single combined success, not `delta`
            // separate streak increments.
            self.apply_acceptance(id.to_string(), delta);
        } else if target < current {
            let delta = current - target;
            for _ in 0..delta {
                if !self.ledger.remove_last(id) {
                    break;
                }
            }
            self.with_metrics(|m| m.record_units_removed(delta));
            self.events.push(SessionEvent::ItemRemoved { id: id.to_string() });
            self.after_mutation();
            self.scorer.on_failure();
        }
        true
    }

    /// Leaves edit mode without applying anything.
    pub fn cancel_edit(&mut self) -> bool {
        match self.editor.cancel() {
            Some(id) => {
                self.log(LogLevel::Debug, "edit_cancelled", [json_kv("id", json!(id))]);
                true
            }
            None => false,
        }
    }

    // ---- layout input ----------------------------------------------------

    pub fn begin_drag(&mut self, section: Section) -> bool {
        self.reap_stuck_drag();
        let started = self.layout.begin_drag(section);
        self.log(
            LogLevel::Debug,
            "drag_begin",
            [
                json_kv("section", json!(section.as_str())),
                json_kv("accepted", json!(started)),
            ],
        );
        started
    }

    pub fn update_drag(&mut self, pointer: Point) -> Option<ZoneId> {
        self.layout.update_drag(pointer)
    }

    /// Drops at `pointer`. Returns whether a swap happened; the drag state
    /// is cleared either way.
    pub fn end_drag(&mut self, pointer: Point) -> bool {
        match self.layout.end_drag(pointer) {
            Some(swap) => {
                self.with_metrics(|m| m.record_section_swap());
                self.log(
                    LogLevel::Info,
                    "sections_swapped",
                    [
                        json_kv("section", json!(swap.section.as_str())),
                        json_kv("to_zone", json!(swap.to_zone)),
                        json_kv(
                            "displaced",
                            json!(swap.displaced.map(|section| section.as_str())),
                        ),
                    ],
                );
                self.events.push(SessionEvent::SectionsSwapped {
                    section: swap.section,
                    zone: swap.to_zone,
                    displaced: swap.displaced,
                });
                true
            }
            None => false,
        }
    }

    pub fn force_clear_drag(&mut self) -> bool {
        let cleared = self.layout.force_clear_drag();
        if cleared {
            self.log(LogLevel::Debug, "drag_cancelled", std::iter::empty());
        }
        cleared
    }

    pub fn resize_zone(&mut self, zone_id: &str, dx: i32, dy: i32) -> Result<Size> {
        self.layout.resize_zone(zone_id, dx, dy)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.layout.set_viewport(viewport);
    }

    pub fn set_section_minimized(&mut self, section: Section, minimized: bool) {
        self.layout.set_section_minimized(section, minimized);
    }

    pub fn set_section_interacting(&mut self, section: Section, interacting: bool) {
        self.layout.set_section_interacting(section, interacting);
    }

    // ---- clock -----------------------------------------------------------

    /// One second of wall time. Advances the gated clock, reaps stuck drags,
    /// and emits a metrics snapshot when the interval elapses.
    pub fn tick(&mut self) {
        self.reap_stuck_drag();
        if let Some(tick) = self.timer.tick() {
            self.with_metrics(|m| m.record_tick());
            if tick.minute_boundary {
                self.events.push(SessionEvent::MinuteTick {
                    elapsed_seconds: tick.elapsed_seconds,
                });
            }
        }
        self.maybe_emit_metrics();
    }

    /// Host-driven pause (operator stepped away, app lost focus). The
    /// completion gate is unaffected.
    pub fn pause(&mut self) {
        self.timer.pause();
        self.log(LogLevel::Info, "session_paused", std::iter::empty());
    }

    pub fn resume(&mut self) {
        self.timer.resume();
        self.log(LogLevel::Info, "session_resumed", std::iter::empty());
    }

    // ---- query surface ---------------------------------------------------

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn count(&self, id: &str) -> u32 {
        self.ledger.count(id)
    }

    pub fn counts(&self) -> HashMap<ItemId, u32> {
        self.ledger.counts()
    }

    pub fn partition(&self) -> Partition {
        partition(&self.manifest, &self.ledger)
    }

    pub fn progress(&self) -> Progress {
        progress(&self.manifest, &self.ledger)
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn layout_view(&self) -> LayoutView {
        self.layout.view()
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn combo_state(&self) -> ComboState {
        self.scorer.state()
    }

    pub fn selected_item(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    pub fn editing_item(&self) -> Option<&ItemId> {
        self.editor.subject()
    }

    pub fn perfect_streak(&self) -> bool {
        self.perfect_streak
    }

    /// Drains the queued output events in emission order.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- internals -------------------------------------------------------

    /// Shared tail of every successful append path (scan, click, edit-up):
    /// ledger first, then fulfillment bookkeeping, completion/timer gate,
    /// and the combo update last.
    fn apply_acceptance(&mut self, id: ItemId, units: u32) {
        for _ in 0..units {
            self.ledger.append(id.clone());
        }
        self.events.push(SessionEvent::ScanAccepted { id: id.clone() });

        if self.ledger.is_fulfilled(&id, &self.manifest) {
            self.events.push(SessionEvent::ItemFulfilled { id: id.clone() });
            self.advance_selection(&id);
        } else {
            self.selected = Some(id.clone());
        }

        self.after_mutation();

        if let Some(streak) = self.scorer.on_success() {
            self.events.push(SessionEvent::ComboThreshold { streak });
        }
        self.log(
            LogLevel::Debug,
            "units_accepted",
            [
                json_kv("id", json!(id)),
                json_kv("units", json!(units)),
                json_kv("count", json!(self.ledger.count(&id))),
            ],
        );
    }

    /// Completion check and timer gate, run after every ledger mutation in
    /// the same logical step.
    fn after_mutation(&mut self) {
        let all = !self.manifest.is_empty() && self.ledger.all_fulfilled(&self.manifest);
        match self.timer.update_gate(all) {
            TimerTransition::Stopped { elapsed_seconds } => {
                let summary = self.build_summary(elapsed_seconds);
                self.with_metrics(|m| m.record_completion());
                self.log(
                    LogLevel::Info,
                    "session_complete",
                    [
                        json_kv("elapsed_seconds", json!(elapsed_seconds)),
                        json_kv("accuracy", json!(summary.accuracy)),
                        json_kv("fingerprint", json!(summary.fingerprint)),
                    ],
                );
                self.events.push(SessionEvent::SessionComplete(summary));
            }
            TimerTransition::Resumed => {
                self.log(LogLevel::Info, "completion_reopened", std::iter::empty());
            }
            TimerTransition::None => {}
        }
    }

    fn build_summary(&self, elapsed_seconds: u64) -> SessionSummary {
        let attempts = self.scans_accepted + self.scans_rejected;
        let accuracy = if attempts == 0 {
            100
        } else {
            (self.scans_accepted * 100 / attempts) as u8
        };
        SessionSummary {
            elapsed_seconds,
            fulfilled_ids: self.ledger.snapshot(),
            accuracy,
            perfect_streak: self.perfect_streak,
            fingerprint: count_fingerprint(&self.manifest, &self.ledger)
                .to_hex()
                .to_string(),
        }
    }

    /// Moves the selection to the next incomplete manifest entry after
    /// `completed_id`, in load order, clearing it when none remains.
    fn advance_selection(&mut self, completed_id: &str) {
        self.selected = self
            .manifest
            .entries()
            .iter()
            .find(|entry| {
                entry.id != completed_id
                    && self.ledger.count(&entry.id) < entry.expected_quantity
            })
            .map(|entry| entry.id.clone());
    }

    fn reap_stuck_drag(&mut self) {
        if self.layout.poll_drag_timeout(self.config.drag_timeout) {
            self.log(
                LogLevel::Warn,
                "stuck_drag_cleared",
                std::iter::empty(),
            );
        }
    }

    fn with_metrics(&self, f: impl FnOnce(&mut SessionMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                f(&mut guard);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() || self.config.metrics_interval.is_zero() {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_metrics_emit) < self.config.metrics_interval {
            return;
        }
        self.last_metrics_emit = now;

        let uptime = now.duration_since(self.start_instant);
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let event = guard
                    .snapshot(uptime)
                    .to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let _ = logger.log_event(event_with_fields(level, SESSION_TARGET, message, fields));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ZONE_BOTTOM_LEFT, ZONE_TOP};
    use crate::logging::MemorySink;
    use crate::manifest::ManifestEntry;
    use std::time::Duration;

    fn manifest() -> Manifest {
        Manifest::new(vec![
            ManifestEntry::new("A", "Widget", 2),
            ManifestEntry::new("B", "Gadget", 1),
        ])
        .unwrap()
    }

    fn session_with(manifest: Manifest, config: SessionConfig) -> SessionController {
        let layout = LayoutManager::default_for_viewport(Size::new(1200, 800));
        SessionController::new(manifest, layout, config)
    }

    fn session() -> SessionController {
        session_with(manifest(), SessionConfig::default())
    }

    fn completions(events: &[SessionEvent]) -> Vec<&SessionSummary> {
        events
            .iter()
            .filter_map(|event| match event {
                SessionEvent::SessionComplete(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn scenario_two_item_manifest() {
        let mut session = session();
        session.tick();
        session.tick();

        assert_eq!(session.submit_scan("A"), ScanOutcome::Accepted("A".into()));
        assert_eq!(session.count("A"), 1);
        assert_eq!(session.submit_scan("A"), ScanOutcome::Accepted("A".into()));
        assert_eq!(session.count("A"), 2);
        assert_eq!(
            session.submit_scan("A"),
            ScanOutcome::AlreadyFulfilled("A".into())
        );
        assert_eq!(session.count("A"), 2);
        assert_eq!(session.submit_scan("B"), ScanOutcome::Accepted("B".into()));

        let state = session.timer_state();
        assert!(!state.running);
        assert!(state.stop_latched);
        assert_eq!(state.elapsed_seconds, 2);

        let events = session.take_events();
        let summaries = completions(&events);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].elapsed_seconds, 2);
        assert_eq!(summaries[0].fulfilled_ids, vec!["A", "A", "B"]);
        // Three accepted, one rejected.
        assert_eq!(summaries[0].accuracy, 75);
        assert!(summaries[0].perfect_streak);
    }

    #[test]
    fn scan_path_never_exceeds_cap() {
        let mut session = session();
        for _ in 0..10 {
            session.submit_scan("A");
            session.add_one("A");
        }
        assert_eq!(session.count("A"), 2);
        for _ in 0..5 {
            session.remove_one("A");
        }
        assert_eq!(session.count("A"), 0);
    }

    #[test]
    fn completion_fires_once_then_again_after_reopen() {
        let mut session = session();
        session.submit_scan("A");
        session.submit_scan("A");
        session.submit_scan("B");
        assert_eq!(completions(&session.take_events()).len(), 1);

        // Still latched: duplicate scans do not re-fire.
        session.submit_scan("B");
        assert_eq!(completions(&session.take_events()).len(), 0);

        // Removal reopens the episode; re-adding completes it again.
        session.remove_one("B");
        assert!(session.timer_state().running);
        session.submit_scan("B");
        let events = session.take_events();
        assert_eq!(completions(&events).len(), 1);
    }

    #[test]
    fn unknown_code_resets_combo_but_duplicate_does_not() {
        let mut session = session();
        session.submit_scan("A");
        session.submit_scan("A");
        assert_eq!(session.combo_state().streak, 2);

        // Duplicate of a complete item: harmless, streak untouched.
        session.submit_scan("A");
        assert_eq!(session.combo_state().streak, 2);
        assert!(session.perfect_streak());

        // Unknown code: streak resets, perfect streak latches false.
        session.submit_scan("ZZZ");
        assert_eq!(session.combo_state().streak, 0);
        assert!(!session.perfect_streak());
    }

    #[test]
    fn removal_resets_combo() {
        let mut session = session();
        session.submit_scan("A");
        session.submit_scan("B");
        assert_eq!(session.combo_state().streak, 2);
        session.remove_one("A");
        assert_eq!(session.combo_state().streak, 0);
    }

    #[test]
    fn combo_threshold_event_fires_at_multiple() {
        let manifest = Manifest::new(vec![ManifestEntry::new("A", "Widget", 10)]).unwrap();
        let mut config = SessionConfig::default();
        config.combo_threshold = 5;
        let mut session = session_with(manifest, config);
        for _ in 0..5 {
            session.submit_scan("A");
        }
        let thresholds: Vec<_> = session
            .take_events()
            .into_iter()
            .filter(|event| matches!(event, SessionEvent::ComboThreshold { streak: 5 }))
            .collect();
        assert_eq!(thresholds.len(), 1);
    }

    #[test]
    fn edit_commit_is_idempotent() {
        let mut session = session();
        assert!(session.begin_edit("A"));
        assert!(session.commit_edit("A", 2));
        assert_eq!(session.count("A"), 2);

        assert!(session.begin_edit("A"));
        assert!(session.commit_edit("A", 2));
        assert_eq!(session.count("A"), 2);
    }

    #[test]
    fn edit_clamps_to_expected_range() {
        let mut session = session();
        session.begin_edit("A");
        session.commit_edit("A", 99);
        assert_eq!(session.count("A"), 2);

        session.begin_edit("A");
        session.commit_edit("A", -7);
        assert_eq!(session.count("A"), 0);
    }

    #[test]
    fn edit_up_counts_as_single_combined_success() {
        let mut session = session();
        session.begin_edit("A");
        session.commit_edit("A", 2);
        assert_eq!(session.combo_state().streak, 1);
    }

    #[test]
    fn edit_down_reopens_completion_and_resets_combo() {
        let mut session = session();
        session.submit_scan("A");
        session.submit_scan("A");
        session.submit_scan("B");
        session.take_events();

        session.begin_edit("A");
        session.commit_edit("A", 1);
        assert!(session.timer_state().running);
        assert_eq!(session.combo_state().streak, 0);

        session.begin_edit("A");
        session.commit_edit("A", 2);
        let events = session.take_events();
        assert_eq!(completions(&events).len(), 1);
    }

    #[test]
    fn commit_requires_matching_subject() {
        let mut session = session();
        assert!(!session.commit_edit("A", 2));
        assert_eq!(session.count("A"), 0);

        // Switching subjects cancels the first edit outright.
        session.begin_edit("A");
        session.begin_edit("B");
        assert!(!session.commit_edit("A", 2));
        assert_eq!(session.count("A"), 0);
        assert!(session.commit_edit("B", 1));
        assert_eq!(session.count("B"), 1);
    }

    #[test]
    fn cancel_edit_applies_nothing() {
        let mut session = session();
        session.begin_edit("A");
        assert!(session.cancel_edit());
        assert!(!session.cancel_edit());
        assert!(!session.commit_edit("A", 2));
        assert_eq!(session.count("A"), 0);
    }

    #[test]
    fn blank_scan_is_ignored() {
        let mut session = session();
        session.submit_scan("A");
        assert_eq!(session.submit_scan("   "), ScanOutcome::UnknownCode);
        assert_eq!(session.combo_state().streak, 1);
        assert!(session.perfect_streak());
        assert!(
            !session
                .take_events()
                .iter()
                .any(|event| matches!(event, SessionEvent::ScanRejected { .. }))
        );
    }

    #[test]
    fn selection_advances_to_next_incomplete_item() {
        let mut session = session();
        session.submit_scan("A");
        assert_eq!(session.selected_item().map(String::as_str), Some("A"));
        session.submit_scan("A");
        // A is complete; selection moves to B.
        assert_eq!(session.selected_item().map(String::as_str), Some("B"));
        session.submit_scan("B");
        assert_eq!(session.selected_item(), None);
    }

    #[test]
    fn minute_tick_emitted_on_boundary() {
        let mut session = session();
        for _ in 0..60 {
            session.tick();
        }
        let minutes: Vec<_> = session
            .take_events()
            .into_iter()
            .filter(|event| {
                matches!(event, SessionEvent::MinuteTick { elapsed_seconds: 60 })
            })
            .collect();
        assert_eq!(minutes.len(), 1);
    }

    #[test]
    fn clock_is_frozen_while_latched() {
        let mut session = session();
        session.submit_scan("A");
        session.submit_scan("A");
        session.submit_scan("B");
        let stopped_at = session.timer_state().elapsed_seconds;
        session.tick();
        session.tick();
        assert_eq!(session.timer_state().elapsed_seconds, stopped_at);
    }

    #[test]
    fn pause_and_resume_gate_the_clock() {
        let mut session = session();
        session.tick();
        session.pause();
        session.tick();
        session.tick();
        assert_eq!(session.timer_state().elapsed_seconds, 1);
        session.resume();
        session.tick();
        assert_eq!(session.timer_state().elapsed_seconds, 2);
    }

    #[test]
    fn stuck_drag_cleared_by_tick_timeout() {
        let mut config = SessionConfig::default();
        config.drag_timeout = Duration::ZERO;
        let (sink, logger) = MemorySink::shared();
        config.logger = Some(logger);
        let mut session = session_with(manifest(), config);

        assert!(session.begin_drag(Section::ToPack));
        session.tick();
        assert!(!session.layout().drag_state().is_active());
        assert_eq!(
            session.layout().section_in(ZONE_TOP),
            Some(Section::ToPack)
        );
        assert!(
            sink.messages()
                .iter()
                .any(|message| message == "stuck_drag_cleared")
        );
    }

    #[test]
    fn drag_swap_emits_event_and_updates_layout() {
        let mut session = session();
        assert!(session.begin_drag(Section::ToPack));
        session.update_drag(Point::new(100, 500));
        assert!(session.end_drag(Point::new(100, 500)));
        assert_eq!(
            session.layout().section_in(ZONE_BOTTOM_LEFT),
            Some(Section::ToPack)
        );
        assert!(session.take_events().iter().any(|event| matches!(
            event,
            SessionEvent::SectionsSwapped {
                section: Section::ToPack,
                ..
            }
        )));
    }

    #[test]
    fn interacting_section_refuses_drag_via_controller() {
        let mut session = session();
        session.set_section_interacting(Section::Metrics, true);
        assert!(!session.begin_drag(Section::Metrics));
    }

    #[test]
    fn empty_manifest_never_completes() {
        let manifest = Manifest::new(Vec::new()).unwrap();
        let mut session = session_with(manifest, SessionConfig::default());
        session.tick();
        assert!(session.timer_state().running);
        assert!(completions(&session.take_events()).is_empty());
    }

    #[test]
    fn scripted_dispatch_matches_direct_calls() {
        let mut session = session();
        let script = vec![
            InputEvent::Tick,
            InputEvent::ScanSubmitted("a".into()),
            InputEvent::AddOne("A".into()),
            InputEvent::BeginEdit("B".into()),
            InputEvent::CommitEdit("B".into(), 1),
            InputEvent::Tick,
        ];
        for event in script {
            session.apply(event).unwrap();
        }
        assert_eq!(session.count("A"), 2);
        assert_eq!(session.count("B"), 1);
        assert_eq!(completions(&session.take_events()).len(), 1);
        assert_eq!(session.timer_state().elapsed_seconds, 1);
    }

    #[test]
    fn metrics_accumulate_through_operations() {
        let mut config = SessionConfig::default();
        config.enable_metrics();
        let handle = config.metrics_handle().unwrap();
        let mut session = session_with(manifest(), config);

        session.submit_scan("A");
        session.submit_scan("nope");
        session.remove_one("A");
        session.begin_drag(Section::ToPack);
        session.end_drag(Point::new(100, 500));
        session.tick();

        let snapshot = handle.lock().unwrap().snapshot(Duration::from_secs(1));
        assert_eq!(snapshot.scans_accepted, 1);
        assert_eq!(snapshot.scans_rejected, 1);
        assert_eq!(snapshot.units_removed, 1);
        assert_eq!(snapshot.section_swaps, 1);
        assert_eq!(snapshot.ticks, 1);
    }

    #[test]
    fn session_logs_completion_at_info() {
        let (sink, logger) = MemorySink::shared();
        let mut config = SessionConfig::default();
        config.logger = Some(logger);
        let mut session = session_with(manifest(), config);

        session.submit_scan("A");
        session.submit_scan("A");
        session.submit_scan("B");

        let messages = sink.messages();
        assert!(messages.iter().any(|message| message == "session_started"));
        assert!(messages.iter().any(|message| message == "session_complete"));
    }
}
