use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::geometry::{Point, Rect, Size};

use super::drag::DragState;

/// Minimum user-resizable zone width in pixels.
pub const MIN_ZONE_WIDTH: i32 = 300;
/// Minimum zone height when the assigned section is expanded.
pub const MIN_ZONE_HEIGHT: i32 = 250;
/// Minimum zone height when the assigned section is minimized (or the zone
/// is empty).
pub const MIN_ZONE_HEIGHT_MINIMIZED: i32 = 120;

pub const ZONE_TOP: &str = "zone:top";
pub const ZONE_BOTTOM_LEFT: &str = "zone:bottom-left";
pub const ZONE_BOTTOM_RIGHT: &str = "zone:bottom-right";

pub type ZoneId = String;

/// Logical display sections. Stable identities for the whole session; the
/// layout moves them between zones but never creates or destroys them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    ToPack,
    Fulfilled,
    Metrics,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToPack => "to-pack",
            Self::Fulfilled => "fulfilled",
            Self::Metrics => "metrics",
        }
    }
}

/// A positional slot. `rect` carries both the hit-test geometry and the
/// user-adjusted size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub rect: Rect,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Record of one completed two-slot exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRecord {
    pub section: Section,
    pub from_zone: ZoneId,
    pub to_zone: ZoneId,
    /// Section previously occupying the target zone, now moved into
    /// `from_zone`. `None` when the target zone was empty.
    pub displaced: Option<Section>,
}

/// Serializable snapshot of the current layout for the query surface.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView {
    pub zones: Vec<ZoneView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneView {
    pub id: ZoneId,
    pub rect: Rect,
    pub section: Option<Section>,
    pub minimized: bool,
}

/// Assigns sections to zones and owns everything positional: drag-swap,
/// per-zone resize, and the minimized/interacting display flags. Operates
/// entirely on section identifiers and pointer coordinates; tally state
/// never enters here.
#[derive(Debug, Clone)]
pub struct LayoutManager {
    zones: Vec<Zone>,
    assignment: HashMap<ZoneId, Section>,
    viewport: Size,
    minimized: HashSet<Section>,
    interacting: HashSet<Section>,
    drag: DragState,
}

impl LayoutManager {
    /// Empty layout over `zones` in registration order, which is also the
    /// hit-test order.
    pub fn new(zones: Vec<Zone>, viewport: Size) -> Self {
        Self {
            zones,
            assignment: HashMap::new(),
            viewport,
            minimized: HashSet::new(),
            interacting: HashSet::new(),
            drag: DragState::Idle,
        }
    }

    /// Three-zone packing layout: items-to-pack across the top, fulfilled
    /// and metrics side by side below.
    pub fn default_for_viewport(viewport: Size) -> Self {
        let half_h = viewport.height / 2;
        let half_w = viewport.width / 2;
        let zones = vec![
            Zone::new(ZONE_TOP, Rect::new(0, 0, viewport.width, half_h)),
            Zone::new(ZONE_BOTTOM_LEFT, Rect::new(0, half_h, half_w, half_h)),
            Zone::new(
                ZONE_BOTTOM_RIGHT,
                Rect::new(half_w, half_h, viewport.width - half_w, half_h),
            ),
        ];
        let mut layout = Self::new(zones, viewport);
        let placements = [
            (ZONE_TOP, Section::ToPack),
            (ZONE_BOTTOM_LEFT, Section::Fulfilled),
            (ZONE_BOTTOM_RIGHT, Section::Metrics),
        ];
        for (zone, section) in placements {
            layout.assign(zone, section).expect("default zones exist");
        }
        layout
    }

    /// Places `section` in `zone_id`, removing it from any zone it occupied
    /// before so no section ever appears twice.
    pub fn assign(&mut self, zone_id: &str, section: Section) -> Result<()> {
        if !self.zones.iter().any(|zone| zone.id == zone_id) {
            return Err(SessionError::ZoneNotFound(zone_id.to_string()));
        }
        self.assignment.retain(|_, assigned| *assigned != section);
        self.assignment.insert(zone_id.to_string(), section);
        Ok(())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == zone_id)
    }

    pub fn section_in(&self, zone_id: &str) -> Option<Section> {
        self.assignment.get(zone_id).copied()
    }

    pub fn zone_of(&self, section: Section) -> Option<&ZoneId> {
        self.assignment
            .iter()
            .find(|(_, assigned)| **assigned == section)
            .map(|(zone, _)| zone)
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_minimized(&self, section: Section) -> bool {
        self.minimized.contains(&section)
    }

    pub fn set_section_minimized(&mut self, section: Section, minimized: bool) {
        if minimized {
            self.minimized.insert(section);
        } else {
            self.minimized.remove(&section);
        }
    }

    /// Marks a section as hosting an active nested input (e.g. a quantity
    /// field with focus). Drags must never start from within text entry.
    pub fn set_section_interacting(&mut self, section: Section, interacting: bool) {
        if interacting {
            self.interacting.insert(section);
        } else {
            self.interacting.remove(&section);
        }
    }

    pub fn view(&self) -> LayoutView {
        LayoutView {
            zones: self
                .zones
                .iter()
                .map(|zone| {
                    let section = self.section_in(&zone.id);
                    ZoneView {
                        id: zone.id.clone(),
                        rect: zone.rect,
                        section,
                        minimized: section.is_some_and(|s| self.is_minimized(s)),
                    }
                })
                .collect(),
        }
    }

    /// Starts dragging `section`. Refused while another drag is active, when
    /// the section is not currently placed, or when it is in an interacting
    /// sub-state.
    pub fn begin_drag(&mut self, section: Section) -> bool {
        if self.drag.is_active()
            || self.interacting.contains(&section)
            || self.zone_of(section).is_none()
        {
            return false;
        }
        self.drag = DragState::begin(section);
        true
    }

    /// Re-runs hit testing at the current pointer position and records the
    /// candidate target zone, if any.
    pub fn update_drag(&mut self, pointer: Point) -> Option<ZoneId> {
        let dragged = self.drag.section()?;
        let candidate = self.hit_test(pointer, dragged);
        self.drag.set_candidate(candidate.clone());
        candidate
    }

    /// Drops at `pointer`. A valid candidate produces a two-slot exchange;
    /// anywhere else cancels. Drag state is cleared on every path.
    pub fn end_drag(&mut self, pointer: Point) -> Option<SwapRecord> {
        let dragged = self.drag.section();
        let candidate = dragged.and_then(|section| self.hit_test(pointer, section));
        self.drag.clear();

        let (section, target_zone) = (dragged?, candidate?);
        self.swap_into(section, target_zone)
    }

    /// Escape-key path: unconditionally drop any in-flight drag without
    /// touching the assignment.
    pub fn force_clear_drag(&mut self) -> bool {
        self.drag.clear()
    }

    /// Stuck-drag safety net, polled from the session tick. Clears a drag
    /// older than `timeout` as though it ended with no candidate.
    pub fn poll_drag_timeout(&mut self, timeout: Duration) -> bool {
        match self.drag.started() {
            Some(started) if started.elapsed() >= timeout => self.drag.clear(),
            _ => false,
        }
    }

    /// Adjusts one zone's size by a pointer delta, clamped to that zone's
    /// bounds. Never affects the assignment.
    pub fn resize_zone(&mut self, zone_id: &str, dx: i32, dy: i32) -> Result<Size> {
        let min_height = match self.section_in(zone_id) {
            Some(section) if !self.minimized.contains(&section) => MIN_ZONE_HEIGHT,
            _ => MIN_ZONE_HEIGHT_MINIMIZED,
        };
        let max_width = self.viewport.width * 9 / 10;
        let max_height = self.viewport.height * 9 / 10;

        let zone = self
            .zones
            .iter_mut()
            .find(|zone| zone.id == zone_id)
            .ok_or_else(|| SessionError::ZoneNotFound(zone_id.to_string()))?;

        zone.rect.width = zone
            .rect
            .width
            .saturating_add(dx)
            .min(max_width)
            .max(MIN_ZONE_WIDTH);
        zone.rect.height = zone
            .rect
            .height
            .saturating_add(dy)
            .min(max_height)
            .max(min_height);
        Ok(zone.rect.size())
    }

    /// First zone containing the pointer whose assigned section differs from
    /// the dragged one. Empty zones qualify.
    fn hit_test(&self, pointer: Point, dragged: Section) -> Option<ZoneId> {
        self.zones
            .iter()
            .find(|zone| {
                zone.rect.contains(pointer) && self.section_in(&zone.id) != Some(dragged)
            })
            .map(|zone| zone.id.clone())
    }

    /// Two-slot exchange: dragged section into the target zone, the section
    /// previously there (if any) back into the dragged section's zone.
    fn swap_into(&mut self, section: Section, target_zone: ZoneId) -> Option<SwapRecord> {
        let source_zone = self.zone_of(section)?.clone();
        if source_zone == target_zone {
            return None;
        }
        let displaced = self.assignment.remove(&target_zone);
        self.assignment.insert(target_zone.clone(), section);
        match displaced {
            Some(other) => {
                self.assignment.insert(source_zone.clone(), other);
            }
            None => {
                self.assignment.remove(&source_zone);
            }
        }
        Some(SwapRecord {
            section,
            from_zone: source_zone,
            to_zone: target_zone,
            displaced,
        })
    }
}
