use std::time::Instant;

use super::core::{Section, ZoneId};

/// Drag-and-drop modeled as an explicit two-state machine so the
/// timeout/escape/no-candidate recovery paths stay exhaustively checkable.
/// Exactly one section can be dragging at a time; the candidate is the zone
/// the pointer is currently over, when that zone would accept a drop.
#[derive(Debug, Clone)]
pub enum DragState {
    Idle,
    Dragging {
        section: Section,
        started: Instant,
        candidate: Option<ZoneId>,
    },
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

impl DragState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Dragging { section, .. } => Some(*section),
            Self::Idle => None,
        }
    }

    pub fn candidate(&self) -> Option<&ZoneId> {
        match self {
            Self::Dragging { candidate, .. } => candidate.as_ref(),
            Self::Idle => None,
        }
    }

    pub(super) fn begin(section: Section) -> Self {
        Self::Dragging {
            section,
            started: Instant::now(),
            candidate: None,
        }
    }

    pub(super) fn set_candidate(&mut self, zone: Option<ZoneId>) {
        if let Self::Dragging { candidate, .. } = self {
            *candidate = zone;
        }
    }

    pub(super) fn started(&self) -> Option<Instant> {
        match self {
            Self::Dragging { started, .. } => Some(*started),
            Self::Idle => None,
        }
    }

    /// Unconditional return to `Idle`, the single recovery primitive behind
    /// drop, cancel, escape, and the stuck-drag timeout.
    pub(super) fn clear(&mut self) -> bool {
        let was_active = self.is_active();
        *self = Self::Idle;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_clear_round_trip() {
        let mut state = DragState::begin(Section::ToPack);
        assert!(state.is_active());
        assert_eq!(state.section(), Some(Section::ToPack));
        assert_eq!(state.candidate(), None);
        assert!(state.clear());
        assert!(!state.is_active());
        assert!(!state.clear());
    }

    #[test]
    fn candidate_only_sticks_while_dragging() {
        let mut state = DragState::Idle;
        state.set_candidate(Some("zone:top".to_string()));
        assert_eq!(state.candidate(), None);

        let mut state = DragState::begin(Section::Metrics);
        state.set_candidate(Some("zone:top".to_string()));
        assert_eq!(state.candidate().map(String::as_str), Some("zone:top"));
        state.set_candidate(None);
        assert_eq!(state.candidate(), None);
    }
}
