use crate::manifest::ItemId;

/// Exclusive edit-mode tracker: at most one item is ever "being edited".
///
/// Switching to a different item cancels the in-flight edit without applying
/// it (escape semantics), as a single rule rather than a per-call-site
/// decision. The value transaction itself lives in the controller, which
/// owns the ledger.
#[derive(Debug, Clone, Default)]
pub struct QuantityEditor {
    subject: Option<ItemId>,
}

impl QuantityEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters edit mode for `id`. Returns the subject that was implicitly
    /// cancelled, if a different item was mid-edit.
    pub fn begin(&mut self, id: ItemId) -> Option<ItemId> {
        if self.subject.as_deref() == Some(id.as_str()) {
            return None;
        }
        self.subject.replace(id)
    }

    pub fn subject(&self) -> Option<&ItemId> {
        self.subject.as_ref()
    }

    /// Leaves edit mode without applying anything.
    pub fn cancel(&mut self) -> Option<ItemId> {
        self.subject.take()
    }

    /// Consumes the subject if it matches `id`; a commit is only valid for
    /// the item actually in edit mode.
    pub fn take_if(&mut self, id: &str) -> bool {
        if self.subject.as_deref() == Some(id) {
            self.subject = None;
            true
        } else {
            false
        }
    }
}
