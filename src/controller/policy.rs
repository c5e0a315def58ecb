//! What to do with local state when a change notification arrives.

use crate::config::RefreshPolicyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    /// Refetch and replace the in-memory store.
    Refetch,
    /// Keep the in-memory store and remember that the record changed.
    Defer,
}

/// Decides, per notification, whether the controller refetches.
pub trait RefreshPolicy: Send + Sync {
    fn on_remote_change(&self, dirty: bool) -> RefreshDecision;
}

/// Always refetch. Unsaved edits are discarded by whichever write lands last.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriteWins;

impl RefreshPolicy for LastWriteWins {
    fn on_remote_change(&self, _dirty: bool) -> RefreshDecision {
        RefreshDecision::Refetch
    }
}

/// Refetch only when there is nothing unsaved to lose.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepDirtyEdits;

impl RefreshPolicy for KeepDirtyEdits {
    fn on_remote_change(&self, dirty: bool) -> RefreshDecision {
        if dirty {
            RefreshDecision::Defer
        } else {
            RefreshDecision::Refetch
        }
    }
}

pub(crate) fn policy_for(kind: RefreshPolicyKind) -> Box<dyn RefreshPolicy> {
    match kind {
        RefreshPolicyKind::LastWriteWins => Box::new(LastWriteWins),
        RefreshPolicyKind::KeepDirty => Box::new(KeepDirtyEdits),
    }
}
