#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a [`Context`](crate::Context).
///
/// Transitions only move forward:
///
/// ```text
/// Fresh --called--> Running --fail--> Failed --rollback--> RolledBack { failed: true }
/// ```
///
/// `fail` is accepted from `Fresh` as well, and `rollback` from any state that
/// is not already rolled back (a successful context ends up in
/// `RolledBack { failed: false }`).
///
/// A failure is never forgotten: failing a rolled back context sets
/// `failed` inside [`ContextState::RolledBack`] instead of leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContextState {
    /// Nothing has happened yet.
    #[default]
    Fresh,
    /// At least one interactor has been recorded as called.
    Running,
    /// `fail` has been invoked; rollback is pending.
    Failed,
    /// Compensation has started. Terminal.
    RolledBack { failed: bool },
}

impl ContextState {
    /// Returns true once the context has failed, including after rollback.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::RolledBack { failed: true })
    }

    #[inline]
    pub fn is_rolled_back(self) -> bool {
        matches!(self, Self::RolledBack { .. })
    }

    /// State after an interactor was recorded as called.
    #[inline]
    #[must_use]
    pub fn called(self) -> Self {
        match self {
            Self::Fresh => Self::Running,
            other => other,
        }
    }

    /// State after `fail`.
    #[inline]
    #[must_use]
    pub fn failed(self) -> Self {
        match self {
            Self::RolledBack { .. } => Self::RolledBack { failed: true },
            _ => Self::Failed,
        }
    }

    /// State once rollback begins, or `None` if it already began.
    #[inline]
    pub fn rolled_back(self) -> Option<Self> {
        match self {
            Self::RolledBack { .. } => None,
            other => Some(Self::RolledBack {
                failed: other.is_failure(),
            }),
        }
    }
}
