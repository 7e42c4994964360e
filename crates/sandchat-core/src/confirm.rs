//! Confirmation workflow state.
//!
//! The backend gates write-type actions behind a human-in-the-loop
//! approve/reject step. The client never originates this state; it only
//! reflects the `needs_confirm` flag of the most recent response.

use serde::{Deserialize, Serialize};

/// The confirmation gate for the current session.
///
/// At most one confirmation is pending at a time: a newer response
/// supersedes whatever was pending before, since the server is the source
/// of truth and the client is stateless between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "data")]
pub enum ConfirmationState {
    /// No write-type action is awaiting confirmation.
    #[default]
    Idle,
    /// The backend proposed a write-type action and is waiting for the
    /// user to approve or reject it.
    Pending {
        /// Opaque identifier of the pending action, when the backend
        /// provides one.
        action_id: Option<String>,
    },
    /// An approve/reject call is in flight; the action is terminal and
    /// lands on `Idle` whatever its outcome.
    Resolved,
}

impl ConfirmationState {
    /// Whether the approve/reject pair of actions is currently enabled.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Applies the confirmation flag of a response.
    ///
    /// A true flag moves to `Pending` (superseding any prior pending
    /// confirmation); a false or absent flag moves to `Idle`.
    pub fn apply_response_flag(&mut self, needs_confirm: bool, action_id: Option<String>) {
        *self = if needs_confirm {
            Self::Pending { action_id }
        } else {
            Self::Idle
        };
    }

    /// Starts resolving a pending confirmation (the user picked approve
    /// or reject). Returns false, without changing state, when nothing
    /// is pending.
    pub fn begin_resolution(&mut self) -> bool {
        if self.is_pending() {
            *self = Self::Resolved;
            true
        } else {
            false
        }
    }

    /// Lands a resolution (or any forced reset) on `Idle`.
    pub fn settle(&mut self) {
        *self = Self::Idle;
    }
}
