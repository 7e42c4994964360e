//! Conversation transcript view model.
//!
//! The transcript owns every [`ChatTurn`] of a session. Assistant turns are
//! created in a working (placeholder) state while the round trip that
//! produced them is outstanding, then finalized exactly once. All mutation
//! of a working turn goes through the transcript, which refuses to touch a
//! turn that has already settled.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// The chart area of a finalized assistant turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartBlock {
    /// The charting engine produced a drawable artifact.
    Rendered(String),
    /// The charting engine rejected the directive; a short inline note
    /// replaces the chart area while the rest of the turn stays intact.
    Failed(String),
}

/// The payload of a turn, tracking its lifecycle.
///
/// `Working` is the placeholder state of an assistant turn whose round trip
/// has not settled yet; the progress cycler rotates its status text.
/// `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnBody {
    /// Round trip outstanding; `status` is the current progress message.
    Working { status: String },
    /// Settled successfully.
    Ready {
        text: String,
        chart: Option<ChartBlock>,
    },
    /// The round trip failed; `message` is the user-visible explanation.
    Failed { message: String },
}

/// A single entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// The role of the turn's author.
    pub role: MessageRole,
    /// The turn payload and lifecycle state.
    pub body: TurnBody,
    /// Timestamp when the turn was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatTurn {
    /// Creates a finalized user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            body: TurnBody::Ready {
                text: text.into(),
                chart: None,
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Creates an assistant turn in the working (placeholder) state.
    pub fn working(status: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            body: TurnBody::Working {
                status: status.into(),
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Creates a finalized assistant turn, for greetings and notices.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            body: TurnBody::Ready {
                text: text.into(),
                chart: None,
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// The text a renderer should display for this turn right now.
    pub fn display_text(&self) -> &str {
        match &self.body {
            TurnBody::Working { status } => status,
            TurnBody::Ready { text, .. } => text,
            TurnBody::Failed { message } => message,
        }
    }

    /// Whether the turn is still in the working state.
    pub fn is_working(&self) -> bool {
        matches!(self.body, TurnBody::Working { .. })
    }
}

/// The ordered collection of turns for one session.
///
/// Indices returned by the `push_*` methods stay valid until [`clear`]
/// (turns are never removed individually).
///
/// [`clear`]: Transcript::clear
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The turn at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ChatTurn> {
        self.turns.get(index)
    }

    /// Appends a user turn, returning its index.
    pub fn push_user(&mut self, text: impl Into<String>) -> usize {
        self.turns.push(ChatTurn::user(text));
        self.turns.len() - 1
    }

    /// Appends a working assistant turn, returning its index.
    pub fn push_working(&mut self, status: impl Into<String>) -> usize {
        self.turns.push(ChatTurn::working(status));
        self.turns.len() - 1
    }

    /// Appends a finalized assistant turn, returning its index.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> usize {
        self.turns.push(ChatTurn::assistant(text));
        self.turns.len() - 1
    }

    /// Replaces the status text of a working turn.
    ///
    /// Returns false (and leaves the turn untouched) when `index` does not
    /// refer to a turn in the working state. A settled turn can never be
    /// overwritten by a late progress tick.
    pub fn set_working_status(&mut self, index: usize, status: impl Into<String>) -> bool {
        match self.turns.get_mut(index) {
            Some(turn) if turn.is_working() => {
                turn.body = TurnBody::Working {
                    status: status.into(),
                };
                true
            }
            _ => false,
        }
    }

    /// Finalizes a working turn with the decoded reply.
    ///
    /// Returns false when `index` does not refer to a working turn.
    pub fn finalize(
        &mut self,
        index: usize,
        text: impl Into<String>,
        chart: Option<ChartBlock>,
    ) -> bool {
        match self.turns.get_mut(index) {
            Some(turn) if turn.is_working() => {
                turn.body = TurnBody::Ready {
                    text: text.into(),
                    chart,
                };
                true
            }
            _ => false,
        }
    }

    /// Marks a working turn as failed with a user-visible message.
    ///
    /// Returns false when `index` does not refer to a working turn.
    pub fn fail(&mut self, index: usize, message: impl Into<String>) -> bool {
        match self.turns.get_mut(index) {
            Some(turn) if turn.is_working() => {
                turn.body = TurnBody::Failed {
                    message: message.into(),
                };
                true
            }
            _ => false,
        }
    }

    /// Removes every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_display() {
        let mut transcript = Transcript::new();
        let u = transcript.push_user("hello");
        let a = transcript.push_working("Thinking…");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.get(u).unwrap().display_text(), "hello");
        assert_eq!(transcript.get(a).unwrap().display_text(), "Thinking…");
        assert!(transcript.get(a).unwrap().is_working());
    }

    #[test]
    fn test_finalize_transitions_working_turn() {
        let mut transcript = Transcript::new();
        let a = transcript.push_working("…");

        assert!(transcript.finalize(a, "done", None));
        let turn = transcript.get(a).unwrap();
        assert!(!turn.is_working());
        assert_eq!(turn.display_text(), "done");
    }

    #[test]
    fn test_settled_turn_rejects_further_mutation() {
        let mut transcript = Transcript::new();
        let a = transcript.push_working("…");
        assert!(transcript.finalize(a, "done", None));

        // A late progress tick or second settlement must bounce off.
        assert!(!transcript.set_working_status(a, "late tick"));
        assert!(!transcript.finalize(a, "again", None));
        assert!(!transcript.fail(a, "oops"));
        assert_eq!(transcript.get(a).unwrap().display_text(), "done");
    }

    #[test]
    fn test_fail_is_terminal() {
        let mut transcript = Transcript::new();
        let a = transcript.push_working("…");
        assert!(transcript.fail(a, "Error: connection refused"));
        assert!(!transcript.set_working_status(a, "tick"));
        assert_eq!(
            transcript.get(a).unwrap().display_text(),
            "Error: connection refused"
        );
    }

    #[test]
    fn test_set_working_status_out_of_bounds() {
        let mut transcript = Transcript::new();
        assert!(!transcript.set_working_status(3, "tick"));
    }

    #[test]
    fn test_clear_removes_all_turns() {
        let mut transcript = Transcript::new();
        transcript.push_user("a");
        transcript.push_assistant("b");
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_finalize_with_chart_block() {
        let mut transcript = Transcript::new();
        let a = transcript.push_working("…");
        transcript.finalize(a, "Here:", Some(ChartBlock::Failed("bad config".into())));

        match &transcript.get(a).unwrap().body {
            TurnBody::Ready { chart, .. } => {
                assert_eq!(chart, &Some(ChartBlock::Failed("bad config".into())));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
