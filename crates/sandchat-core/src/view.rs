//! Ports implemented by the outer crates.
//!
//! The controller talks to the world through these traits: a render sink
//! for transcript changes (a DOM, a terminal, a test recorder), a charting
//! engine for normalized directives, and the conversational backend
//! itself.

use async_trait::async_trait;

use crate::chart::ChartDirective;
use crate::confirm::ConfirmationState;
use crate::envelope::{ChatResponse, SummaryReport};
use crate::error::Result;
use crate::transcript::ChatTurn;

/// Render sink for transcript changes.
///
/// Implementations own the host surface. Callbacks arrive after the
/// transcript has already been mutated; `index` is the turn's position in
/// the transcript at that moment.
pub trait TranscriptView: Send + Sync {
    /// A new turn was appended.
    fn turn_added(&self, index: usize, turn: &ChatTurn);

    /// An existing turn changed (progress tick, finalization, failure).
    fn turn_updated(&self, index: usize, turn: &ChatTurn);

    /// The transcript was wiped.
    fn transcript_cleared(&self);

    /// The confirmation gate changed; `Pending` enables exactly the
    /// approve/reject pair of actions.
    fn confirmation_changed(&self, state: &ConfirmationState);
}

/// External charting engine seam.
///
/// Receives an already-normalized directive and produces a drawable
/// artifact for the host surface. Engines are expected to reject
/// impossible configurations via `Err`; the renderer isolates that
/// failure from the rest of the turn.
pub trait ChartEngine: Send + Sync {
    fn draw(&self, directive: &ChartDirective) -> Result<String>;
}

/// The conversational backend.
///
/// One implementation speaks HTTP to the real assistant; tests substitute
/// an in-memory fake. The session identity travels inside the
/// implementation, not through this interface.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends a free-text message (including the reserved `/clear`
    /// control command) and returns the reply envelope.
    async fn chat(&self, message: &str) -> Result<ChatResponse>;

    /// Approves the pending write-type action.
    async fn approve(&self) -> Result<ChatResponse>;

    /// Rejects the pending write-type action.
    async fn reject(&self) -> Result<ChatResponse>;

    /// Fetches the dashboard summary.
    async fn summary(&self) -> Result<SummaryReport>;
}
