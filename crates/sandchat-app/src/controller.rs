//! Conversation orchestration.
//!
//! One controller drives one session: it owns the transcript, issues the
//! round trips, runs the progress cycler alongside each of them, and
//! mirrors the backend's confirmation gate. At most one round trip is
//! outstanding at a time; while one is in flight, further submissions
//! bounce with [`SandchatError::Busy`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sandchat_core::confirm::ConfirmationState;
use sandchat_core::envelope::{CLEAR_COMMAND, SummaryReport};
use sandchat_core::intent::Intent;
use sandchat_core::reply;
use sandchat_core::transcript::Transcript;
use sandchat_core::view::{ChatBackend, ChartEngine, TranscriptView};
use sandchat_core::{Result, SandchatError};
use tokio::sync::RwLock;

use crate::progress::ProgressCycler;
use crate::render::ChartRenderer;

const GREETING: &str = "Hi! Ask me:\n\
    - Show a chart of catalog prices\n\
    - Visualize team wages\n\
    - Plot orders by day (if you have orders)\n\
    - Remove an item (Approve/Reject)";

const CLEARED_NOTICE: &str = "Chat cleared. Ask me something about your sandbox data.";

/// The two terminal choices for a pending confirmation.
#[derive(Debug, Clone, Copy)]
enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    fn acknowledgment(self) -> &'static str {
        match self {
            Self::Approve => "✅ Approved",
            Self::Reject => "❌ Rejected",
        }
    }

    fn initial_status(self) -> &'static str {
        match self {
            Self::Approve => "Working…",
            Self::Reject => "Cancelling…",
        }
    }

    fn intent(self) -> Intent {
        match self {
            Self::Approve => Intent::Write,
            Self::Reject => Intent::General,
        }
    }
}

/// Drives the conversation for one session.
///
/// All collaborators arrive as ports: the backend, the render sink, and
/// the charting engine. No ambient globals; everything the controller
/// touches is owned here or injected.
pub struct ConversationController {
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn TranscriptView>,
    renderer: ChartRenderer,
    transcript: Arc<RwLock<Transcript>>,
    confirmation: RwLock<ConfirmationState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the round trip it guards settles, on
/// every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl ConversationController {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        view: Arc<dyn TranscriptView>,
        engine: Arc<dyn ChartEngine>,
    ) -> Self {
        Self {
            backend,
            view,
            renderer: ChartRenderer::new(engine),
            transcript: Arc::new(RwLock::new(Transcript::new())),
            confirmation: RwLock::new(ConfirmationState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Shared handle to the transcript, for frontends that want to read
    /// it outside of view callbacks.
    pub fn transcript(&self) -> Arc<RwLock<Transcript>> {
        Arc::clone(&self.transcript)
    }

    /// The current confirmation state.
    pub async fn confirmation(&self) -> ConfirmationState {
        self.confirmation.read().await.clone()
    }

    /// Posts the opening greeting turn.
    pub async fn greet(&self) {
        self.push_assistant(GREETING).await;
    }

    /// Sends one user message and settles its reply into the transcript.
    ///
    /// Blank input (after trimming) is a no-op. The reserved `/clear`
    /// command routes to [`clear`]. Returns [`SandchatError::Busy`] while
    /// another round trip is outstanding.
    ///
    /// [`clear`]: ConversationController::clear
    pub async fn submit(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        if text == CLEAR_COMMAND {
            return self.clear().await;
        }

        let _guard = self.acquire()?;
        let intent = Intent::classify(text);
        self.push_user(text).await;
        let index = self.push_working("…").await;

        let cycler = ProgressCycler::start(
            Arc::clone(&self.transcript),
            Arc::clone(&self.view),
            index,
            intent,
        )
        .await;
        let result = self.backend.chat(text).await;
        cycler.stop().await;

        match result {
            Ok(response) => {
                self.settle_reply(index, &response.reply).await;
                self.apply_confirmation_flag(response.needs_confirm, response.pending_action_id)
                    .await;
            }
            Err(err) => {
                tracing::warn!(target: "controller", "chat round trip failed: {}", err);
                self.fail_turn(index, &err).await;
                // No information obtained; drop any stale confirmation.
                self.force_confirmation_idle().await;
            }
        }
        Ok(())
    }

    /// Approves the pending write-type action.
    ///
    /// A no-op unless the confirmation gate is `Pending`. The action is
    /// terminal: whatever the backend answers, the gate lands on `Idle`.
    pub async fn approve(&self) -> Result<()> {
        self.resolve(Resolution::Approve).await
    }

    /// Rejects the pending write-type action. Terminal, like `approve`.
    pub async fn reject(&self) -> Result<()> {
        self.resolve(Resolution::Reject).await
    }

    async fn resolve(&self, resolution: Resolution) -> Result<()> {
        let _guard = self.acquire()?;
        {
            let mut confirmation = self.confirmation.write().await;
            if !confirmation.begin_resolution() {
                return Ok(());
            }
        }
        self.view.confirmation_changed(&ConfirmationState::Resolved);

        self.push_user(resolution.acknowledgment()).await;
        let index = self.push_working(resolution.initial_status()).await;

        let cycler = ProgressCycler::start(
            Arc::clone(&self.transcript),
            Arc::clone(&self.view),
            index,
            resolution.intent(),
        )
        .await;
        let result = match resolution {
            Resolution::Approve => self.backend.approve().await,
            Resolution::Reject => self.backend.reject().await,
        };
        cycler.stop().await;

        match result {
            Ok(response) => self.settle_reply(index, &response.reply).await,
            Err(err) => {
                tracing::warn!(target: "controller", "confirmation round trip failed: {}", err);
                self.fail_turn(index, &err).await;
            }
        }

        // Terminal either way; a stale confirmation is never retried.
        self.force_confirmation_idle().await;
        Ok(())
    }

    /// Resets the conversation.
    ///
    /// Signals the backend with the reserved control message, then wipes
    /// the local transcript and the confirmation gate. The local effects
    /// do not depend on the signal getting through.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.acquire()?;
        if let Err(err) = self.backend.chat(CLEAR_COMMAND).await {
            tracing::warn!(target: "controller", "clear signal failed: {}", err);
        }

        self.transcript.write().await.clear();
        self.view.transcript_cleared();
        self.force_confirmation_idle().await;
        self.push_assistant(CLEARED_NOTICE).await;
        Ok(())
    }

    /// Fetches the dashboard summary.
    pub async fn summary(&self) -> Result<SummaryReport> {
        self.backend.summary().await
    }

    fn acquire(&self) -> Result<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SandchatError::Busy)?;
        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }

    async fn push_user(&self, text: &str) {
        let (index, turn) = {
            let mut transcript = self.transcript.write().await;
            let index = transcript.push_user(text);
            (index, transcript.get(index).cloned())
        };
        if let Some(turn) = turn {
            self.view.turn_added(index, &turn);
        }
    }

    async fn push_assistant(&self, text: &str) {
        let (index, turn) = {
            let mut transcript = self.transcript.write().await;
            let index = transcript.push_assistant(text);
            (index, transcript.get(index).cloned())
        };
        if let Some(turn) = turn {
            self.view.turn_added(index, &turn);
        }
    }

    async fn push_working(&self, status: &str) -> usize {
        let (index, turn) = {
            let mut transcript = self.transcript.write().await;
            let index = transcript.push_working(status);
            (index, transcript.get(index).cloned())
        };
        if let Some(turn) = turn {
            self.view.turn_added(index, &turn);
        }
        index
    }

    /// Decodes a settled reply into the working turn: prose always,
    /// chart when a directive was embedded and parseable.
    async fn settle_reply(&self, index: usize, raw_reply: &str) {
        let decoded = reply::decode(raw_reply);
        let chart = decoded.directive.map(|d| self.renderer.render(d));

        let turn = {
            let mut transcript = self.transcript.write().await;
            if !transcript.finalize(index, decoded.display_text, chart) {
                return;
            }
            transcript.get(index).cloned()
        };
        if let Some(turn) = turn {
            self.view.turn_updated(index, &turn);
        }
    }

    async fn fail_turn(&self, index: usize, err: &SandchatError) {
        let turn = {
            let mut transcript = self.transcript.write().await;
            if !transcript.fail(index, format!("Error: {err}")) {
                return;
            }
            transcript.get(index).cloned()
        };
        if let Some(turn) = turn {
            self.view.turn_updated(index, &turn);
        }
    }

    /// Mirrors the confirmation flag of a settled response.
    async fn apply_confirmation_flag(&self, needs_confirm: bool, action_id: Option<String>) {
        let changed = {
            let mut confirmation = self.confirmation.write().await;
            let before = confirmation.clone();
            confirmation.apply_response_flag(needs_confirm, action_id);
            (*confirmation != before).then(|| confirmation.clone())
        };
        if let Some(state) = changed {
            self.view.confirmation_changed(&state);
        }
    }

    /// Lands the confirmation gate on `Idle`, whatever it held.
    async fn force_confirmation_idle(&self) {
        let changed = {
            let mut confirmation = self.confirmation.write().await;
            if *confirmation == ConfirmationState::Idle {
                false
            } else {
                confirmation.settle();
                true
            }
        };
        if changed {
            self.view.confirmation_changed(&ConfirmationState::Idle);
        }
    }
}
