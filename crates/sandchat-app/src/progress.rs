//! The progress cycler.
//!
//! While a round trip is outstanding, its placeholder turn rotates
//! through a track of status messages. The cycler is purely cosmetic: it
//! measures nothing and must never outlive the request it accompanies.
//! The handle's consuming `stop` cancels the task and joins it, so after
//! `stop` returns no further tick can touch the transcript; the
//! transcript itself additionally refuses status writes to settled turns.

use std::sync::Arc;
use std::time::Duration;

use sandchat_core::intent::Intent;
use sandchat_core::transcript::Transcript;
use sandchat_core::view::TranscriptView;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// How often the status message advances.
pub const TICK_INTERVAL: Duration = Duration::from_millis(900);

/// Spawns progress cyclers.
pub struct ProgressCycler;

/// Control handle for one running cycler.
///
/// Consuming `stop` makes "cancel exactly once per start" structural; the
/// underlying token cancel itself is idempotent.
pub struct ProgressHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ProgressCycler {
    /// Starts cycling the status of the working turn at `index`.
    ///
    /// The first message of the intent's track is written before this
    /// returns (no initial delay); every [`TICK_INTERVAL`] afterwards the
    /// next message is shown, wrapping cyclically until stopped.
    pub async fn start(
        transcript: Arc<RwLock<Transcript>>,
        view: Arc<dyn TranscriptView>,
        index: usize,
        intent: Intent,
    ) -> ProgressHandle {
        let track = intent.track();
        write_status(&transcript, &view, index, track[0]).await;

        let token = CancellationToken::new();
        let child = token.clone();
        let task = tokio::spawn(async move {
            let mut position = 0usize;
            let mut ticker = interval(TICK_INTERVAL);
            // The immediate first tick; its message is already on screen.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        position = (position + 1) % track.len();
                        if !write_status(&transcript, &view, index, track[position]).await {
                            // The turn settled under us; nothing left to rotate.
                            break;
                        }
                    }
                }
            }
        });

        ProgressHandle { token, task }
    }
}

impl ProgressHandle {
    /// Cancels the cycler and waits for it to finish.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

/// Writes one status message, notifying the view. Returns false when the
/// turn is no longer in the working state.
async fn write_status(
    transcript: &Arc<RwLock<Transcript>>,
    view: &Arc<dyn TranscriptView>,
    index: usize,
    status: &str,
) -> bool {
    let turn = {
        let mut transcript = transcript.write().await;
        if !transcript.set_working_status(index, status) {
            return false;
        }
        transcript.get(index).cloned()
    };
    if let Some(turn) = turn {
        view.turn_updated(index, &turn);
    }
    true
}
