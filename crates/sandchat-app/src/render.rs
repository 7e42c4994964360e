//! Chart rendering with failure isolation.

use std::sync::Arc;

use sandchat_core::chart::ChartDirective;
use sandchat_core::transcript::ChartBlock;
use sandchat_core::view::ChartEngine;

/// The inline note shown in place of a chart the engine rejected.
pub const RENDER_FAILURE_NOTE: &str = "Failed to render chart (invalid chart configuration).";

/// Completes a directive and hands it to the charting engine.
///
/// A rendering failure is a property of one chart, not of the turn it
/// belongs to: the engine's error is swallowed here and replaced with a
/// short user-visible note, so it can never break the surrounding
/// transcript.
pub struct ChartRenderer {
    engine: Arc<dyn ChartEngine>,
}

impl ChartRenderer {
    pub fn new(engine: Arc<dyn ChartEngine>) -> Self {
        Self { engine }
    }

    /// Normalizes the directive and draws it, isolating engine failures.
    pub fn render(&self, mut directive: ChartDirective) -> ChartBlock {
        directive.normalize();
        match self.engine.draw(&directive) {
            Ok(artifact) => ChartBlock::Rendered(artifact),
            Err(err) => {
                tracing::warn!(target: "render", "charting engine rejected directive: {}", err);
                ChartBlock::Failed(RENDER_FAILURE_NOTE.to_string())
            }
        }
    }
}
