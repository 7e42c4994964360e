//! Application layer for sandchat.
//!
//! Orchestrates one conversation: round trips to the backend, the
//! progress cycler that accompanies them, chart rendering with failure
//! isolation, and the approve/reject confirmation workflow.

pub mod controller;
pub mod progress;
pub mod render;

pub use controller::ConversationController;
pub use progress::{ProgressCycler, ProgressHandle};
pub use render::ChartRenderer;
