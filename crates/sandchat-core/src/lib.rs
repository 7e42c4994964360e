//! Domain layer for sandchat.
//!
//! This crate contains the pieces of the client that do no I/O: the reply
//! decoder, the chart directive and its normalizer, the transcript view
//! model, the confirmation state machine, intent classification, the wire
//! envelope types, and the ports implemented by the outer crates.
//!
//! # Module Structure
//!
//! - `error`: Shared error type (`SandchatError`)
//! - `transcript`: Conversation view model (`ChatTurn`, `Transcript`)
//! - `confirm`: Human-confirmation state machine (`ConfirmationState`)
//! - `envelope`: Request/response wire types
//! - `reply`: Reply decoding (sentinel-delimited chart extraction)
//! - `chart`: Chart directive and normalization
//! - `intent`: Coarse intent classification and progress tracks
//! - `view`: Ports (`TranscriptView`, `ChartEngine`, `ChatBackend`)

pub mod chart;
pub mod confirm;
pub mod envelope;
pub mod error;
pub mod intent;
pub mod reply;
pub mod transcript;
pub mod view;

// Re-export common error type
pub use error::{Result, SandchatError};
