//! Coarse intent classification and progress tracks.
//!
//! While a request is outstanding the client rotates a cosmetic status
//! message; the track is picked by a plain keyword match over the user's
//! message. This carries no information about actual request progress.

/// Keywords that select the chart track.
const CHART_KEYWORDS: [&str; 8] = [
    "chart",
    "graph",
    "plot",
    "visual",
    "visualize",
    "pie",
    "bar",
    "line",
];

const GENERAL_TRACK: [&str; 4] = [
    "Thinking…",
    "Fetching your sandbox data…",
    "Organizing results…",
    "Finalizing response…",
];

const CHART_TRACK: [&str; 4] = [
    "Fetching the data for your chart…",
    "Preparing labels and values…",
    "Building a chart configuration…",
    "Rendering the chart…",
];

const WRITE_TRACK: [&str; 4] = [
    "Reviewing requested changes…",
    "Preparing update request…",
    "Applying changes…",
    "Finalizing…",
];

/// What kind of work the outstanding request is presumed to be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Anything not matched below.
    General,
    /// The user asked for a chart or visualization.
    Chart,
    /// A confirmed write-type action is being applied. Never produced by
    /// the classifier; the controller selects it for the approval path.
    Write,
}

impl Intent {
    /// Classifies a user message by keyword match, case-insensitively.
    /// Unmatched text defaults to `General`.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        if CHART_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            Self::Chart
        } else {
            Self::General
        }
    }

    /// The rotating status messages for this intent.
    pub fn track(&self) -> &'static [&'static str] {
        match self {
            Self::General => &GENERAL_TRACK,
            Self::Chart => &CHART_TRACK,
            Self::Write => &WRITE_TRACK,
        }
    }
}
