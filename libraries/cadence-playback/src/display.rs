//! Display helpers for the UI projection

use serde::{Deserialize, Serialize};

/// Format milliseconds as `HH:MM:SS`
///
/// Hours are not wrapped, so very long media renders as e.g. `123:04:05`.
pub fn format_time(ms: u64) -> String {
    let total_secs = ms / 1000;
    let (h, rest) = (total_secs / 3600, total_secs % 3600);
    let (m, s) = (rest / 60, rest % 60);
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Progress snapshot for the elapsed/total label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDisplay {
    /// Current position
    pub position_ms: u64,
    /// Total duration
    pub duration_ms: u64,
    /// `elapsed/total`, e.g. `00:01:05/00:03:20`
    pub text: String,
}

impl ProgressDisplay {
    /// Build a progress display, or `None` while the duration is unknown
    pub fn new(position_ms: u64, duration_ms: u64) -> Option<Self> {
        if duration_ms == 0 {
            return None;
        }
        Some(Self {
            position_ms,
            duration_ms,
            text: format!("{}/{}", format_time(position_ms), format_time(duration_ms)),
        })
    }
}
