//! Read-only projection of controller state for the UI

use cadence_core::{PlaybackState, RepeatMode, Track};
use serde::{Deserialize, Serialize};

/// Controller lifecycle derived from the loaded track and mirrored device state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// No track loaded on the device
    Idle,
    /// Track loaded, device stopped or paused
    Loaded,
    /// Device playing
    Playing,
}

/// Point-in-time copy of everything the UI renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    /// Playlist in order
    pub tracks: Vec<Track>,
    /// Selected track
    pub current_index: Option<usize>,
    /// Mirrored device state
    pub state: PlaybackState,
    /// Controller lifecycle state
    pub controller_state: ControllerState,
    /// Repeat mode
    pub repeat: RepeatMode,
    /// Volume level (0-100)
    pub volume: u8,
    /// Mute flag
    pub muted: bool,
    /// Last reported position
    pub position_ms: u64,
    /// Last reported duration
    pub duration_ms: u64,
}

impl PlaylistSnapshot {
    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    /// Tracks whose file name contains `query`, ignoring case
    ///
    /// Returns playlist indices alongside the tracks so a selection in the
    /// filtered view maps back to the full playlist. An empty query matches
    /// everything.
    pub fn filter(&self, query: &str) -> Vec<(usize, &Track)> {
        let needle = query.to_lowercase();
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| track.file_name().to_lowercase().contains(&needle))
            .collect()
    }
}
