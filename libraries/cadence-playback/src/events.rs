//! Playback Events
//!
//! Two directions of asynchronous communication:
//! - [`DeviceNotification`]: relayed from the playback device into the controller
//! - [`PlaybackEvent`]: emitted by the controller for UI synchronization
//!
//! Controller events are emitted at key points:
//! - Structural playlist changes (open/remove/shuffle)
//! - Selection changes
//! - State changes mirrored from the device
//! - Position/duration updates and the periodic progress tick

use crate::display::ProgressDisplay;
use crate::volume::VolumeLevel;
use cadence_core::{PlaybackState, RepeatMode, Track};
use serde::{Deserialize, Serialize};

/// Notifications relayed by the playback device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceNotification {
    /// Playback position moved (milliseconds)
    PositionChanged(u64),

    /// Duration of the loaded media became known or changed (milliseconds)
    DurationChanged(u64),

    /// Device state changed
    StateChanged(PlaybackState),

    /// Decode or I/O failure for the loaded media
    Error(String),
}

/// Events emitted by the playlist controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playlist contents or order changed
    TrackListChanged {
        /// Full playlist in order
        tracks: Vec<Track>,
    },

    /// Selected track changed
    CurrentIndexChanged {
        /// New index, `None` when nothing is selected
        index: Option<usize>,
    },

    /// Mirrored device state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Position update from the device
    PositionChanged {
        /// Current playback position
        position_ms: u64,
    },

    /// Duration update from the device
    DurationChanged {
        /// Total track duration
        duration_ms: u64,
    },

    /// Periodic progress tick (typically every second)
    Progress(ProgressDisplay),

    /// Repeat mode changed
    RepeatModeChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
        /// Icon category for the new volume
        indicator: VolumeLevel,
    },

    /// Non-fatal error (device failure or playlist write failure)
    Error {
        /// Error message
        message: String,
    },
}
