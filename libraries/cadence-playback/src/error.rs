//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index outside the playlist
    #[error("Index out of bounds: {index} (playlist has {len} tracks)")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Playlist length at the time of the request
        len: usize,
    },

    /// No track is currently loaded on the device
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The player service has shut down
    #[error("Player service is not running")]
    ServiceClosed,

    /// Error from core (storage, configuration, device)
    #[error(transparent)]
    Core(#[from] cadence_core::CadenceError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
