/// Core traits for Cadence
use crate::error::Result;
use crate::types::{PlaybackState, Track};

/// External audio engine
///
/// Implementers wrap a platform audio engine. Every command is
/// fire-and-forget: results are observed later through the notifications the
/// engine relays back (position, duration, state, error). The device performs
/// no playlist policy.
///
/// Notification contract:
/// - A state notification is sent only on an actual state change.
/// - `load` replaces the current media without reporting `Stopped` by itself.
/// - `Stopped` is reported after `stop()` and when the loaded media plays to its end.
/// - `play()` after the media ended restarts it from the beginning.
pub trait PlaybackDevice: Send {
    /// Replace the current media with `track`
    fn load(&mut self, track: &Track);

    /// Start or resume playback of the loaded media
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Stop playback and rewind
    fn stop(&mut self);

    /// Seek to a position in milliseconds
    fn seek(&mut self, position_ms: u64);

    /// Set output volume (0-100)
    fn set_volume(&mut self, volume: u8);

    /// Silence output without touching the stored volume
    fn set_muted(&mut self, muted: bool);

    /// Current position in milliseconds
    fn position(&self) -> u64;

    /// Duration of the loaded media in milliseconds (0 when unknown)
    fn duration(&self) -> u64;

    /// State as the engine currently sees it
    ///
    /// Only for diagnostics. Controllers mirror state from notifications
    /// rather than reading it here, since a pending notification may be in flight.
    fn state(&self) -> PlaybackState;
}

/// Durable storage for the session playlist
pub trait SessionStore: Send {
    /// Read the persisted playlist
    ///
    /// Never fails: a missing or malformed store yields an empty playlist.
    fn load(&self) -> Vec<Track>;

    /// Replace the persisted playlist with `tracks`, preserving order
    ///
    /// # Errors
    /// Returns an error if the store cannot be written
    fn save(&self, tracks: &[Track]) -> Result<()>;
}
