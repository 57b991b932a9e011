//! Playlist controller - the playback state machine
//!
//! Owns the playlist, the selected index, repeat mode and volume, and mediates
//! between the session store and the playback device.
//!
//! ```text
//!            select/next/open/shuffle         device: Playing
//!   Idle ───────────── load + play ───────▶ Loaded ───────────▶ Playing
//!    ▲                                        ▲  ◀── Paused/Stopped ──┘
//!    └──── active track removed ──────────────┘
//! ```
//!
//! Device state is mirrored from notifications only. A `Stopped` notification
//! counts as natural completion when the controller issued the last `play()`
//! and has not since stopped playback itself or seen a device error; only then
//! is the repeat policy applied.

use crate::{
    display::ProgressDisplay,
    error::{PlaybackError, Result},
    events::{DeviceNotification, PlaybackEvent},
    shuffle::shuffle_tracks,
    snapshot::{ControllerState, PlaylistSnapshot},
    tracks::TrackStore,
    volume::Volume,
    PlayerConfig,
};
use cadence_core::{PlaybackDevice, PlaybackState, RepeatMode, SessionStore, Track};

/// Central playlist and playback-state controller
///
/// Single owner of all playlist state. Every method runs to completion
/// without waiting on the device; device results arrive later through
/// [`handle_notification`](Self::handle_notification).
pub struct PlaylistController<D, S> {
    device: D,
    store: S,

    // Playlist
    tracks: TrackStore,
    current: Option<usize>,

    // Mirrored device state
    state: PlaybackState,
    loaded: Option<Track>,
    position_ms: u64,
    duration_ms: u64,

    // Settings
    repeat: RepeatMode,
    volume: Volume,

    // Set when the controller issues play(); cleared by user stop, device error,
    // or when a Stopped notification consumes it
    auto_advance_armed: bool,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<D: PlaybackDevice, S: SessionStore> PlaylistController<D, S> {
    /// Create a controller, restoring the persisted playlist
    ///
    /// Duplicate entries in the persisted list are dropped (first wins).
    /// Initial volume and mute state are pushed to the device.
    pub fn new(mut device: D, store: S, config: &PlayerConfig) -> Self {
        let tracks: TrackStore = store.load().into_iter().collect();
        let mut volume = Volume::new(config.volume);
        volume.set_muted(config.muted);

        device.set_volume(volume.level());
        device.set_muted(volume.is_muted());

        tracing::info!(
            tracks = tracks.len(),
            volume = volume.level(),
            repeat = %config.repeat,
            "Playlist controller ready"
        );

        let mut controller = Self {
            device,
            store,
            tracks,
            current: None,
            state: PlaybackState::Stopped,
            loaded: None,
            position_ms: 0,
            duration_ms: 0,
            repeat: config.repeat,
            volume,
            auto_advance_armed: false,
            pending_events: Vec::new(),
        };
        controller.emit_track_list_changed();
        controller
    }

    // ===== Playlist Commands =====

    /// Add tracks, skipping ones already present, then start playback
    ///
    /// Persists when anything was inserted. If the device is not playing and
    /// at least one path was offered, the first playlist entry starts.
    pub fn open<I>(&mut self, paths: I)
    where
        I: IntoIterator,
        I::Item: Into<Track>,
    {
        let mut offered = 0usize;
        let mut added = 0usize;
        for path in paths {
            offered += 1;
            if self.tracks.add(path.into()) {
                added += 1;
            }
        }

        if offered == 0 {
            return;
        }

        tracing::info!(offered, added, total = self.tracks.len(), "Opened tracks");

        if added > 0 {
            self.emit_track_list_changed();
            self.persist();
        }

        if !self.is_playing() {
            self.start(0);
        }
    }

    /// Remove `track` from the playlist
    ///
    /// Returns whether the track was present.
    pub fn remove_track(&mut self, track: &Track) -> bool {
        match self.tracks.remove(track) {
            Some(index) => {
                self.after_removal(index, track);
                true
            }
            None => {
                tracing::debug!(track = %track, "Remove ignored, track not in playlist");
                false
            }
        }
    }

    /// Remove the track at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Track> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .remove_at(index)
            .ok_or(PlaybackError::InvalidIndex { index, len })?;
        self.after_removal(index, &track);
        Ok(track)
    }

    /// Randomly permute the playlist, persist it, and play from the top
    pub fn shuffle(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        shuffle_tracks(self.tracks.as_mut_slice());
        tracing::debug!(tracks = self.tracks.len(), "Shuffled playlist");

        self.emit_track_list_changed();
        self.persist();
        self.start(0);
    }

    // ===== Playback Commands =====

    /// Pause when playing, otherwise play
    ///
    /// Never changes the selection. When the selected track is not loaded
    /// (e.g. after it was removed mid-playback) it is loaded first, even if
    /// the device has not yet reported that it stopped.
    pub fn play_pause(&mut self) {
        if self.loaded.is_none() {
            match self.current {
                Some(index) => self.start(index),
                None => tracing::debug!("Play ignored, nothing selected"),
            }
        } else if self.state == PlaybackState::Playing {
            self.device.pause();
        } else {
            self.resume();
        }
    }

    /// Stop playback
    ///
    /// Idempotent. A user stop never triggers the repeat policy.
    pub fn stop(&mut self) {
        self.auto_advance_armed = false;
        self.device.stop();
    }

    /// Select and play the track at `index`
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        let len = self.tracks.len();
        if index >= len {
            return Err(PlaybackError::InvalidIndex { index, len });
        }
        self.start(index);
        Ok(())
    }

    /// Play the following track
    ///
    /// No-op at the end of the playlist regardless of repeat mode; wrapping
    /// only happens on natural completion. With nothing selected, starts the
    /// first track.
    pub fn next(&mut self) {
        let len = self.tracks.len();
        match self.current {
            Some(index) if index + 1 < len => self.start(index + 1),
            None if len > 0 => self.start(0),
            _ => tracing::debug!("Next ignored, at end of playlist"),
        }
    }

    /// Play the preceding track; no-op at the start of the playlist
    pub fn previous(&mut self) {
        match self.current {
            Some(index) if index > 0 => self.start(index - 1),
            _ => tracing::debug!("Previous ignored, at start of playlist"),
        }
    }

    /// Seek within the loaded track
    pub fn seek(&mut self, position_ms: u64) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.device.seek(position_ms);
        Ok(())
    }

    // ===== Repeat =====

    /// Cycle Off -> All -> One -> Off, returning the new mode
    pub fn toggle_repeat_mode(&mut self) -> RepeatMode {
        self.set_repeat_mode(self.repeat.next());
        self.repeat
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        if self.repeat == mode {
            return;
        }
        self.repeat = mode;
        tracing::debug!(mode = %mode, "Repeat mode changed");
        self.emit(PlaybackEvent::RepeatModeChanged { mode });
    }

    // ===== Volume =====

    /// Set volume (0-100, clamped)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.device.set_volume(self.volume.level());
        self.emit_volume_changed();
    }

    /// Mute or unmute without touching the stored level
    pub fn set_muted(&mut self, muted: bool) {
        self.volume.set_muted(muted);
        self.device.set_muted(muted);
        self.emit_volume_changed();
    }

    /// Toggle mute state, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.volume.toggle_mute();
        self.device.set_muted(muted);
        self.emit_volume_changed();
        muted
    }

    // ===== Device Notifications =====

    /// Apply a notification relayed from the playback device
    pub fn handle_notification(&mut self, notification: DeviceNotification) {
        match notification {
            DeviceNotification::PositionChanged(position_ms) => {
                self.position_ms = position_ms;
                self.emit(PlaybackEvent::PositionChanged { position_ms });
            }
            DeviceNotification::DurationChanged(duration_ms) => {
                self.duration_ms = duration_ms;
                self.emit(PlaybackEvent::DurationChanged { duration_ms });
            }
            DeviceNotification::StateChanged(state) => self.on_state_changed(state),
            DeviceNotification::Error(message) => {
                tracing::warn!(track = ?self.loaded, error = %message, "Playback device error");
                // Playback halts on this track; the user picks the next one
                self.auto_advance_armed = false;
                self.emit(PlaybackEvent::Error { message });
            }
        }
    }

    /// Poll the device for position/duration and emit a progress update
    ///
    /// Driven by the periodic tick. Emits nothing while no track is loaded or
    /// the duration is still unknown.
    pub fn tick(&mut self) {
        if self.loaded.is_none() {
            return;
        }

        let position_ms = self.device.position();
        let duration_ms = self.device.duration();
        self.position_ms = position_ms;
        self.duration_ms = duration_ms;

        if let Some(progress) = ProgressDisplay::new(position_ms, duration_ms) {
            self.emit(PlaybackEvent::Progress(progress));
        }
    }

    fn on_state_changed(&mut self, state: PlaybackState) {
        if state == self.state {
            return;
        }

        tracing::debug!(from = %self.state, to = %state, "Device state changed");
        self.state = state;
        self.emit(PlaybackEvent::StateChanged { state });

        if state == PlaybackState::Stopped && self.auto_advance_armed && self.loaded.is_some() {
            self.auto_advance_armed = false;
            self.auto_advance();
        }
    }

    /// Apply the repeat policy after the loaded track played to its end
    fn auto_advance(&mut self) {
        match self.repeat {
            RepeatMode::Off => {
                tracing::debug!(index = ?self.current, "Track finished, repeat off");
            }
            RepeatMode::All => {
                let len = self.tracks.len();
                if len == 0 {
                    return;
                }
                let next = self.current.map_or(0, |index| (index + 1) % len);
                tracing::debug!(next, "Track finished, advancing");
                self.start(next);
            }
            RepeatMode::One => {
                tracing::debug!(index = ?self.current, "Track finished, repeating");
                self.resume();
            }
        }
    }

    // ===== State Queries =====

    /// Playlist in order
    pub fn tracks(&self) -> &[Track] {
        self.tracks.all()
    }

    /// Selected index
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|index| self.tracks.get(index))
    }

    /// Device state as last reported
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether a loaded track is playing
    ///
    /// A stale `Playing` mirrored after the loaded track was dropped does not count.
    pub fn is_playing(&self) -> bool {
        self.loaded.is_some() && self.state == PlaybackState::Playing
    }

    /// Controller lifecycle state
    pub fn controller_state(&self) -> ControllerState {
        match (&self.loaded, self.state) {
            (None, _) => ControllerState::Idle,
            (Some(_), PlaybackState::Playing) => ControllerState::Playing,
            (Some(_), _) => ControllerState::Loaded,
        }
    }

    /// Current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// Volume and mute state
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Copy of everything the UI renders
    pub fn snapshot(&self) -> PlaylistSnapshot {
        PlaylistSnapshot {
            tracks: self.tracks.all().to_vec(),
            current_index: self.current,
            state: self.state,
            controller_state: self.controller_state(),
            repeat: self.repeat,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
        }
    }

    /// The wrapped device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The wrapped device, mutably
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // ===== Events =====

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check for undrained events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Select `index`, load it on the device and play
    fn start(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index).cloned() else {
            return;
        };

        tracing::debug!(index, track = %track, "Starting track");
        self.set_current(Some(index));
        self.device.load(&track);
        self.loaded = Some(track);
        self.position_ms = 0;
        self.duration_ms = 0;
        self.resume();
    }

    /// Play the loaded media
    fn resume(&mut self) {
        self.auto_advance_armed = true;
        self.device.play();
    }

    /// Keep the selection on the same logical track after a removal
    fn after_removal(&mut self, removed_index: usize, removed: &Track) {
        tracing::info!(index = removed_index, track = %removed, "Removed track");
        self.emit_track_list_changed();

        if self.loaded.as_ref() == Some(removed) {
            self.auto_advance_armed = false;
            self.device.stop();
            self.loaded = None;
            self.position_ms = 0;
            self.duration_ms = 0;
        }

        match self.current {
            Some(current) if removed_index < current => self.set_current(Some(current - 1)),
            Some(current) if removed_index == current => {
                let len = self.tracks.len();
                let next = if len == 0 {
                    None
                } else {
                    Some(current.min(len - 1))
                };
                self.set_current(next);
            }
            _ => {}
        }

        self.persist();
    }

    fn set_current(&mut self, index: Option<usize>) {
        if self.current != index {
            self.current = index;
            self.emit(PlaybackEvent::CurrentIndexChanged { index });
        }
    }

    /// Write the playlist; failures are reported, never fatal
    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.tracks.all()) {
            tracing::warn!(error = %e, "Failed to save playlist");
            self.emit(PlaybackEvent::Error {
                message: format!("Failed to save playlist: {}", e),
            });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_track_list_changed(&mut self) {
        self.emit(PlaybackEvent::TrackListChanged {
            tracks: self.tracks.all().to_vec(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
            indicator: self.volume.indicator(),
        });
    }
}
