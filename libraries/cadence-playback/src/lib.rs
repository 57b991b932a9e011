//! Cadence - Playlist & Playback Control
//!
//! Platform-agnostic playlist controller for Cadence.
//!
//! This crate provides:
//! - Ordered, duplicate-free track store
//! - Playlist controller state machine (select/next/previous/shuffle/remove)
//! - Repeat modes (Off, All, One) applied on natural track completion
//! - Volume control (0-100%, mute/unmute)
//! - Event queue for UI synchronization
//! - A serialized player service driven by commands, device notifications and a progress tick
//!
//! # Architecture
//!
//! `cadence-playback` does not decode or output audio and does not know where
//! the playlist is stored. Both are provided via traits from `cadence-core`:
//! - [`PlaybackDevice`](cadence_core::PlaybackDevice): the external audio engine
//! - [`SessionStore`](cadence_core::SessionStore): durable playlist storage
//!
//! # Example: Controller
//!
//! ```rust
//! use cadence_core::{PlaybackDevice, PlaybackState, Track};
//! use cadence_playback::{DeviceNotification, PlayerConfig, PlaylistController};
//! use cadence_storage::MemorySessionStore;
//!
//! #[derive(Default)]
//! struct SilentDevice;
//!
//! impl PlaybackDevice for SilentDevice {
//!     fn load(&mut self, _track: &Track) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, _position_ms: u64) {}
//!     fn set_volume(&mut self, _volume: u8) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//!     fn position(&self) -> u64 { 0 }
//!     fn duration(&self) -> u64 { 0 }
//!     fn state(&self) -> PlaybackState { PlaybackState::Stopped }
//! }
//!
//! let mut controller =
//!     PlaylistController::new(SilentDevice, MemorySessionStore::new(), &PlayerConfig::default());
//!
//! controller.open(["/music/a.mp3", "/music/b.mp3"]);
//! assert_eq!(controller.current_index(), Some(0));
//!
//! // The device reports that playback started
//! controller.handle_notification(DeviceNotification::StateChanged(PlaybackState::Playing));
//! controller.next();
//! assert_eq!(controller.current_index(), Some(1));
//!
//! for event in controller.drain_events() {
//!     // forward to the UI
//!     let _ = event;
//! }
//! ```
//!
//! # Example: Service
//!
//! ```rust,no_run
//! use cadence_playback::{notification_channel, PlayerConfig, PlayerService, PlaylistController};
//! use cadence_storage::PlaylistFile;
//! # use cadence_core::{PlaybackDevice, PlaybackState, Track};
//! # struct Engine { notifier: cadence_playback::DeviceNotifier }
//! # impl PlaybackDevice for Engine {
//! #     fn load(&mut self, _: &Track) {} fn play(&mut self) {} fn pause(&mut self) {}
//! #     fn stop(&mut self) {} fn seek(&mut self, _: u64) {} fn set_volume(&mut self, _: u8) {}
//! #     fn set_muted(&mut self, _: bool) {} fn position(&self) -> u64 { 0 }
//! #     fn duration(&self) -> u64 { 0 } fn state(&self) -> PlaybackState { PlaybackState::Stopped }
//! # }
//!
//! # async fn run() -> cadence_playback::Result<()> {
//! let config = PlayerConfig::load()?;
//! let (notifier, notifications) = notification_channel();
//! let engine = Engine { notifier };
//!
//! let controller =
//!     PlaylistController::new(engine, PlaylistFile::new(&config.playlist_path), &config);
//! let (player, _task) = PlayerService::spawn(controller, notifications, config.tick_interval());
//!
//! let mut events = player.subscribe();
//! player.open(["/music/a.mp3"])?;
//! while let Ok(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;
mod display;
mod error;
mod events;
mod service;
mod shuffle;
mod snapshot;
mod tracks;
mod volume;

// Public exports
pub use config::{PlayerConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use controller::PlaylistController;
pub use display::{format_time, ProgressDisplay};
pub use error::{PlaybackError, Result};
pub use events::{DeviceNotification, PlaybackEvent};
pub use service::{
    notification_channel, DeviceNotifier, NotificationReceiver, PlayerCommand, PlayerHandle,
    PlayerService,
};
pub use shuffle::{shuffle_tracks, shuffle_tracks_with};
pub use snapshot::{ControllerState, PlaylistSnapshot};
pub use tracks::TrackStore;
pub use volume::{Volume, VolumeLevel};
