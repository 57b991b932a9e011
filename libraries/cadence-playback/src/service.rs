//! Player service
//!
//! Runs a [`PlaylistController`] inside one tokio task so that user commands,
//! device notifications and the progress tick are applied strictly one at a
//! time. Components that issue commands receive a [`PlayerHandle`]; the device
//! adapter receives a [`DeviceNotifier`].
//!
//! ```text
//!   PlayerHandle ──commands──▶ ┌──────────────────────┐ ──events──▶ subscribers
//!   DeviceNotifier ─notify───▶ │ PlayerService (task) │
//!   interval ─────tick───────▶ └──────────────────────┘
//! ```

use crate::{
    controller::PlaylistController,
    error::{PlaybackError, Result},
    events::{DeviceNotification, PlaybackEvent},
    snapshot::PlaylistSnapshot,
};
use cadence_core::{PlaybackDevice, PlaybackState, RepeatMode, SessionStore, Track};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Events buffered per subscriber before the slowest one starts lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Commands accepted by the player service
#[derive(Debug)]
pub enum PlayerCommand {
    /// Add tracks and start playback if idle
    Open(Vec<Track>),

    /// Toggle between playing and paused
    PlayPause,

    /// Stop playback
    Stop,

    /// Select and play a track by index
    SelectIndex(usize),

    /// Play the following track
    Next,

    /// Play the preceding track
    Previous,

    /// Shuffle the playlist and play from the top
    Shuffle,

    /// Cycle repeat mode
    ToggleRepeatMode,

    /// Set repeat mode
    SetRepeatMode(RepeatMode),

    /// Remove a track by path
    RemoveTrack(Track),

    /// Remove a track by index
    RemoveAt(usize),

    /// Seek within the loaded track (milliseconds)
    Seek(u64),

    /// Set volume (0-100)
    SetVolume(u8),

    /// Mute or unmute
    SetMuted(bool),

    /// Toggle mute
    ToggleMute,

    /// Reply with a copy of the controller state
    Snapshot(oneshot::Sender<PlaylistSnapshot>),

    /// Stop the service loop
    Shutdown,
}

/// Sending side of the device notification channel
///
/// Handed to the playback device adapter at construction; the adapter calls
/// it from whatever thread its engine reports on.
#[derive(Debug, Clone)]
pub struct DeviceNotifier {
    tx: mpsc::UnboundedSender<DeviceNotification>,
}

impl DeviceNotifier {
    /// Relay a notification; returns false once the service has stopped
    pub fn notify(&self, notification: DeviceNotification) -> bool {
        self.tx.send(notification).is_ok()
    }

    /// Relay a position change
    pub fn position_changed(&self, position_ms: u64) -> bool {
        self.notify(DeviceNotification::PositionChanged(position_ms))
    }

    /// Relay a duration change
    pub fn duration_changed(&self, duration_ms: u64) -> bool {
        self.notify(DeviceNotification::DurationChanged(duration_ms))
    }

    /// Relay a state change
    pub fn state_changed(&self, state: PlaybackState) -> bool {
        self.notify(DeviceNotification::StateChanged(state))
    }

    /// Relay a device error
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.notify(DeviceNotification::Error(message.into()))
    }
}

/// Receiving side of the device notification channel
#[derive(Debug)]
pub struct NotificationReceiver {
    rx: mpsc::UnboundedReceiver<DeviceNotification>,
}

/// Create the device notification channel
///
/// The notifier goes to the device adapter, the receiver to
/// [`PlayerService::spawn`].
pub fn notification_channel() -> (DeviceNotifier, NotificationReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DeviceNotifier { tx }, NotificationReceiver { rx })
}

/// Cloneable handle for issuing commands to the player service
///
/// Commands are fire-and-forget; their effects are observed through
/// [`subscribe`](Self::subscribe) or [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    commands: mpsc::UnboundedSender<PlayerCommand>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlayerHandle {
    /// Send a raw command
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::ServiceClosed)
    }

    /// Receive controller events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Add tracks and start playback if idle
    pub fn open<I>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Track>,
    {
        self.send(PlayerCommand::Open(paths.into_iter().map(Into::into).collect()))
    }

    /// Toggle between playing and paused
    pub fn play_pause(&self) -> Result<()> {
        self.send(PlayerCommand::PlayPause)
    }

    /// Stop playback
    pub fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop)
    }

    /// Select and play a track by index
    pub fn select_index(&self, index: usize) -> Result<()> {
        self.send(PlayerCommand::SelectIndex(index))
    }

    /// Play the following track
    pub fn next(&self) -> Result<()> {
        self.send(PlayerCommand::Next)
    }

    /// Play the preceding track
    pub fn previous(&self) -> Result<()> {
        self.send(PlayerCommand::Previous)
    }

    /// Shuffle the playlist and play from the top
    pub fn shuffle(&self) -> Result<()> {
        self.send(PlayerCommand::Shuffle)
    }

    /// Cycle repeat mode
    pub fn toggle_repeat_mode(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleRepeatMode)
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()> {
        self.send(PlayerCommand::SetRepeatMode(mode))
    }

    /// Remove a track by path
    pub fn remove_track(&self, track: impl Into<Track>) -> Result<()> {
        self.send(PlayerCommand::RemoveTrack(track.into()))
    }

    /// Remove a track by index
    pub fn remove_at(&self, index: usize) -> Result<()> {
        self.send(PlayerCommand::RemoveAt(index))
    }

    /// Seek within the loaded track
    pub fn seek(&self, position_ms: u64) -> Result<()> {
        self.send(PlayerCommand::Seek(position_ms))
    }

    /// Set volume (0-100)
    pub fn set_volume(&self, level: u8) -> Result<()> {
        self.send(PlayerCommand::SetVolume(level))
    }

    /// Mute or unmute
    pub fn set_muted(&self, muted: bool) -> Result<()> {
        self.send(PlayerCommand::SetMuted(muted))
    }

    /// Toggle mute
    pub fn toggle_mute(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleMute)
    }

    /// Copy of the controller state after all previously sent commands
    pub async fn snapshot(&self) -> Result<PlaylistSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(PlayerCommand::Snapshot(reply))?;
        response.await.map_err(|_| PlaybackError::ServiceClosed)
    }

    /// Ask the service loop to exit
    pub fn shutdown(&self) -> Result<()> {
        self.send(PlayerCommand::Shutdown)
    }
}

/// Serialized execution context owning the controller
pub struct PlayerService<D, S> {
    controller: PlaylistController<D, S>,
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
    notifications: NotificationReceiver,
    events: broadcast::Sender<PlaybackEvent>,
    tick_interval: Duration,
}

impl<D, S> PlayerService<D, S>
where
    D: PlaybackDevice + 'static,
    S: SessionStore + 'static,
{
    /// Start the service on the current tokio runtime
    ///
    /// Events the controller queued during construction (the restored
    /// playlist) are flushed when the task first runs; subscribe before
    /// yielding to the runtime to receive them.
    pub fn spawn(
        controller: PlaylistController<D, S>,
        notifications: NotificationReceiver,
        tick_interval: Duration,
    ) -> (PlayerHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let handle = PlayerHandle {
            commands: command_tx,
            events: event_tx.clone(),
        };

        let service = Self {
            controller,
            commands: command_rx,
            notifications,
            events: event_tx,
            tick_interval,
        };

        let task = tokio::spawn(service.run());
        (handle, task)
    }

    async fn run(mut self) {
        tracing::info!(tick_ms = self.tick_interval.as_millis() as u64, "Player service started");

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.flush_events();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(notification) = self.notifications.rx.recv() => {
                    self.controller.handle_notification(notification);
                }
                _ = ticker.tick() => self.controller.tick(),
            }

            self.flush_events();
        }

        tracing::info!("Player service stopped");
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        tracing::trace!(?command, "Player command");

        let result = match command {
            PlayerCommand::Open(paths) => {
                self.controller.open(paths);
                Ok(())
            }
            PlayerCommand::PlayPause => {
                self.controller.play_pause();
                Ok(())
            }
            PlayerCommand::Stop => {
                self.controller.stop();
                Ok(())
            }
            PlayerCommand::SelectIndex(index) => self.controller.select_index(index),
            PlayerCommand::Next => {
                self.controller.next();
                Ok(())
            }
            PlayerCommand::Previous => {
                self.controller.previous();
                Ok(())
            }
            PlayerCommand::Shuffle => {
                self.controller.shuffle();
                Ok(())
            }
            PlayerCommand::ToggleRepeatMode => {
                self.controller.toggle_repeat_mode();
                Ok(())
            }
            PlayerCommand::SetRepeatMode(mode) => {
                self.controller.set_repeat_mode(mode);
                Ok(())
            }
            PlayerCommand::RemoveTrack(track) => {
                self.controller.remove_track(&track);
                Ok(())
            }
            PlayerCommand::RemoveAt(index) => self.controller.remove_at(index).map(|_| ()),
            PlayerCommand::Seek(position_ms) => self.controller.seek(position_ms),
            PlayerCommand::SetVolume(level) => {
                self.controller.set_volume(level);
                Ok(())
            }
            PlayerCommand::SetMuted(muted) => {
                self.controller.set_muted(muted);
                Ok(())
            }
            PlayerCommand::ToggleMute => {
                self.controller.toggle_mute();
                Ok(())
            }
            PlayerCommand::Snapshot(reply) => {
                let _ = reply.send(self.controller.snapshot());
                Ok(())
            }
            PlayerCommand::Shutdown => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Player command rejected");
        }
    }

    fn flush_events(&mut self) {
        for event in self.controller.drain_events() {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }
}
