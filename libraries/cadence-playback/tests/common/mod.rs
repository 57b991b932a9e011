//! Shared test helpers
//!
//! `RecordingDevice` logs every command it receives. When built with a
//! notifier it also reports state changes back like a real engine would.

#![allow(dead_code)]

use cadence_core::{PlaybackDevice, PlaybackState, Track};
use cadence_playback::{DeviceNotifier, PlaybackEvent};
use std::sync::{Arc, Mutex, MutexGuard};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn t(path: &str) -> Track {
    Track::new(path)
}

pub fn tracks(paths: &[&str]) -> Vec<Track> {
    paths.iter().map(|p| Track::new(*p)).collect()
}

/// A command received by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Load(String),
    Play,
    Pause,
    Stop,
    Seek(u64),
    SetVolume(u8),
    SetMuted(bool),
}

#[derive(Debug, Default)]
struct DeviceLog {
    calls: Vec<DeviceCall>,
    state: PlaybackState,
    position_ms: u64,
    duration_ms: u64,
}

/// Playback device double; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingDevice {
    log: Arc<Mutex<DeviceLog>>,
    notifier: Option<DeviceNotifier>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that relays its state changes through `notifier`
    pub fn with_notifier(notifier: DeviceNotifier) -> Self {
        Self {
            log: Arc::default(),
            notifier: Some(notifier),
        }
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.lock().calls.clone()
    }

    /// Calls since the last take, excluding volume setup
    pub fn take_transport_calls(&self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.lock().calls)
            .into_iter()
            .filter(|c| !matches!(c, DeviceCall::SetVolume(_) | DeviceCall::SetMuted(_)))
            .collect()
    }

    pub fn set_progress(&self, position_ms: u64, duration_ms: u64) {
        let mut log = self.lock();
        log.position_ms = position_ms;
        log.duration_ms = duration_ms;
    }

    /// Simulate the loaded media playing to its end
    pub fn finish_track(&self) {
        self.transition(PlaybackState::Stopped);
    }

    /// Simulate a decode failure
    pub fn fail(&self, message: &str) {
        if let Some(notifier) = &self.notifier {
            notifier.error(message);
        }
        self.transition(PlaybackState::Stopped);
    }

    fn record(&self, call: DeviceCall) {
        self.lock().calls.push(call);
    }

    fn transition(&self, state: PlaybackState) {
        let changed = {
            let mut log = self.lock();
            let changed = log.state != state;
            log.state = state;
            changed
        };
        if changed {
            if let Some(notifier) = &self.notifier {
                notifier.state_changed(state);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeviceLog> {
        self.log.lock().unwrap()
    }
}

impl PlaybackDevice for RecordingDevice {
    fn load(&mut self, track: &Track) {
        self.record(DeviceCall::Load(track.path().to_string()));
    }

    fn play(&mut self) {
        self.record(DeviceCall::Play);
        self.transition(PlaybackState::Playing);
    }

    fn pause(&mut self) {
        self.record(DeviceCall::Pause);
        if self.lock().state == PlaybackState::Playing {
            self.transition(PlaybackState::Paused);
        }
    }

    fn stop(&mut self) {
        self.record(DeviceCall::Stop);
        self.transition(PlaybackState::Stopped);
    }

    fn seek(&mut self, position_ms: u64) {
        self.record(DeviceCall::Seek(position_ms));
        self.lock().position_ms = position_ms;
    }

    fn set_volume(&mut self, volume: u8) {
        self.record(DeviceCall::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.record(DeviceCall::SetMuted(muted));
    }

    fn position(&self) -> u64 {
        self.lock().position_ms
    }

    fn duration(&self) -> u64 {
        self.lock().duration_ms
    }

    fn state(&self) -> PlaybackState {
        self.lock().state
    }
}

pub fn is_track_list_changed(event: &PlaybackEvent) -> bool {
    matches!(event, PlaybackEvent::TrackListChanged { .. })
}
