//! Volume and mute state
//!
//! Volume range is 0-100%. Muting silences the device without changing the
//! stored level, so unmuting restores the previous loudness.

use serde::{Deserialize, Serialize};

/// Volume level below which the UI shows the "low" speaker
const LOW_THRESHOLD: u8 = 30;

/// Volume level below which the UI shows the "medium" speaker
const MEDIUM_THRESHOLD: u8 = 70;

/// Volume controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume state, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set mute state
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Toggle mute state, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Loudness category for the speaker icon
    pub fn indicator(&self) -> VolumeLevel {
        if self.muted || self.level == 0 {
            VolumeLevel::Muted
        } else if self.level < LOW_THRESHOLD {
            VolumeLevel::Low
        } else if self.level < MEDIUM_THRESHOLD {
            VolumeLevel::Medium
        } else {
            VolumeLevel::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Coarse loudness category shown next to the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLevel {
    /// Muted or zero volume
    Muted,
    /// 1-29
    Low,
    /// 30-69
    Medium,
    /// 70-100
    High,
}
