//! Domain types shared across Cadence crates

mod playback_state;
mod track;

pub use playback_state::{PlaybackState, RepeatMode};
pub use track::Track;
