//! Playlist shuffling
//!
//! Uniform Fisher-Yates permutation via `rand`.

use cadence_core::Track;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Shuffle tracks in place using the thread-local RNG
pub fn shuffle_tracks(tracks: &mut [Track]) {
    shuffle_tracks_with(tracks, &mut thread_rng());
}

/// Shuffle tracks in place with a caller-provided RNG
///
/// Each permutation is equally likely.
pub fn shuffle_tracks_with<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}
