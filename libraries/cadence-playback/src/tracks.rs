//! Ordered, duplicate-free track collection
//!
//! The store only mutates the collection. Persistence and device control are
//! the controller's responsibility.

use cadence_core::Track;

/// Ordered collection of tracks with set semantics on insertion
///
/// ```text
///   0: /music/a.mp3
///   1: /music/b.mp3   <- add("/music/b.mp3") is a no-op
///   2: /music/c.mp3
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

impl TrackStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Append `track` unless an identical path is already present
    ///
    /// Returns whether an insertion occurred.
    pub fn add(&mut self, track: Track) -> bool {
        if self.contains(&track) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove `track`, returning the index it occupied
    pub fn remove(&mut self, track: &Track) -> Option<usize> {
        let index = self.index_of(track)?;
        self.tracks.remove(index);
        Some(index)
    }

    /// Remove the track at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    /// Membership test by exact path equality
    pub fn contains(&self, track: &Track) -> bool {
        self.tracks.contains(track)
    }

    /// Position of `track`, if present
    pub fn index_of(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t == track)
    }

    /// All tracks in playlist order
    pub fn all(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Mutable access for reordering (shuffle)
    ///
    /// A slice cannot grow, so uniqueness is preserved.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Track] {
        &mut self.tracks
    }
}

impl FromIterator<Track> for TrackStore {
    /// Build a store, keeping the first occurrence of each path
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut store = Self::new();
        for track in iter {
            store.add(track);
        }
        store
    }
}
