//! Cadence Storage
//!
//! Persistence for the session playlist.
//!
//! - [`PlaylistFile`]: a single UTF-8 file holding a JSON array of track paths
//! - [`MemorySessionStore`]: in-process store for tests and embedders
//!
//! Both implement [`cadence_core::SessionStore`]. Reading never fails: a
//! missing or malformed playlist degrades to an empty one.
//!
//! ```rust
//! use cadence_core::{SessionStore, Track};
//! use cadence_storage::MemorySessionStore;
//!
//! let store = MemorySessionStore::new();
//! store.save(&[Track::new("/music/a.mp3")]).unwrap();
//! assert_eq!(store.load(), vec![Track::new("/music/a.mp3")]);
//! ```

#![forbid(unsafe_code)]

mod memory;
mod playlist_file;

pub use memory::MemorySessionStore;
pub use playlist_file::{PlaylistFile, DEFAULT_PLAYLIST_FILE};
