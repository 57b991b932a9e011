//! Cadence Core
//!
//! Platform-agnostic core types, traits, and error handling for Cadence.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaybackState`, `RepeatMode`
//! - **Core Traits**: `PlaybackDevice` (external audio engine), `SessionStore` (persisted playlist)
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{RepeatMode, Track};
//!
//! let track = Track::new("/music/Artist - Song.mp3");
//! assert_eq!(track.file_name(), "Artist - Song.mp3");
//!
//! assert_eq!(RepeatMode::Off.next(), RepeatMode::All);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use traits::{PlaybackDevice, SessionStore};
pub use types::{PlaybackState, RepeatMode, Track};
