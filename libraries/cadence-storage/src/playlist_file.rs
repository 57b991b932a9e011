//! JSON playlist file

use cadence_core::{CadenceError, Result, SessionStore, Track};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default playlist file name, relative to the working directory
pub const DEFAULT_PLAYLIST_FILE: &str = "playlist.json";

/// Playlist persisted as a JSON array of strings
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct PlaylistFile {
    path: PathBuf,
}

impl PlaylistFile {
    /// Create a store backed by `path`
    ///
    /// The file is not touched until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the playlist file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, reporting why it could not be used
    pub fn try_load(&self) -> Result<Vec<Track>> {
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| CadenceError::serialization(e.to_string()))
    }

    fn write_atomic(&self, tracks: &[Track]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, tracks)
                .map_err(|e| CadenceError::serialization(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path)
            .map_err(|e| CadenceError::storage(format!("{}: {}", self.path.display(), e.error)))?;
        Ok(())
    }
}

impl Default for PlaylistFile {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYLIST_FILE)
    }
}

impl SessionStore for PlaylistFile {
    fn load(&self) -> Vec<Track> {
        match self.try_load() {
            Ok(tracks) => {
                tracing::debug!(path = %self.path.display(), count = tracks.len(), "Loaded playlist");
                tracks
            }
            Err(CadenceError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No playlist file, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable playlist file, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, tracks: &[Track]) -> Result<()> {
        self.write_atomic(tracks)?;
        tracing::debug!(path = %self.path.display(), count = tracks.len(), "Saved playlist");
        Ok(())
    }
}
