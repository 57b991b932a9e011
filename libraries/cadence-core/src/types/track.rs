/// Track reference type
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a single playable audio item
///
/// Tracks are opaque file-system paths. Two tracks are the same track when
/// their paths are byte-for-byte equal; no normalization is applied.
/// Serializes as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track(String);

impl Track {
    /// Create a track from a path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The path this track refers to
    pub fn path(&self) -> &str {
        &self.0
    }

    /// Last path segment, used for display and search
    ///
    /// Both `/` and `\` are treated as separators.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }

    /// Consume the track, returning the path
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Track {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for Track {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl AsRef<str> for Track {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
