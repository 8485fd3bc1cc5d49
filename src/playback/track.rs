use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

/// One playable song entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(rename = "src")]
    pub source_ref: String,
    #[serde(rename = "cover", default)]
    pub cover_ref: String,
}

/// Ordered, non-empty list of tracks fixed for the session.
///
/// A track's identity is its position; the controller only ever holds
/// indices that came out of [`Playlist::wrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, rejecting an empty list or a track without a source.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        if let Some(index) = tracks.iter().position(|t| t.source_ref.trim().is_empty()) {
            return Err(PlayerError::InvalidTrack {
                index,
                reason: "missing audio source".to_string(),
            });
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed playlist.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Reduce any index into range.
    pub fn wrap(&self, index: usize) -> usize {
        index % self.tracks.len()
    }

    /// Track at `index`, wrapped into range.
    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[self.wrap(index)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            title: format!("Song {i}"),
            artist: format!("Artist {i}"),
            source_ref: format!("/music/song-{i}.mp3"),
            cover_ref: format!("/images/song-{i}.jpg"),
        })
        .collect()
}
