//! Error types for the player.
//!
//! `MediaError` describes what went wrong on the audio side and is shown to
//! the listener; `PlayerError` covers startup preconditions that stop the
//! player from being built at all.

use thiserror::Error;

/// Failure reported by (or on behalf of) a media sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// No audio element or bridge to drive
    #[error("Audio output is unavailable.")]
    Unavailable,

    #[error("Playback was aborted before the stream loaded.")]
    Aborted,

    #[error("Network error while loading this track.")]
    Network,

    #[error("Audio playback failed due to a decode error.")]
    Decode,

    #[error("Failed to load audio because no supported source was found.")]
    Unsupported,

    /// The host refused to start playback (autoplay policy, device denial)
    #[error("Playback was blocked: {0}")]
    PlayRejected(String),

    #[error("Unable to load this audio source: {0}")]
    Other(String),
}

impl MediaError {
    /// Map an HTML media element error code (`MediaError.code`) to a variant.
    pub fn from_code(code: u16, detail: Option<String>) -> Self {
        match code {
            1 => MediaError::Aborted,
            2 => MediaError::Network,
            3 => MediaError::Decode,
            4 => MediaError::Unsupported,
            _ => MediaError::Other(detail.unwrap_or_else(|| format!("media error code {code}"))),
        }
    }
}

/// Startup and configuration errors.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("The playlist is empty; at least one track is required.")]
    EmptyPlaylist,

    #[error("Track {index} is invalid: {reason}")]
    InvalidTrack { index: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
