//! Player configuration, embedded at build time from `assets/player.json`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::playback::{Playlist, Track};

const EMBEDDED_CONFIG: &str = include_str!("../assets/player.json");

/// Settings for the audio element (or the desktop bridge standing in for it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub element_id: String,
    pub preload: String,
    /// Desktop bridge snapshot cadence
    pub poll_interval_ms: u32,
    pub volume: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            element_id: "tunebox-audio".to_string(),
            preload: "metadata".to_string(),
            poll_interval_ms: 200,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub songs: Vec<Track>,
}

impl PlayerConfig {
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: PlayerConfig = serde_json::from_str(raw)?;
        config.audio.volume = normalize_volume(config.audio.volume);
        config.audio.poll_interval_ms = config.audio.poll_interval_ms.clamp(50, 5_000);
        Ok(config)
    }

    /// Split into audio settings and a validated playlist.
    pub fn into_parts(self) -> Result<(AudioSettings, Playlist)> {
        let playlist = Playlist::new(self.songs)?;
        Ok((self.audio, playlist))
    }
}

/// Accept both 0-1 and 0-100 style volumes.
fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    if value > 1.0 {
        value /= 100.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;

    #[test]
    fn embedded_config_has_the_five_songs() {
        let (audio, playlist) = PlayerConfig::embedded().unwrap().into_parts().unwrap();
        assert_eq!(playlist.len(), 5);
        assert_eq!(playlist.track(0).title, "Dreams pt. I");
        assert_eq!(playlist.track(4).artist, "Zedd");
        assert_eq!(audio.element_id, "tunebox-audio");
    }

    #[test]
    fn audio_section_is_optional() {
        let config = PlayerConfig::from_json(
            r#"{"songs":[{"title":"a","artist":"b","src":"/music/a.mp3","cover":""}]}"#,
        )
        .unwrap();
        assert_eq!(config.audio, AudioSettings::default());
    }

    #[test]
    fn settings_are_normalized() {
        let config = PlayerConfig::from_json(
            r#"{"audio":{"volume":80,"poll_interval_ms":0},"songs":[]}"#,
        )
        .unwrap();
        assert_eq!(config.audio.volume, 0.8);
        assert_eq!(config.audio.poll_interval_ms, 50);
        assert_eq!(config.audio.preload, "metadata");
    }

    #[test]
    fn empty_song_list_fails_at_startup() {
        let config = PlayerConfig::from_json(r#"{"songs":[]}"#).unwrap();
        assert!(matches!(config.into_parts(), Err(PlayerError::EmptyPlaylist)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            PlayerConfig::from_json("{ not json"),
            Err(PlayerError::Config(_))
        ));
    }

    #[test]
    fn volume_edge_cases() {
        assert_eq!(normalize_volume(f64::NAN), 1.0);
        assert_eq!(normalize_volume(-3.0), 0.0);
        assert_eq!(normalize_volume(0.35), 0.35);
        assert_eq!(normalize_volume(250.0), 1.0);
    }
}
