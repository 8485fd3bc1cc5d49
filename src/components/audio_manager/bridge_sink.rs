// Desktop-webview sink: the same <audio> contract, reached through a JS bridge.
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use dioxus::document;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::error::MediaError;
use crate::playback::{known_duration, EventListener, MediaEvent, MediaSink, SourceGeneration};

const BRIDGE_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__tuneboxAudioBridge) {
    return true;
  }

  const state = { audio: null, requested: 0, active: 0, ended: false, error: null };

  const ensureAudio = (id, preload) => {
    if (state.audio) {
      return state.audio;
    }
    const elementId = id || "tunebox-audio";
    const existing = document.getElementById(elementId);
    const audio = existing || document.createElement("audio");
    if (!existing) {
      audio.id = elementId;
      audio.style.display = "none";
      audio.setAttribute("playsinline", "true");
      document.body.appendChild(audio);
    }
    audio.preload = preload || "metadata";

    audio.addEventListener("loadstart", () => {
      state.active = state.requested;
      state.ended = false;
    });
    audio.addEventListener("ended", () => {
      state.ended = true;
    });
    audio.addEventListener("error", () => {
      const err = audio.error;
      state.error = {
        generation: state.active,
        code: err ? err.code : 0,
        message: err && err.message ? err.message : null,
        rejected: false,
      };
    });

    state.audio = audio;
    return audio;
  };

  window.__tuneboxAudioBridge = {
    apply(command) {
      switch (command.type) {
        case "configure": {
          const audio = ensureAudio(command.settings.element_id, command.settings.preload);
          audio.volume = command.settings.volume;
          break;
        }
        case "load": {
          const audio = ensureAudio();
          state.requested = command.generation;
          audio.src = command.src;
          audio.load();
          break;
        }
        case "play": {
          const generation = state.requested;
          ensureAudio().play().catch((err) => {
            if (err && err.name === "AbortError") {
              return;
            }
            state.error = {
              generation,
              code: 0,
              message: err ? String(err.message || err.name || err) : null,
              rejected: true,
            };
          });
          break;
        }
        case "pause":
          ensureAudio().pause();
          break;
        case "seek":
          ensureAudio().currentTime = Math.max(0, command.position);
          break;
        default:
          return false;
      }
      return true;
    },

    snapshot() {
      const audio = state.audio;
      const snapshot = {
        generation: state.active,
        current_time: audio && Number.isFinite(audio.currentTime) ? audio.currentTime : 0,
        duration: audio && Number.isFinite(audio.duration) ? audio.duration : null,
        ended: state.ended,
        error: state.error,
      };
      state.ended = false;
      state.error = null;
      return snapshot;
    },
  };

  return true;
})();
"#;

const BRIDGE_SNAPSHOT_JS: &str = r#"return (function () {
    const bridge = window.__tuneboxAudioBridge;
    return bridge ? bridge.snapshot() : null;
})();"#;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BridgeCommand<'a> {
    Configure {
        settings: &'a AudioSettings,
    },
    Load {
        src: &'a str,
        generation: SourceGeneration,
    },
    Play,
    Pause,
    Seek {
        position: f64,
    },
}

#[derive(Debug, Deserialize)]
struct BridgeSnapshot {
    generation: SourceGeneration,
    #[serde(default)]
    current_time: f64,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    ended: bool,
    #[serde(default)]
    error: Option<BridgeFailure>,
}

#[derive(Debug, Deserialize)]
struct BridgeFailure {
    generation: SourceGeneration,
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    rejected: bool,
}

impl BridgeFailure {
    fn into_error(self) -> MediaError {
        if self.rejected {
            MediaError::PlayRejected(self.message.unwrap_or_else(|| "unknown error".to_string()))
        } else {
            MediaError::from_code(self.code, self.message)
        }
    }
}

impl BridgeSnapshot {
    /// Position first, then failure, then end of track.
    fn into_events(self) -> Vec<MediaEvent> {
        let mut events = vec![MediaEvent::TimeUpdate {
            generation: self.generation,
            current_seconds: self.current_time,
            duration_seconds: self.duration.and_then(known_duration),
        }];
        if let Some(failure) = self.error {
            events.push(MediaEvent::Failed {
                generation: failure.generation,
                error: failure.into_error(),
            });
        }
        if self.ended {
            events.push(MediaEvent::Ended {
                generation: self.generation,
            });
        }
        events
    }
}

fn send(command: &BridgeCommand<'_>) -> Result<(), MediaError> {
    let payload =
        serde_json::to_string(command).map_err(|err| MediaError::Other(err.to_string()))?;
    let script = format!(
        r#"(function () {{
            const bridge = window.__tuneboxAudioBridge;
            if (!bridge) return false;
            return bridge.apply({payload});
        }})();"#
    );
    let _ = document::eval(&script);
    Ok(())
}

async fn read_snapshot() -> Option<BridgeSnapshot> {
    match document::eval(BRIDGE_SNAPSHOT_JS).join::<BridgeSnapshot>().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            debug!(error = ?err, "audio bridge snapshot unavailable");
            None
        }
    }
}

async fn delay_ms(ms: u32) {
    let script = format!(
        r#"return (async function () {{
            await new Promise(resolve => setTimeout(resolve, {ms}));
            return true;
        }})();"#
    );
    let _ = document::eval(&script).await;
}

fn inject_bridge() {
    let _ = document::eval(BRIDGE_BOOTSTRAP_JS);
}

/// What the pump does after a snapshot read came back empty.
#[derive(Debug, PartialEq)]
enum Recovery {
    Reinject,
    Report(MediaEvent),
    Quiet,
}

/// Tracks whether the injected bridge is still answering.
#[derive(Debug, Default)]
struct BridgeLink {
    requested: SourceGeneration,
    reinjected: bool,
    reported: Option<SourceGeneration>,
}

impl BridgeLink {
    /// Lost once a missing bridge has been reported; commands are refused until it answers again.
    fn is_lost(&self) -> bool {
        self.reported.is_some()
    }

    fn on_snapshot(&mut self) {
        self.reinjected = false;
        self.reported = None;
    }

    /// Re-inject once, then report the requested source as unavailable, once.
    fn on_missing(&mut self) -> Recovery {
        if !self.reinjected {
            self.reinjected = true;
            return Recovery::Reinject;
        }
        if self.reported == Some(self.requested) {
            return Recovery::Quiet;
        }
        self.reported = Some(self.requested);
        Recovery::Report(MediaEvent::Failed {
            generation: self.requested,
            error: MediaError::Unavailable,
        })
    }
}

pub struct BridgeAudioSink {
    listener: Rc<RefCell<Option<EventListener>>>,
    link: Rc<RefCell<BridgeLink>>,
}

impl BridgeAudioSink {
    pub fn attach(settings: &AudioSettings) -> Self {
        inject_bridge();
        if let Err(err) = send(&BridgeCommand::Configure { settings }) {
            warn!(error = %err, "failed to configure audio bridge");
        }
        Self {
            listener: Rc::default(),
            link: Rc::default(),
        }
    }

    /// Poll the bridge and forward what it reports to the listener.
    pub fn event_pump(&self, interval_ms: u32) -> impl Future<Output = ()> + 'static {
        let listener = self.listener.clone();
        let link = self.link.clone();
        async move {
            loop {
                delay_ms(interval_ms).await;
                let events = match read_snapshot().await {
                    Some(snapshot) => {
                        link.borrow_mut().on_snapshot();
                        snapshot.into_events()
                    }
                    None => {
                        let recovery = link.borrow_mut().on_missing();
                        match recovery {
                            Recovery::Reinject => {
                                warn!("audio bridge not answering, injecting it again");
                                inject_bridge();
                                continue;
                            }
                            Recovery::Report(event) => {
                                warn!("audio bridge unavailable");
                                vec![event]
                            }
                            Recovery::Quiet => continue,
                        }
                    }
                };
                let Some(current) = listener.borrow().clone() else {
                    continue;
                };
                for event in events {
                    current(event);
                }
            }
        }
    }

    fn dispatch(&self, command: &BridgeCommand<'_>) -> Result<(), MediaError> {
        if self.link.borrow().is_lost() {
            return Err(MediaError::Unavailable);
        }
        send(command)
    }
}

impl MediaSink for BridgeAudioSink {
    fn load(&mut self, source_ref: &str, generation: SourceGeneration) -> Result<(), MediaError> {
        self.dispatch(&BridgeCommand::Load {
            src: source_ref,
            generation,
        })?;
        self.link.borrow_mut().requested = generation;
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.dispatch(&BridgeCommand::Play)
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.dispatch(&BridgeCommand::Pause)
    }

    fn set_position(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.dispatch(&BridgeCommand::Seek { position: seconds })
    }

    fn subscribe(&mut self, listener: EventListener) {
        *self.listener.borrow_mut() = Some(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_serialize_with_a_type_tag() {
        let load = BridgeCommand::Load {
            src: "/music/a.mp3",
            generation: SourceGeneration::from(3),
        };
        assert_eq!(
            serde_json::to_value(&load).unwrap(),
            json!({"type": "load", "src": "/music/a.mp3", "generation": 3})
        );
        assert_eq!(
            serde_json::to_value(BridgeCommand::Pause).unwrap(),
            json!({"type": "pause"})
        );

        let settings = AudioSettings::default();
        let configure = serde_json::to_value(BridgeCommand::Configure {
            settings: &settings,
        })
        .unwrap();
        assert_eq!(configure["type"], "configure");
        assert_eq!(configure["settings"]["element_id"], "tunebox-audio");
    }

    #[test]
    fn snapshot_reports_position_then_failure_then_end() {
        let snapshot: BridgeSnapshot = serde_json::from_value(json!({
            "generation": 4,
            "current_time": 12.5,
            "duration": null,
            "ended": true,
            "error": {"generation": 4, "code": 2, "message": null, "rejected": false}
        }))
        .unwrap();

        let generation = SourceGeneration::from(4);
        assert_eq!(
            snapshot.into_events(),
            vec![
                MediaEvent::TimeUpdate {
                    generation,
                    current_seconds: 12.5,
                    duration_seconds: None,
                },
                MediaEvent::Failed {
                    generation,
                    error: MediaError::Network,
                },
                MediaEvent::Ended { generation },
            ]
        );
    }

    #[test]
    fn rejected_play_maps_to_play_rejected() {
        let failure: BridgeFailure = serde_json::from_value(json!({
            "generation": 1,
            "message": "NotAllowedError",
            "rejected": true
        }))
        .unwrap();
        assert_eq!(
            failure.into_error(),
            MediaError::PlayRejected("NotAllowedError".to_string())
        );
    }

    #[test]
    fn quiet_snapshot_is_a_single_time_update() {
        let snapshot: BridgeSnapshot = serde_json::from_value(json!({
            "generation": 2,
            "current_time": 0.0,
            "duration": 200.0,
            "ended": false,
            "error": null
        }))
        .unwrap();
        let events = snapshot.into_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            MediaEvent::TimeUpdate {
                duration_seconds: Some(d),
                ..
            } if d == 200.0
        ));
    }

    #[test]
    fn missing_bridge_is_reinjected_then_reported_unavailable() {
        let mut link = BridgeLink {
            requested: SourceGeneration::from(3),
            ..BridgeLink::default()
        };

        assert_eq!(link.on_missing(), Recovery::Reinject);
        assert!(!link.is_lost());
        assert_eq!(
            link.on_missing(),
            Recovery::Report(MediaEvent::Failed {
                generation: SourceGeneration::from(3),
                error: MediaError::Unavailable,
            })
        );
        assert!(link.is_lost());
        assert_eq!(link.on_missing(), Recovery::Quiet);
    }

    #[test]
    fn answering_bridge_clears_a_lost_link() {
        let mut link = BridgeLink::default();
        link.on_missing();
        link.on_missing();
        assert!(link.is_lost());

        link.on_snapshot();
        assert!(!link.is_lost());
        assert_eq!(link.on_missing(), Recovery::Reinject);
    }

    #[test]
    fn null_snapshot_does_not_parse() {
        assert!(serde_json::from_str::<BridgeSnapshot>("null").is_err());
    }
}
