//! The contract between the controller and whatever actually renders audio.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::MediaError;

/// Identifies one `load` issued to a sink.
///
/// Every notification a sink emits carries the generation of the source it
/// describes, so anything that outlives a track change can be told apart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SourceGeneration(u64);

impl SourceGeneration {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for SourceGeneration {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Asynchronous notification from a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Position report; `duration_seconds` is `None` until metadata loads.
    TimeUpdate {
        generation: SourceGeneration,
        current_seconds: f64,
        duration_seconds: Option<f64>,
    },
    Ended {
        generation: SourceGeneration,
    },
    Failed {
        generation: SourceGeneration,
        error: MediaError,
    },
}

pub type EventListener = Rc<dyn Fn(MediaEvent)>;

/// Host audio capability.
///
/// Commands are requests: an `Err` means the sink refused outright, anything
/// that fails later comes back as [`MediaEvent::Failed`]. Implementations must
/// never invoke the listener from inside a command.
pub trait MediaSink {
    /// Replace the active source. Supersedes anything still in flight.
    fn load(&mut self, source_ref: &str, generation: SourceGeneration) -> Result<(), MediaError>;
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self) -> Result<(), MediaError>;
    fn set_position(&mut self, seconds: f64) -> Result<(), MediaError>;
    fn subscribe(&mut self, listener: EventListener);
}

/// Treat NaN, infinite (live streams) and non-positive durations as unknown.
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum SinkCommand {
        Load {
            source: String,
            generation: SourceGeneration,
        },
        Play,
        Pause,
        SetPosition(f64),
    }

    /// Sink that records every command and can be told to refuse some.
    #[derive(Default)]
    pub struct RecordingSink {
        pub commands: Vec<SinkCommand>,
        pub refuse_load: Option<MediaError>,
        pub refuse_play: Option<MediaError>,
        pub listener: Option<EventListener>,
    }

    impl RecordingSink {
        pub fn count(&self, command: &SinkCommand) -> usize {
            self.commands.iter().filter(|c| *c == command).count()
        }

        pub fn clear(&mut self) {
            self.commands.clear();
        }
    }

    impl MediaSink for RecordingSink {
        fn load(
            &mut self,
            source_ref: &str,
            generation: SourceGeneration,
        ) -> Result<(), MediaError> {
            self.commands.push(SinkCommand::Load {
                source: source_ref.to_string(),
                generation,
            });
            match &self.refuse_load {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn play(&mut self) -> Result<(), MediaError> {
            self.commands.push(SinkCommand::Play);
            match &self.refuse_play {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn pause(&mut self) -> Result<(), MediaError> {
            self.commands.push(SinkCommand::Pause);
            Ok(())
        }

        fn set_position(&mut self, seconds: f64) -> Result<(), MediaError> {
            self.commands.push(SinkCommand::SetPosition(seconds));
            Ok(())
        }

        fn subscribe(&mut self, listener: EventListener) {
            self.listener = Some(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_durations_are_none() {
        assert_eq!(known_duration(f64::NAN), None);
        assert_eq!(known_duration(f64::INFINITY), None);
        assert_eq!(known_duration(0.0), None);
        assert_eq!(known_duration(183.5), Some(183.5));
    }

    #[test]
    fn generation_round_trips_as_plain_number() {
        let generation = SourceGeneration::from(7).next();
        assert_eq!(generation.value(), 8);
        assert_eq!(serde_json::to_string(&generation).unwrap(), "8");
        let parsed: SourceGeneration = serde_json::from_str("8").unwrap();
        assert_eq!(parsed, generation);
    }
}
