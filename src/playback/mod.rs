//! Framework-free playback core: the playlist, the state machine and the
//! sink contract it drives.

mod controller;
pub(crate) mod sink;
pub(crate) mod state;
pub(crate) mod track;

pub use controller::PlaybackController;
pub use sink::{known_duration, EventListener, MediaEvent, MediaSink, SourceGeneration};
pub use state::{Direction, PlaybackSnapshot, PlaybackState};
pub use track::{Playlist, Track};
