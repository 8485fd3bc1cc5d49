//! Playback controller - the single owner of "what is playing and where".
//!
//! Intents from the view mutate state and command the sink; sink
//! notifications come back tagged with the generation of the source they
//! describe and are dropped once a later `load` has superseded it.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::MediaError;
use crate::playback::{
    known_duration, Direction, EventListener, MediaEvent, MediaSink, PlaybackSnapshot,
    PlaybackState, Playlist, SourceGeneration, Track,
};

pub struct PlaybackController<S> {
    playlist: Rc<Playlist>,
    sink: S,
    state: PlaybackState,
    generation: SourceGeneration,
    last_error: Option<MediaError>,
}

impl<S: MediaSink> PlaybackController<S> {
    /// Start paused on the first track, which is loaded right away.
    pub fn new(playlist: Rc<Playlist>, sink: S) -> Self {
        let mut controller = Self {
            playlist,
            sink,
            state: PlaybackState::default(),
            generation: SourceGeneration::default(),
            last_error: None,
        };
        controller.change_track(0);
        controller
    }

    pub fn subscribe(&mut self, listener: EventListener) {
        self.sink.subscribe(listener);
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.state.is_playing = false;
            debug!(index = self.state.current_index, "pause");
            if let Err(err) = self.sink.pause() {
                self.fail(err);
            }
        } else {
            // A play press is the retry path after a failure.
            self.last_error = None;
            self.state.is_playing = true;
            debug!(index = self.state.current_index, "play");
            if let Err(err) = self.sink.play() {
                self.fail(err);
            }
        }
    }

    pub fn advance(&mut self, direction: Direction) {
        let index = direction.apply(self.state.current_index, self.playlist.len());
        self.change_track(index);
    }

    /// Jump to `fraction` (0.0-1.0) of the current track.
    ///
    /// No-op until the duration is known.
    pub fn seek(&mut self, fraction: f64) {
        let duration = self.state.duration_seconds;
        if duration <= 0.0 || !fraction.is_finite() {
            debug!(fraction, duration, "seek ignored");
            return;
        }

        let target = (fraction.clamp(0.0, 1.0) * duration).clamp(0.0, duration);
        match self.sink.set_position(target) {
            Ok(()) => self.state.position_seconds = target,
            Err(err) => self.fail(err),
        }
    }

    pub fn on_time_update(
        &mut self,
        generation: SourceGeneration,
        current_seconds: f64,
        duration_seconds: Option<f64>,
    ) {
        if !self.is_active(generation) {
            return;
        }

        let duration = duration_seconds.and_then(known_duration).unwrap_or(0.0);
        let mut position = if current_seconds.is_finite() {
            current_seconds.max(0.0)
        } else {
            0.0
        };
        if duration > 0.0 {
            position = position.min(duration);
        }

        self.state.position_seconds = position;
        self.state.duration_seconds = duration;
    }

    /// The active source played to the end: move on, keeping the play state.
    pub fn on_ended(&mut self, generation: SourceGeneration) {
        if !self.is_active(generation) {
            return;
        }
        info!(index = self.state.current_index, "track ended");
        self.advance(Direction::Next);
    }

    pub fn on_failure(&mut self, generation: SourceGeneration, error: MediaError) {
        if !self.is_active(generation) {
            return;
        }
        self.fail(error);
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate {
                generation,
                current_seconds,
                duration_seconds,
            } => self.on_time_update(generation, current_seconds, duration_seconds),
            MediaEvent::Ended { generation } => self.on_ended(generation),
            MediaEvent::Failed { generation, error } => self.on_failure(generation, error),
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.state();
        PlaybackSnapshot {
            index: state.current_index,
            track: self.current_track().clone(),
            is_playing: state.is_playing,
            position_seconds: state.position_seconds,
            duration_seconds: state.duration_seconds,
            last_error: self.last_error.clone(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Generation of the most recent `load`.
    pub fn generation(&self) -> SourceGeneration {
        self.generation
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.track(self.state.current_index)
    }

    pub fn playlist(&self) -> &Rc<Playlist> {
        &self.playlist
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn is_active(&self, generation: SourceGeneration) -> bool {
        if generation == self.generation() {
            return true;
        }
        debug!(
            stale = generation.value(),
            active = self.generation().value(),
            "dropping stale media notification"
        );
        false
    }

    /// Reset progress, load the new source, then resume if we were playing.
    fn change_track(&mut self, index: usize) {
        let was_playing = self.state.is_playing;
        self.state.current_index = self.playlist.wrap(index);
        self.state.reset_progress();
        self.last_error = None;
        self.generation = self.generation.next();

        let track = self.playlist.track(self.state.current_index);
        info!(
            index = self.state.current_index,
            generation = self.generation.value(),
            title = %track.title,
            "loading track"
        );
        if let Err(err) = self.sink.load(&track.source_ref, self.generation) {
            self.fail(err);
            return;
        }
        if was_playing {
            if let Err(err) = self.sink.play() {
                self.fail(err);
            }
        }
    }

    fn fail(&mut self, error: MediaError) {
        warn!(
            index = self.state.current_index,
            generation = self.generation.value(),
            error = %error,
            "playback failed"
        );
        self.state.is_playing = false;
        self.last_error = Some(error);
    }
}
