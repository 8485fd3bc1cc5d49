//! Audio Manager - Handles audio playback outside of the component render cycle.
//! Owns the playback controller and the sink it drives, and routes sink
//! notifications back into it.

use std::rc::Rc;

use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;

use crate::config::AudioSettings;
use crate::playback::{
    Direction, EventListener, MediaEvent, PlaybackController, PlaybackSnapshot, Playlist,
};

#[cfg(not(target_arch = "wasm32"))]
mod bridge_sink;
#[cfg(any(target_arch = "wasm32", test))]
mod latch;
#[cfg(target_arch = "wasm32")]
mod web_sink;

#[cfg(not(target_arch = "wasm32"))]
pub use bridge_sink::BridgeAudioSink as AudioSink;
#[cfg(target_arch = "wasm32")]
pub use web_sink::WebAudioSink as AudioSink;

/// Handle to the shared controller, provided through context.
#[derive(Clone, Copy)]
pub struct PlayerSignal(Signal<PlaybackController<AudioSink>>);

impl PlayerSignal {
    /// Subscribes the calling component to playback changes.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.0.read().snapshot()
    }

    pub fn playlist(&self) -> Rc<Playlist> {
        self.0.peek().playlist().clone()
    }

    pub fn toggle_play_pause(mut self) {
        self.0.write().toggle_play_pause();
    }

    pub fn advance(mut self, direction: Direction) {
        self.0.write().advance(direction);
    }

    pub fn seek(mut self, fraction: f64) {
        self.0.write().seek(fraction);
    }
}

/// Audio controller - builds the sink once and keeps it for the app's lifetime
#[component]
pub fn AudioController(
    playlist: Rc<Playlist>,
    settings: AudioSettings,
    children: Element,
) -> Element {
    let player = use_hook(|| {
        let sink = AudioSink::attach(&settings);
        let mut player = Signal::new(PlaybackController::new(playlist.clone(), sink));

        // Sink callbacks arrive from the host's event loop, outside any scope.
        let runtime = Runtime::current();
        let listener: EventListener = Rc::new(move |event: MediaEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            let mut player = player;
            player.write().handle_event(event);
        });
        player.write().subscribe(listener);

        #[cfg(not(target_arch = "wasm32"))]
        spawn(player.peek().sink().event_pump(settings.poll_interval_ms));

        PlayerSignal(player)
    });

    use_context_provider(|| player);

    rsx! {
        {children}
    }
}
