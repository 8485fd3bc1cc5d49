use crate::components::{Icon, PlayerSignal};
use crate::playback::Direction;
use dioxus::prelude::*;

/// Play/Pause button - completely isolated component
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let player = use_context::<PlayerSignal>();
    let snapshot = player.snapshot();

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "transport-main",
            aria_label: if snapshot.is_playing { "Pause" } else { "Play" },
            onclick: move |_| player.toggle_play_pause(),
            Icon {
                name: snapshot.transport_icon().to_string(),
                class: "icon icon--lg".to_string(),
            }
        }
    }
}

/// Previous button - wraps to the last track from the first
#[component]
pub(super) fn PrevButton() -> Element {
    let player = use_context::<PlayerSignal>();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: "transport-skip",
            aria_label: "Previous track",
            onclick: move |_| player.advance(Direction::Previous),
            Icon { name: "prev".to_string(), class: "icon icon--xl".to_string() }
        }
    }
}

/// Next button - wraps to the first track from the last
#[component]
pub(super) fn NextButton() -> Element {
    let player = use_context::<PlayerSignal>();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: "transport-skip",
            aria_label: "Next track",
            onclick: move |_| player.advance(Direction::Next),
            Icon { name: "next".to_string(), class: "icon icon--xl".to_string() }
        }
    }
}
