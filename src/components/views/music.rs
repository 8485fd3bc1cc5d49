use crate::components::Player;
use dioxus::prelude::*;

#[component]
pub fn MusicView() -> Element {
    rsx! {
        section { class: "music-view", Player {} }
    }
}
