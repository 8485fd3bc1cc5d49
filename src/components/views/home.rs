use crate::components::{AppView, Icon, PlayerSignal};
use dioxus::prelude::*;

#[component]
pub fn HomeView() -> Element {
    let player = use_context::<PlayerSignal>();
    let snapshot = player.snapshot();
    let playlist = player.playlist();
    let status = if snapshot.is_playing { "Playing" } else { "Paused" };

    rsx! {
        section { class: "home",
            div { class: "home-hero",
                h1 { class: "home-title", "Tunebox" }
                p { class: "home-subtitle", "{playlist.len()} tracks in rotation" }
                Link { class: "home-cta", to: AppView::MusicView {},
                    Icon { name: "play".to_string(), class: "icon".to_string() }
                    span { "Open player" }
                }
            }

            ol { class: "track-list",
                for (index, track) in playlist.iter().enumerate() {
                    li {
                        key: "{index}-{track.source_ref}",
                        class: if index == snapshot.index { "track-row track-row--current" } else { "track-row" },
                        span { class: "track-row-index", "{index + 1}" }
                        div { class: "track-row-meta",
                            span { class: "track-row-title", "{track.title}" }
                            span { class: "track-row-artist", "{track.artist}" }
                        }
                        if index == snapshot.index {
                            span { class: "track-row-status", "{status}" }
                        }
                    }
                }
            }
        }
    }
}

/// Unknown paths fall back to the home listing.
#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    tracing::debug!(path = %segments.join("/"), "unknown route, showing home");
    rsx! {
        HomeView {}
    }
}
