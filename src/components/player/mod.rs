use std::rc::Rc;

use crate::components::{Icon, PlayerSignal};
use crate::utils::{click_fraction, format_time, progress_percent};
use dioxus::prelude::*;

mod controls;

use controls::{NextButton, PlayPauseButton, PrevButton};

#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerSignal>();
    let snapshot = player.snapshot();
    let track = snapshot.track.clone();

    // Cover grows while playing; derived, never stored.
    let cover_class = if snapshot.is_playing {
        "cover cover--playing"
    } else {
        "cover"
    };

    rsx! {
        div { class: "player",
            if let Some(error) = snapshot.last_error.as_ref() {
                div { class: "player-error", role: "alert", "{error}" }
            }

            // Cover Image
            div { class: "cover-frame",
                if track.cover_ref.is_empty() {
                    div { class: "{cover_class} cover--placeholder",
                        Icon {
                            name: "music".to_string(),
                            class: "icon icon--xl".to_string(),
                        }
                    }
                } else {
                    img {
                        class: "{cover_class}",
                        src: "{track.cover_ref}",
                        alt: "cover",
                    }
                }
            }

            // Song Title & Artist
            div { class: "track-info",
                h1 { class: "track-title", "{track.title}" }
                span { class: "track-artist", "{track.artist}" }
            }

            ProgressBar { fraction: snapshot.progress_fraction() }

            div { class: "time-row",
                span { "{format_time(snapshot.position_seconds)}" }
                span { "{format_time(snapshot.duration_seconds)}" }
            }

            div { class: "transport",
                PrevButton {}
                PlayPauseButton {}
                NextButton {}
            }
        }
    }
}

/// Clickable progress bar; converts the click position into a seek fraction.
#[component]
fn ProgressBar(fraction: f64) -> Element {
    let player = use_context::<PlayerSignal>();
    let mut bar = use_signal(|| None::<Rc<MountedData>>);
    let width = progress_percent(fraction);

    rsx! {
        div {
            class: "progress",
            onmounted: move |evt: MountedEvent| bar.set(Some(evt.data())),
            onclick: move |evt: MouseEvent| {
                let offset = evt.element_coordinates().x;
                let Some(element) = bar() else {
                    return;
                };
                spawn(async move {
                    if let Ok(rect) = element.get_client_rect().await {
                        if let Some(fraction) = click_fraction(offset, rect.width()) {
                            player.seek(fraction);
                        }
                    }
                });
            },
            div { class: "progress-fill", style: "width: {width}%" }
        }
    }
}
