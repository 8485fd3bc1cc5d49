use std::rc::Rc;

use crate::components::{view_label, AppView, AudioController, Icon};
use crate::config::{AudioSettings, PlayerConfig};
use crate::playback::Playlist;
use dioxus::prelude::*;
use tracing::{error, info};

/// Parse the embedded config once; a bad config or empty playlist stops here.
/// The playlist is shared, so re-renders clone a pointer rather than the tracks.
fn load_player() -> Result<(AudioSettings, Rc<Playlist>), String> {
    PlayerConfig::embedded()
        .and_then(PlayerConfig::into_parts)
        .map(|(settings, playlist)| {
            info!(tracks = playlist.len(), "playlist loaded");
            (settings, Rc::new(playlist))
        })
        .map_err(|err| {
            error!(error = %err, "player failed to start");
            err.to_string()
        })
}

#[component]
pub fn AppShell() -> Element {
    let setup = use_hook(load_player);
    let view = use_route::<AppView>();
    let on_player = matches!(view, AppView::MusicView {});

    let (settings, playlist) = match setup {
        Ok(parts) => parts,
        Err(message) => {
            return rsx! {
                div { class: "app-container",
                    div { class: "player-error player-error--fatal", role: "alert", "{message}" }
                }
            };
        }
    };

    rsx! {
        div { class: "app-container",
            header { class: "app-header",
                if on_player {
                    Link {
                        class: "header-link",
                        to: AppView::HomeView {},
                        aria_label: "Back to home",
                        Icon {
                            name: "arrow-left".to_string(),
                            class: "icon".to_string(),
                        }
                    }
                } else {
                    Link {
                        class: "header-link",
                        to: AppView::MusicView {},
                        aria_label: "Open player",
                        Icon { name: "music".to_string(), class: "icon".to_string() }
                    }
                }
                div { class: "header-title",
                    span { class: "header-brand", "Tunebox" }
                    span { class: "header-view", "{view_label(&view)}" }
                }
            }

            // Audio controller - manages playback separately from UI
            AudioController { playlist, settings,
                main { class: "page-shell", Outlet::<AppView> {} }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_setup_shares_one_playlist() {
        let setup = load_player().unwrap();
        let rerender = setup.clone();

        assert!(Rc::ptr_eq(&setup.1, &rerender.1));
        assert_eq!(rerender.1.len(), 5);
        assert_eq!(rerender.0.element_id, "tunebox-audio");
    }
}
