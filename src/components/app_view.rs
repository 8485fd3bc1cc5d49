//! Defines the application routes.

use dioxus::prelude::*;

use crate::components::views::{HomeView, MusicView, NotFoundView};
use crate::components::AppShell;

#[derive(Debug, Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/music")]
        MusicView {},
        #[route("/:..segments")]
        NotFoundView { segments: Vec<String> },
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::HomeView {} => "Home",
        AppView::MusicView {} => "Now Playing",
        AppView::NotFoundView { .. } => "Home",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn paths_resolve_to_views() {
        assert_eq!(AppView::from_str("/").unwrap(), AppView::HomeView {});
        assert_eq!(AppView::from_str("/music").unwrap(), AppView::MusicView {});
        assert!(matches!(
            AppView::from_str("/elsewhere").unwrap(),
            AppView::NotFoundView { .. }
        ));
        assert_eq!(AppView::MusicView {}.to_string(), "/music");
    }

    #[test]
    fn labels() {
        assert_eq!(view_label(&AppView::MusicView {}), "Now Playing");
        assert_eq!(
            view_label(&AppView::NotFoundView {
                segments: vec!["x".to_string()]
            }),
            "Home"
        );
    }
}
