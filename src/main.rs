use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod playback;
mod utils;

use components::AppView;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting tunebox");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#1e1b2e" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Tunebox" }

        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
