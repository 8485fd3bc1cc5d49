//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_manager;
mod icons;
mod player;
mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::{AudioController, PlayerSignal};
pub use icons::*;
pub use player::*;
