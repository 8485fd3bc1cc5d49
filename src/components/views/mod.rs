mod home;
mod music;

pub use home::{HomeView, NotFoundView};
pub use music::MusicView;
