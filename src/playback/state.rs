use crate::error::MediaError;
use crate::playback::Track;

/// Which way a skip moves through the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Step `index` one place in this direction, wrapping within `len`.
    pub fn apply(self, index: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            Direction::Next => (index + 1) % len,
            Direction::Previous => (index + len - 1) % len,
        }
    }
}

fn fraction(position: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (position / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// What is playing and where.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
}

impl PlaybackState {
    pub(crate) fn reset_progress(&mut self) {
        self.position_seconds = 0.0;
        self.duration_seconds = 0.0;
    }
}

/// Read-only view of the player handed to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub index: usize,
    pub track: Track,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub last_error: Option<MediaError>,
}

impl PlaybackSnapshot {
    pub fn progress_fraction(&self) -> f64 {
        fraction(self.position_seconds, self.duration_seconds)
    }

    /// Icon for the transport button: the action a press would take.
    pub fn transport_icon(&self) -> &'static str {
        if self.is_playing {
            "pause"
        } else {
            "play"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_wraps_at_both_ends() {
        assert_eq!(Direction::Next.apply(4, 5), 0);
        assert_eq!(Direction::Previous.apply(0, 5), 4);
        assert_eq!(Direction::Next.apply(0, 1), 0);
        assert_eq!(Direction::Previous.apply(0, 1), 0);
    }

    #[test]
    fn progress_fraction_needs_a_duration() {
        assert_eq!(fraction(12.0, 0.0), 0.0);
        assert_eq!(fraction(12.0, 48.0), 0.25);
        assert_eq!(fraction(60.0, 48.0), 1.0);
    }
}
