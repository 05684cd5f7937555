//! Playback state tracking

mod state;
mod updater;

pub use state::PlaybackState;
