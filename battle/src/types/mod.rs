//! Domain types for battle playback

mod hp;
mod phase;

pub use hp::{HpBar, HpState, hp_percent};
pub use phase::Phase;
