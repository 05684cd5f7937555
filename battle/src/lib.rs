//! Playback state and UI projection for idlemon battle scripts.
//!
//! # Overview
//!
//! `idlemon-battle` sits between `idlemon-protocol` (script model) and the
//! playback engine:
//!
//! ```text
//! idlemon-protocol (BattleScript)
//!        │
//!        ▼
//! idlemon-battle (PlaybackState + project) ← THIS CRATE
//!        │
//!        ├─> idlemon-replay (state machine, clock, session)
//!        └─> host UI (renders Snapshot)
//! ```
//!
//! # Main Types
//!
//! - [`Phase`] - Named states of the playback machine
//! - [`PlaybackState`] - Cursors and projected HP, written only by the machine
//! - [`HpState`] - HP bars for both sides of the current matchup
//! - [`Snapshot`] - What the battle panel renders
//! - [`project`] - Pure function from state and script to [`Snapshot`]
//!
//! # Example Usage
//!
//! ```ignore
//! use idlemon_battle::{PlaybackState, Phase, project};
//!
//! let mut state = PlaybackState::new(BattleKind::Gym);
//! state.phase = Phase::Battling;
//! state.load_matchup(&script);
//!
//! let snapshot = project(&state, Some(&script));
//! println!("{}", snapshot.message);
//! ```

pub mod projection;
pub mod tracking;
pub mod types;

pub use projection::{Banner, CatchMeter, Combatant, DamagePopup, Snapshot, project};
pub use tracking::PlaybackState;
pub use types::{HpBar, HpState, Phase, hp_percent};

// Re-export commonly used protocol types
pub use idlemon_protocol::{BattleKind, BattleScript, Side};
