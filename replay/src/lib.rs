//! Timed playback of resolved battle scripts.
//!
//! # Overview
//!
//! The authority resolves a whole battle up front and sends it as a
//! [`BattleScript`](idlemon_protocol::BattleScript). This crate replays that
//! script on a timeline: each phase holds for a fixed dwell time, HP bars
//! move only when a turn's damage lands, and the host is told about every
//! phase change.
//!
//! ```text
//! BattleScript ──> Session::start
//!                      │
//!                      ├─> machine (enter / dwell / next_phase)
//!                      ├─> Clock (one pending TimerHandle)
//!                      └─> PlaybackHost (snapshots, rewards, catches)
//! ```
//!
//! # Example Usage
//!
//! ```ignore
//! use idlemon_replay::{ManualClock, Session};
//!
//! let mut session = Session::gym(ManualClock::new());
//! session.start(script);
//!
//! while session.fire_next() {
//!     println!("{}", session.snapshot().message);
//! }
//! ```
//!
//! Real-time hosts drive the same session from an async runtime instead of
//! a [`ManualClock`]; see the `idlemon-client` crate.

pub mod clock;
pub mod config;
pub mod host;
pub mod machine;
mod session;

pub use clock::{Clock, ManualClock, TimerHandle, TimerQueue};
pub use config::{ConfigError, DwellTimes, MAX_DWELL_MS, PlaybackConfig};
pub use host::PlaybackHost;
pub use machine::{Dwell, Effect};
pub use session::Session;
