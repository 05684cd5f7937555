//! Async driver for idlemon battle playback.
//!
//! [`PlaybackClient`] runs a playback session on a tokio task against the
//! real clock. UI code talks to it through a cloneable [`PlaybackHandle`]
//! and renders the [`PlaybackEvent`]s it sends back.
//!
//! ```ignore
//! let (handle, mut events, _task) = PlaybackClient::spawn(PlaybackConfig::wild());
//!
//! handle.deliver_frame(&frame_from_server)?;
//!
//! while let Some(event) = events.recv().await {
//!     if let PlaybackEvent::Snapshot(snapshot) = event {
//!         println!("{}", snapshot.message);
//!     }
//! }
//! ```

mod client;
mod clock;
mod event;
mod handle;

pub use client::PlaybackClient;
pub use clock::TokioClock;
pub use event::PlaybackEvent;
pub use handle::{ClientError, PlaybackHandle};

pub use idlemon_battle::{Banner, Phase, Snapshot};
pub use idlemon_protocol::{BattleKind, BattleScript, ClientCommand, ClientMessage};
pub use idlemon_replay::{DwellTimes, PlaybackConfig};
