use idlemon_battle::Snapshot;
use idlemon_protocol::{CatchAttempt, PokemonInfo, Rewards};

/// Outbound side of a playback session.
///
/// Implement this trait to render snapshots and to hand rewards and catches
/// to whatever owns persistent game state. All methods have default no-op
/// implementations, so you only need to implement the ones you care about.
///
/// # Example
///
/// ```ignore
/// struct Panel {
///     frame: Snapshot,
/// }
///
/// impl PlaybackHost for Panel {
///     fn on_snapshot(&mut self, snapshot: &Snapshot) {
///         self.frame = snapshot.clone();
///     }
/// }
/// ```
pub trait PlaybackHost {
    /// Called on every phase change, including the return to idle.
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let _ = snapshot;
    }

    /// Called exactly once per battle, on entering the rewards phase.
    fn persist_rewards(&mut self, rewards: &Rewards) {
        let _ = rewards;
    }

    /// Called exactly once when a catch attempt is revealed as a success.
    fn record_catch(&mut self, attempt: &CatchAttempt, target: Option<&PokemonInfo>) {
        let _ = (attempt, target);
    }
}

/// Host that ignores everything
impl PlaybackHost for () {}
