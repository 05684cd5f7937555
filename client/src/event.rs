use idlemon_battle::Snapshot;
use idlemon_protocol::{CatchAttempt, ClientMessage, PokemonInfo, Rewards};
use idlemon_replay::PlaybackHost;
use tokio::sync::mpsc;

/// Everything the playback client tells the outside world
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A phase was entered; render this
    Snapshot(Snapshot),
    /// Rewards to add to the player's save, sent once per battle
    RewardsEarned(Rewards),
    /// A wild pokemon was caught
    PokemonCaught {
        attempt: CatchAttempt,
        pokemon: Option<PokemonInfo>,
    },
    /// A command for the battle authority
    Outgoing(ClientMessage),
}

/// Host that turns session callbacks into [`PlaybackEvent`]s
///
/// A closed receiver is not an error: the session keeps playing with nobody
/// watching.
pub(crate) struct EventForwarder {
    tx: mpsc::UnboundedSender<PlaybackEvent>,
}

impl EventForwarder {
    pub(crate) fn new(tx: mpsc::UnboundedSender<PlaybackEvent>) -> Self {
        Self { tx }
    }

    pub(crate) fn send(&self, event: PlaybackEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Playback event receiver dropped");
        }
    }
}

impl PlaybackHost for EventForwarder {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.send(PlaybackEvent::Snapshot(snapshot.clone()));
    }

    fn persist_rewards(&mut self, rewards: &Rewards) {
        self.send(PlaybackEvent::RewardsEarned(rewards.clone()));
    }

    fn record_catch(&mut self, attempt: &CatchAttempt, target: Option<&PokemonInfo>) {
        self.send(PlaybackEvent::PokemonCaught {
            attempt: attempt.clone(),
            pokemon: target.cloned(),
        });
    }
}
