use anyhow::Result;
use idlemon_protocol::{ClientCommand, ClientMessage};
use idlemon_replay::{PlaybackConfig, Session};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::clock::TokioClock;
use crate::event::{EventForwarder, PlaybackEvent};
use crate::handle::{Command, PlaybackHandle};

/// Real-time driver for one battle panel
///
/// Owns a [`Session`] and is the only thing that touches it. Commands come
/// in through [`PlaybackHandle`]s and everything the session produces goes
/// out as [`PlaybackEvent`]s.
pub struct PlaybackClient {
    session: Session<TokioClock, EventForwarder>,
    commands: mpsc::UnboundedReceiver<Command>,
    encounter_id: Option<String>,
}

impl PlaybackClient {
    /// Create a client along with its handle and event stream
    pub fn new(
        config: PlaybackConfig,
    ) -> (Self, PlaybackHandle, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let handle = PlaybackHandle::new(command_tx, config.kind);
        let session = Session::new(config, TokioClock::new(), EventForwarder::new(event_tx));

        let client = Self {
            session,
            commands: command_rx,
            encounter_id: None,
        };
        (client, handle, event_rx)
    }

    /// Spawn the client on the current runtime
    pub fn spawn(
        config: PlaybackConfig,
    ) -> (
        PlaybackHandle,
        mpsc::UnboundedReceiver<PlaybackEvent>,
        tokio::task::JoinHandle<Result<()>>,
    ) {
        let (client, handle, events) = Self::new(config);
        let task = tokio::spawn(client.run());
        (handle, events, task)
    }

    /// Run until every handle has been dropped
    ///
    /// Any battle still playing at that point is cancelled.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(kind = self.session.config().kind.as_str(), "Playback client started");

        loop {
            let deadline = self.session.clock().next_deadline();

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire_due();
                }
            }
        }

        self.session.cancel();
        tracing::info!("Playback client stopped");
        Ok(())
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start(script) => {
                self.encounter_id = None;
                self.session.start(script);
            }
            Command::Challenge { gym_id } => {
                if self.session.challenge() {
                    self.encounter_id = Some(gym_id.clone());
                    self.send_outgoing(ClientCommand::ChallengeGym { gym_id });
                }
            }
            Command::Deliver(script) => self.session.deliver(script),
            Command::ThrowBall => {
                if self.session.trigger_catch_attempt() {
                    self.send_outgoing(ClientCommand::ThrowBall);
                }
            }
            Command::Close => {
                if self.session.is_playing() {
                    self.session.cancel();
                    self.send_outgoing(ClientCommand::CloseBattle);
                }
                self.encounter_id = None;
            }
        }
    }

    fn fire_due(&mut self) {
        let due = self.session.clock_mut().take_due(Instant::now());
        for handle in due {
            self.session.on_timer(handle);
        }
    }

    fn send_outgoing(&self, command: ClientCommand) {
        let message = ClientMessage {
            encounter_id: self.encounter_id.clone(),
            command,
        };
        tracing::debug!(wire = %message.to_wire_format(), "Queued outgoing command");
        self.session.host().send(PlaybackEvent::Outgoing(message));
    }
}
