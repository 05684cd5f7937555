use anyhow::{Context, Result};
use idlemon_protocol::{BattleKind, BattleScript, ServerMessage, parse_server_message};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Playback client stopped")]
    Stopped,

    #[error("Received a {got} battle on a {expected} battle panel")]
    KindMismatch { expected: &'static str, got: &'static str },
}

/// Requests from handles to the client task
#[derive(Debug)]
pub(crate) enum Command {
    Start(BattleScript),
    Challenge { gym_id: String },
    Deliver(BattleScript),
    ThrowBall,
    Close,
}

/// Cloneable handle to a running [`PlaybackClient`](crate::PlaybackClient)
///
/// Every method only queues a command, so handles can be used from any task
/// or from synchronous UI callbacks.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    tx: mpsc::UnboundedSender<Command>,
    kind: BattleKind,
}

impl PlaybackHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Command>, kind: BattleKind) -> Self {
        Self { tx, kind }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.tx.send(command).map_err(|_| ClientError::Stopped.into())
    }

    /// Kind of battle this client plays back
    pub fn kind(&self) -> BattleKind {
        self.kind
    }

    /// Play a script from the start, replacing whatever is playing
    pub fn start(&self, script: BattleScript) -> Result<()> {
        self.send(Command::Start(script))
    }

    /// Challenge a gym; the intro plays while the authority resolves it
    pub fn challenge(&self, gym_id: &str) -> Result<()> {
        self.send(Command::Challenge {
            gym_id: gym_id.to_string(),
        })
    }

    /// Hand over a script from the authority
    pub fn deliver(&self, script: BattleScript) -> Result<()> {
        self.send(Command::Deliver(script))
    }

    /// Parse a server frame and deliver the battle it carries
    ///
    /// Frames without a battle are ignored. Returns whether a script was
    /// delivered.
    pub fn deliver_frame(&self, text: &str) -> Result<bool> {
        let message = parse_server_message(text).context("Failed to parse server frame")?;

        match message {
            ServerMessage::Battle { kind, script } => {
                if kind != self.kind {
                    return Err(ClientError::KindMismatch {
                        expected: self.kind.as_str(),
                        got: kind.as_str(),
                    }
                    .into());
                }
                self.deliver(script)?;
                Ok(true)
            }
            ServerMessage::ChallengeAccepted { gym_id } => {
                tracing::debug!(gym_id = %gym_id, "Challenge accepted");
                Ok(false)
            }
            ServerMessage::Raw(content) => {
                tracing::debug!(content = %content, "Ignoring unrecognized frame");
                Ok(false)
            }
        }
    }

    /// Throw a ball at a wild pokemon
    pub fn throw_ball(&self) -> Result<()> {
        self.send(Command::ThrowBall)
    }

    /// Close the battle panel
    pub fn close(&self) -> Result<()> {
        self.send(Command::Close)
    }

    /// Whether the client task is still running
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}
