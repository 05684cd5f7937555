mod script;
mod validate;

pub use script::{
    BattleKind, BattleScript, CatchAttempt, Effectiveness, FinalResult, Matchup, MatchupOutcome,
    PokemonInfo, Rewards, Side, Turn,
};
pub use validate::ScriptError;

use crate::ParseError;
use anyhow::{Context, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// A finished battle ready for playback
    Battle {
        kind: BattleKind,
        script: BattleScript,
    },
    /// The gym accepted a challenge; its script follows later
    ChallengeAccepted { gym_id: String },
    Raw(String),
}

impl ServerMessage {
    /// Take the battle script out of the message, if it carries one
    pub fn into_battle(self) -> Option<(BattleKind, BattleScript)> {
        match self {
            ServerMessage::Battle { kind, script } => Some((kind, script)),
            _ => None,
        }
    }
}

/// Parse a single JSON event from the server into a ServerMessage
///
/// Text that is not a JSON object with a `type` field is kept as `Raw`.
/// Blank frames are an error.
pub fn parse_server_message(text: &str) -> Result<ServerMessage> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ParseError::EmptyMessage.into());
    }

    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return Ok(ServerMessage::Raw(text.to_string()));
    };

    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Ok(ServerMessage::Raw(text.to_string()));
    };

    match kind {
        "wild_battle" => parse_battle(&value, BattleKind::Wild),
        "gym_battle" => parse_battle(&value, BattleKind::Gym),
        "challenge_accepted" => parse_challenge_accepted(&value),
        _ => Ok(ServerMessage::Raw(text.to_string())),
    }
}

fn parse_battle(value: &Value, kind: BattleKind) -> Result<ServerMessage> {
    // {"type":"wild_battle","script":{...}}
    let script = value
        .get("script")
        .ok_or_else(|| ParseError::MissingField("script".to_string()))?;

    let script: BattleScript = serde_json::from_value(script.clone())
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
        .with_context(|| format!("Failed to decode {} battle script", kind.as_str()))?;

    Ok(ServerMessage::Battle { kind, script })
}

fn parse_challenge_accepted(value: &Value) -> Result<ServerMessage> {
    let gym_id = value
        .get("gymId")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::MissingField("gymId".to_string()))?;

    if gym_id.is_empty() {
        return Err(ParseError::InvalidFormat("gymId cannot be empty".to_string()).into());
    }

    Ok(ServerMessage::ChallengeAccepted {
        gym_id: gym_id.to_string(),
    })
}
