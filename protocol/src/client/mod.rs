use serde_json::json;

/// Commands the player-input layer sends to the server
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// Challenge a gym leader; the battle script arrives later
    ChallengeGym { gym_id: String },

    /// Throw a Poke Ball at the current wild encounter
    ThrowBall,

    /// The battle panel was closed
    CloseBattle,

    /// Raw event name for catch-all
    Raw(String),
}

impl ClientCommand {
    /// Event name used on the wire
    pub fn event_name(&self) -> &str {
        match self {
            Self::ChallengeGym { .. } => "challenge_gym",
            Self::ThrowBall => "throw_ball",
            Self::CloseBattle => "close_battle",
            Self::Raw(event) => event,
        }
    }
}

/// Client message with optional encounter context
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMessage {
    pub encounter_id: Option<String>,
    pub command: ClientCommand,
}

impl ClientMessage {
    /// Serialize to wire format: {"type":EVENT, ...}
    pub fn to_wire_format(&self) -> String {
        let mut body = json!({ "type": self.command.event_name() });

        if let ClientCommand::ChallengeGym { gym_id } = &self.command {
            body["gymId"] = json!(gym_id);
        }
        if let Some(id) = &self.encounter_id {
            body["encounterId"] = json!(id);
        }

        body.to_string()
    }
}
