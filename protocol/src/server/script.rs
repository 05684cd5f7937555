//! Battle script types
//!
//! A script is the finished outcome of a battle as resolved by the server.
//! The client never changes it, it only paces how it is revealed.

use serde::{Deserialize, Serialize};

/// Which kind of encounter produced a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleKind {
    #[default]
    Wild,
    Gym,
}

impl BattleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleKind::Wild => "wild",
            BattleKind::Gym => "gym",
        }
    }
}

/// One side of a matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// The other side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// How well a move landed against the defender's types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    #[default]
    Normal,
    Super,
    NotVery,
    Immune,
}

impl Effectiveness {
    /// Battle text shown after the hit, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Effectiveness::Normal => None,
            Effectiveness::Super => Some("It's super effective!"),
            Effectiveness::NotVery => Some("It's not very effective..."),
            Effectiveness::Immune => Some("It had no effect..."),
        }
    }
}

/// Identity and HP of a Pokemon taking part in a matchup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonInfo {
    /// Server-side identifier (party slot id or wild encounter id)
    #[serde(default)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Species sprite reference, resolved by the renderer
    #[serde(default)]
    pub sprite: String,

    /// HP at the start of the matchup
    pub hp: u32,

    pub max_hp: u32,
}

impl PokemonInfo {
    pub fn new(name: impl Into<String>, hp: u32, max_hp: u32) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            sprite: String::new(),
            hp,
            max_hp,
        }
    }
}

/// One attack exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// Whose Pokemon acted
    pub attacker: Side,

    pub attacker_name: String,

    pub move_name: String,

    #[serde(default)]
    pub move_type: String,

    #[serde(default)]
    pub effectiveness: Effectiveness,

    #[serde(default)]
    pub is_critical: bool,

    pub damage_dealt: u32,

    /// Defender HP once the damage is applied
    pub defender_hp_after: u32,

    /// Status inflicted on the defender (e.g. "poison")
    #[serde(default)]
    pub status_effect: Option<String>,
}

impl Turn {
    /// The side receiving the attack
    pub fn defender(&self) -> Side {
        self.attacker.opposite()
    }

    /// Whether this turn knocks the defender out
    pub fn is_knockout(&self) -> bool {
        self.defender_hp_after == 0
    }
}

/// How a matchup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupOutcome {
    PlayerPokemonFaint,
    OpponentPokemonFaint,
    Fled,
}

impl MatchupOutcome {
    /// The side that fainted, if the matchup ended in a faint
    pub fn fainted(&self) -> Option<Side> {
        match self {
            MatchupOutcome::PlayerPokemonFaint => Some(Side::Player),
            MatchupOutcome::OpponentPokemonFaint => Some(Side::Opponent),
            MatchupOutcome::Fled => None,
        }
    }
}

/// One pairing of a player Pokemon against an opponent Pokemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub player_pokemon: PokemonInfo,

    pub opponent_pokemon: PokemonInfo,

    #[serde(default)]
    pub turns: Vec<Turn>,

    pub outcome: MatchupOutcome,
}

impl Matchup {
    /// Get the Pokemon fighting for a side
    pub fn pokemon(&self, side: Side) -> &PokemonInfo {
        match side {
            Side::Player => &self.player_pokemon,
            Side::Opponent => &self.opponent_pokemon,
        }
    }
}

/// Overall result of the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalResult {
    /// Wild encounter won (opponent fainted or was caught)
    Win,
    /// Every player Pokemon fainted
    Wipe,
    Fled,
    /// Gym leader defeated
    Success,
    /// Gym challenge lost
    Failure,
}

impl FinalResult {
    pub fn is_victory(&self) -> bool {
        matches!(self, FinalResult::Win | FinalResult::Success)
    }
}

/// A resolved Poke Ball throw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchAttempt {
    /// Catch meter fill, 0.0 to 1.0
    pub strength: f64,

    #[serde(default)]
    pub is_critical: bool,

    #[serde(default)]
    pub close_call: bool,

    pub success: bool,
}

impl CatchAttempt {
    /// Number of ball shakes to animate before the result is revealed
    pub fn shakes(&self) -> u8 {
        if self.success {
            return if self.is_critical { 1 } else { 3 };
        }
        if self.close_call {
            return 2;
        }
        let strength = if self.strength.is_finite() {
            self.strength.clamp(0.0, 1.0)
        } else {
            0.0
        };
        ((strength * 3.0).floor() as u8).min(2)
    }
}

/// Rewards granted by the server for this battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewards {
    #[serde(default)]
    pub xp: u32,

    #[serde(default)]
    pub money: u32,

    #[serde(default)]
    pub badge_id: Option<String>,
}

impl Rewards {
    /// Nothing worth showing a rewards banner for
    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.money == 0 && self.badge_id.is_none()
    }
}

/// A fully resolved battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleScript {
    #[serde(default)]
    pub matchups: Vec<Matchup>,

    pub final_result: FinalResult,

    #[serde(default)]
    pub catch_attempt: Option<CatchAttempt>,

    #[serde(default)]
    pub rewards: Option<Rewards>,

    /// Gym leader display name
    #[serde(default)]
    pub trainer: Option<String>,

    /// The wild Pokemon being fought
    #[serde(default)]
    pub encounter: Option<PokemonInfo>,
}

impl BattleScript {
    /// Create a script with no matchups
    pub fn new(final_result: FinalResult) -> Self {
        Self {
            matchups: Vec::new(),
            final_result,
            catch_attempt: None,
            rewards: None,
            trainer: None,
            encounter: None,
        }
    }

    pub fn matchup(&self, index: usize) -> Option<&Matchup> {
        self.matchups.get(index)
    }

    /// Total number of turns across all matchups
    pub fn total_turns(&self) -> usize {
        self.matchups.iter().map(|m| m.turns.len()).sum()
    }

    /// Rewards that deserve their own phase
    pub fn visible_rewards(&self) -> Option<&Rewards> {
        self.rewards.as_ref().filter(|r| !r.is_empty())
    }

    /// The Pokemon a Poke Ball would be thrown at
    pub fn catch_target(&self) -> Option<&PokemonInfo> {
        self.encounter
            .as_ref()
            .or_else(|| self.matchups.first().map(|m| &m.opponent_pokemon))
    }
}
