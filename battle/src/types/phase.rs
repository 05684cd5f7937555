//! Playback phases

/// A named state of the playback state machine
///
/// The order of the variants follows the order a full battle moves through
/// them. The catch phases only appear in wild encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    Idle,
    Intro,
    Battling,
    TurnAttack,
    TurnDamage,
    MatchupTransition,
    CatchThrow,
    CatchShake,
    CatchResult,
    Result,
    Rewards,
    FadeOut,
}

impl Phase {
    /// Get the phase tag as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Intro => "intro",
            Phase::Battling => "battling",
            Phase::TurnAttack => "turn_attack",
            Phase::TurnDamage => "turn_damage",
            Phase::MatchupTransition => "matchup_transition",
            Phase::CatchThrow => "catch_throw",
            Phase::CatchShake => "catch_shake",
            Phase::CatchResult => "catch_result",
            Phase::Result => "result",
            Phase::Rewards => "rewards",
            Phase::FadeOut => "fade_out",
        }
    }

    /// Part of the catch sub-sequence
    pub fn is_catch(&self) -> bool {
        matches!(
            self,
            Phase::CatchThrow | Phase::CatchShake | Phase::CatchResult
        )
    }

    /// Playing back a turn
    pub fn is_turn(&self) -> bool {
        matches!(self, Phase::TurnAttack | Phase::TurnDamage)
    }

    /// Showing how the battle ended
    pub fn is_ending(&self) -> bool {
        matches!(self, Phase::Result | Phase::Rewards | Phase::FadeOut)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
