//! Structural checks on a battle script
//!
//! Combat legality is the server's business. These checks only catch scripts
//! whose HP story cannot be animated coherently.

use thiserror::Error;

use super::script::{BattleScript, Matchup, Side};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("matchup {matchup}: {side:?} starts with {hp} HP above its max of {max_hp}")]
    StartingHpExceedsMax {
        matchup: usize,
        side: Side,
        hp: u32,
        max_hp: u32,
    },

    #[error("matchup {matchup} turn {turn}: {side:?} HP {hp} exceeds max of {max_hp}")]
    HpExceedsMax {
        matchup: usize,
        turn: usize,
        side: Side,
        hp: u32,
        max_hp: u32,
    },

    #[error("matchup {matchup} turn {turn}: {side:?} HP rose from {before} to {after}")]
    HpIncreased {
        matchup: usize,
        turn: usize,
        side: Side,
        before: u32,
        after: u32,
    },

    #[error("matchup {matchup} turn {turn}: {side:?} was attacked after fainting")]
    TurnAfterFaint {
        matchup: usize,
        turn: usize,
        side: Side,
    },

    #[error("matchup {matchup} turn {turn}: {side:?} attacked after fainting")]
    FaintedAttacker {
        matchup: usize,
        turn: usize,
        side: Side,
    },

    #[error("matchup {matchup}: declared outcome disagrees with the final turn")]
    OutcomeMismatch { matchup: usize },

    #[error("catch strength {0} is outside 0..=1")]
    CatchStrengthOutOfRange(f64),
}

impl BattleScript {
    /// Check the script is internally consistent enough to animate
    pub fn validate(&self) -> Result<(), ScriptError> {
        if let Some(attempt) = &self.catch_attempt
            && !(attempt.strength.is_finite() && (0.0..=1.0).contains(&attempt.strength))
        {
            return Err(ScriptError::CatchStrengthOutOfRange(attempt.strength));
        }

        for (index, matchup) in self.matchups.iter().enumerate() {
            validate_matchup(index, matchup)?;
        }

        Ok(())
    }
}

fn validate_matchup(index: usize, matchup: &Matchup) -> Result<(), ScriptError> {
    for side in [Side::Player, Side::Opponent] {
        let pokemon = matchup.pokemon(side);
        if pokemon.hp > pokemon.max_hp {
            return Err(ScriptError::StartingHpExceedsMax {
                matchup: index,
                side,
                hp: pokemon.hp,
                max_hp: pokemon.max_hp,
            });
        }
    }

    // [player, opponent]
    let mut hp = [matchup.player_pokemon.hp, matchup.opponent_pokemon.hp];
    let slot = |side: Side| match side {
        Side::Player => 0,
        Side::Opponent => 1,
    };

    for (turn_index, turn) in matchup.turns.iter().enumerate() {
        let side = turn.defender();
        let before = hp[slot(side)];
        let after = turn.defender_hp_after;
        let max_hp = matchup.pokemon(side).max_hp;

        if hp[slot(turn.attacker)] == 0 {
            return Err(ScriptError::FaintedAttacker {
                matchup: index,
                turn: turn_index,
                side: turn.attacker,
            });
        }
        if before == 0 {
            return Err(ScriptError::TurnAfterFaint {
                matchup: index,
                turn: turn_index,
                side,
            });
        }
        if after > max_hp {
            return Err(ScriptError::HpExceedsMax {
                matchup: index,
                turn: turn_index,
                side,
                hp: after,
                max_hp,
            });
        }
        if after > before {
            return Err(ScriptError::HpIncreased {
                matchup: index,
                turn: turn_index,
                side,
                before,
                after,
            });
        }

        hp[slot(side)] = after;
    }

    if let Some(last) = matchup.turns.last() {
        let agrees = match matchup.outcome.fainted() {
            Some(side) => last.defender() == side && last.is_knockout(),
            None => !last.is_knockout(),
        };
        if !agrees {
            return Err(ScriptError::OutcomeMismatch { matchup: index });
        }
    }

    Ok(())
}
