//! Phase transition table
//!
//! Three functions describe the whole machine:
//! - [`enter`] runs a phase's entry actions
//! - [`dwell`] says how long the current phase holds
//! - [`next_phase`] runs the exit transition and picks the following phase
//!
//! None of them touch a clock. The session strings them together and owns
//! all scheduling.

use std::time::Duration;

use idlemon_battle::{Phase, PlaybackState};
use idlemon_protocol::BattleScript;

use crate::config::{PlaybackConfig, millis};

/// How the current phase is left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dwell {
    /// Advance once the timer fires
    Timed(Duration),
    /// Advance in the same call
    Immediate,
    /// Wait for an external trigger
    Hold,
}

/// Outbound call owed when a phase is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    PersistRewards,
    RecordCatch,
}

/// Enter `phase`, running its entry actions
pub fn enter(
    state: &mut PlaybackState,
    phase: Phase,
    script: Option<&BattleScript>,
) -> Option<Effect> {
    state.phase = phase;

    match phase {
        Phase::Idle => {
            state.reset();
            None
        }
        Phase::Intro => {
            state.matchup_index = 0;
            state.turn_index = 0;
            state.hp = None;
            None
        }
        Phase::Battling => {
            if let Some(script) = script {
                state.load_matchup(script);
            }
            None
        }
        // The only place HP bars move
        Phase::TurnDamage => {
            if let Some(script) = script {
                state.commit_turn(script);
            }
            None
        }
        Phase::CatchResult => script
            .and_then(|s| s.catch_attempt.as_ref())
            .filter(|attempt| attempt.success)
            .map(|_| Effect::RecordCatch),
        Phase::Rewards => script
            .and_then(BattleScript::visible_rewards)
            .map(|_| Effect::PersistRewards),
        _ => None,
    }
}

/// How long the current phase holds
pub fn dwell(
    state: &PlaybackState,
    script: Option<&BattleScript>,
    config: &PlaybackConfig,
) -> Dwell {
    let d = &config.dwell;

    let ms = match state.phase {
        Phase::Idle => return Dwell::Hold,
        Phase::Intro if !config.intro => 0,
        Phase::Intro => d.intro_ms,
        Phase::Battling => d.battling_ms,
        Phase::TurnAttack => d.attack_ms,
        Phase::TurnDamage => d.damage_ms,
        Phase::MatchupTransition => d.matchup_transition_ms.saturating_add(d.send_out_ms),
        Phase::CatchThrow => d.catch_throw_ms,
        Phase::CatchShake => {
            let shakes = script
                .and_then(|s| s.catch_attempt.as_ref())
                .map_or(1, |c| c.shakes().max(1));
            d.catch_shake_ms.saturating_mul(u64::from(shakes))
        }
        Phase::CatchResult => d.catch_result_ms,
        Phase::Result => d.result_ms,
        Phase::Rewards => d.rewards_ms,
        Phase::FadeOut => d.fade_out_ms,
    };

    if ms == 0 {
        Dwell::Immediate
    } else {
        Dwell::Timed(millis(ms))
    }
}

/// Leave the current phase, updating cursors, and return the next phase
pub fn next_phase(state: &mut PlaybackState, script: &BattleScript) -> Phase {
    match state.phase {
        Phase::Idle => Phase::Idle,
        Phase::Intro => Phase::Battling,
        Phase::Battling => {
            if script.matchups.is_empty() {
                Phase::Result
            } else {
                begin_matchup(state, script)
            }
        }
        Phase::TurnAttack => Phase::TurnDamage,
        Phase::TurnDamage => {
            if !state.is_last_turn(script) {
                state.turn_index += 1;
                Phase::TurnAttack
            } else if !state.is_last_matchup(script) {
                Phase::MatchupTransition
            } else {
                Phase::Result
            }
        }
        Phase::MatchupTransition => {
            state.matchup_index += 1;
            state.turn_index = 0;
            state.load_matchup(script);
            begin_matchup(state, script)
        }
        Phase::CatchThrow => Phase::CatchShake,
        Phase::CatchShake => Phase::CatchResult,
        Phase::CatchResult => Phase::Result,
        Phase::Result => {
            if script.visible_rewards().is_some() {
                Phase::Rewards
            } else {
                Phase::FadeOut
            }
        }
        Phase::Rewards => Phase::FadeOut,
        Phase::FadeOut => Phase::Idle,
    }
}

/// First phase for the matchup under the cursor
///
/// A matchup with no turns goes straight to its transition (or to the result
/// if it is the last one) so its outcome still gets shown.
fn begin_matchup(state: &PlaybackState, script: &BattleScript) -> Phase {
    match state.current_matchup(script) {
        Some(matchup) if !matchup.turns.is_empty() => Phase::TurnAttack,
        Some(_) if !state.is_last_matchup(script) => Phase::MatchupTransition,
        _ => Phase::Result,
    }
}

/// Whether a catch trigger is accepted right now
pub fn can_catch(state: &PlaybackState, script: &BattleScript, config: &PlaybackConfig) -> bool {
    state.phase == Phase::Battling && config.catch_enabled() && script.catch_attempt.is_some()
}
