//! Battle text for each phase

use idlemon_protocol::{BattleKind, BattleScript, FinalResult, MatchupOutcome, Rewards};

use crate::tracking::PlaybackState;
use crate::types::Phase;

const DEFAULT_TRAINER: &str = "The Gym Leader";

pub(super) fn message(state: &PlaybackState, script: Option<&BattleScript>) -> String {
    let Some(script) = script else {
        return match state.phase {
            Phase::Intro if state.kind == BattleKind::Gym => {
                format!("{DEFAULT_TRAINER} wants to battle!")
            }
            _ => String::new(),
        };
    };

    match state.phase {
        Phase::Idle => String::new(),
        Phase::Intro => intro(state.kind, script),
        Phase::Battling => match state.current_matchup(script) {
            Some(m) => format!("Go! {}!", m.player_pokemon.name),
            None => "What will you do?".to_string(),
        },
        Phase::TurnAttack => state
            .current_turn(script)
            .map(|t| format!("{} used {}!", t.attacker_name, t.move_name))
            .unwrap_or_default(),
        Phase::TurnDamage => turn_damage(state, script),
        Phase::MatchupTransition => matchup_transition(state, script),
        Phase::CatchThrow => "You threw a Poke Ball!".to_string(),
        Phase::CatchShake => {
            let shakes = script.catch_attempt.as_ref().map_or(0, |c| c.shakes());
            match shakes {
                0 => "...".to_string(),
                1 => "The ball wobbled once...".to_string(),
                n => format!("The ball wobbled {n} times..."),
            }
        }
        Phase::CatchResult => catch_result(script),
        Phase::Result | Phase::FadeOut => result(script),
        Phase::Rewards => script.rewards.as_ref().map(rewards).unwrap_or_default(),
    }
}

fn trainer(script: &BattleScript) -> &str {
    script.trainer.as_deref().unwrap_or(DEFAULT_TRAINER)
}

fn intro(kind: BattleKind, script: &BattleScript) -> String {
    match kind {
        BattleKind::Wild => match script.catch_target() {
            Some(pokemon) => format!("A wild {} appeared!", pokemon.name),
            None => "A wild Pokemon appeared!".to_string(),
        },
        BattleKind::Gym => format!("{} wants to battle!", trainer(script)),
    }
}

fn turn_damage(state: &PlaybackState, script: &BattleScript) -> String {
    let (Some(matchup), Some(turn)) = (state.current_matchup(script), state.current_turn(script))
    else {
        return String::new();
    };
    let defender = &matchup.pokemon(turn.defender()).name;

    let mut parts = Vec::new();
    if turn.is_critical {
        parts.push("A critical hit!".to_string());
    }
    if let Some(text) = turn.effectiveness.message() {
        parts.push(text.to_string());
    }
    if let Some(status) = &turn.status_effect {
        parts.push(format!("{defender} was afflicted with {status}!"));
    }
    if turn.is_knockout() {
        parts.push(format!("{defender} fainted!"));
    }

    if parts.is_empty() {
        format!("{defender} took {} damage.", turn.damage_dealt)
    } else {
        parts.join(" ")
    }
}

fn matchup_transition(state: &PlaybackState, script: &BattleScript) -> String {
    let Some(matchup) = state.current_matchup(script) else {
        return String::new();
    };

    let ended = match matchup.outcome {
        MatchupOutcome::PlayerPokemonFaint => format!("{} fainted!", matchup.player_pokemon.name),
        MatchupOutcome::OpponentPokemonFaint => {
            format!("{} fainted!", matchup.opponent_pokemon.name)
        }
        MatchupOutcome::Fled => "The battle broke off!".to_string(),
    };

    let Some(next) = state.next_matchup(script) else {
        return ended;
    };

    if next.player_pokemon.name != matchup.player_pokemon.name {
        format!("{ended} Go! {}!", next.player_pokemon.name)
    } else {
        let sender = match state.kind {
            BattleKind::Gym => trainer(script),
            BattleKind::Wild => "The opponent",
        };
        format!("{ended} {sender} sent out {}!", next.opponent_pokemon.name)
    }
}

fn catch_result(script: &BattleScript) -> String {
    let name = script
        .catch_target()
        .map(|p| p.name.as_str())
        .unwrap_or("The Pokemon");

    match &script.catch_attempt {
        Some(attempt) if attempt.success => format!("Gotcha! {name} was caught!"),
        Some(attempt) if attempt.close_call => "Aargh! Almost had it!".to_string(),
        _ => format!("Oh no! {name} broke free!"),
    }
}

fn result(script: &BattleScript) -> String {
    match script.final_result {
        FinalResult::Win => "You won the battle!".to_string(),
        FinalResult::Wipe => "You have no more Pokemon that can fight!".to_string(),
        FinalResult::Fled => "Got away safely!".to_string(),
        FinalResult::Success => format!("You defeated {}!", trainer(script)),
        FinalResult::Failure => format!("You lost to {}...", trainer(script)),
    }
}

fn rewards(rewards: &Rewards) -> String {
    let mut parts = Vec::new();
    if rewards.xp > 0 {
        parts.push(format!("Gained {} XP.", rewards.xp));
    }
    if rewards.money > 0 {
        parts.push(format!("Got ${}.", rewards.money));
    }
    if let Some(badge) = &rewards.badge_id {
        parts.push(format!("Received the {badge} badge!"));
    }
    parts.join(" ")
}
