//! Snapshot projection
//!
//! [`project`] turns a playback state and its script into what the battle
//! panel renders. It reads nothing else, so equal inputs always produce equal
//! snapshots and the host only needs to re-render when the state changes.

mod message;
mod snapshot;

pub use snapshot::{Banner, CatchMeter, Combatant, DamagePopup, Snapshot};

use idlemon_protocol::{BattleScript, FinalResult, Side};

use crate::tracking::PlaybackState;
use crate::types::Phase;

/// Project the current playback state into a renderable snapshot
pub fn project(state: &PlaybackState, script: Option<&BattleScript>) -> Snapshot {
    if state.is_idle() {
        return Snapshot::default();
    }

    let message = message::message(state, script);
    let Some(script) = script else {
        return Snapshot {
            phase: state.phase,
            message,
            ..Snapshot::default()
        };
    };

    Snapshot {
        phase: state.phase,
        message,
        player: combatant(state, script, Side::Player),
        opponent: combatant(state, script, Side::Opponent),
        damage_popup: damage_popup(state, script),
        banner: banner(state, script),
        catch_meter: catch_meter(state, script),
    }
}

fn combatant(state: &PlaybackState, script: &BattleScript, side: Side) -> Option<Combatant> {
    let hp = state.hp.as_ref()?;
    let matchup = state.current_matchup(script)?;
    Some(Combatant::new(matchup.pokemon(side), hp.bar(side)))
}

fn damage_popup(state: &PlaybackState, script: &BattleScript) -> Option<DamagePopup> {
    if state.phase != Phase::TurnDamage {
        return None;
    }
    let turn = state.current_turn(script)?;
    Some(DamagePopup {
        value: turn.damage_dealt,
        target: turn.defender(),
        critical: turn.is_critical,
        effectiveness: turn.effectiveness,
    })
}

fn banner(state: &PlaybackState, script: &BattleScript) -> Banner {
    let outcome_faint = || {
        state
            .current_matchup(script)
            .and_then(|m| m.outcome.fainted())
            .map_or(Banner::None, Banner::Faint)
    };

    match state.phase {
        Phase::TurnDamage if state.is_last_turn(script) => outcome_faint(),
        Phase::MatchupTransition => outcome_faint(),
        Phase::CatchResult => match &script.catch_attempt {
            Some(attempt) if attempt.success => Banner::Caught,
            _ => Banner::BrokeFree,
        },
        Phase::Result | Phase::FadeOut => result_banner(script.final_result),
        Phase::Rewards => script
            .rewards
            .clone()
            .map_or(Banner::None, Banner::Rewards),
        _ => Banner::None,
    }
}

fn result_banner(result: FinalResult) -> Banner {
    match result {
        FinalResult::Win | FinalResult::Success => Banner::Victory,
        FinalResult::Wipe | FinalResult::Failure => Banner::Defeat,
        FinalResult::Fled => Banner::Fled,
    }
}

fn catch_meter(state: &PlaybackState, script: &BattleScript) -> Option<CatchMeter> {
    if !state.phase.is_catch() {
        return None;
    }
    let attempt = script.catch_attempt.as_ref()?;
    let strength = if attempt.strength.is_finite() {
        attempt.strength.clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(CatchMeter {
        strength,
        critical: attempt.is_critical,
        close_call: attempt.close_call,
        shakes: attempt.shakes(),
        caught: (state.phase == Phase::CatchResult).then_some(attempt.success),
    })
}

#[cfg(test)]
mod tests {
    use idlemon_protocol::{
        BattleKind, CatchAttempt, Effectiveness, Matchup, MatchupOutcome, PokemonInfo, Rewards,
        Turn,
    };

    use super::*;

    fn turn(attacker: Side, name: &str, damage: u32, hp_after: u32) -> Turn {
        Turn {
            attacker,
            attacker_name: name.to_string(),
            move_name: "Tackle".to_string(),
            move_type: "normal".to_string(),
            effectiveness: Effectiveness::Normal,
            is_critical: false,
            damage_dealt: damage,
            defender_hp_after: hp_after,
            status_effect: None,
        }
    }

    fn gym_script() -> BattleScript {
        let mut script = BattleScript::new(FinalResult::Success);
        script.trainer = Some("Misty".to_string());
        script.rewards = Some(Rewards {
            xp: 200,
            money: 1000,
            badge_id: Some("cascade".to_string()),
        });
        script.matchups = vec![
            Matchup {
                player_pokemon: PokemonInfo::new("Oddish", 40, 40),
                opponent_pokemon: PokemonInfo::new("Staryu", 30, 30),
                turns: vec![
                    turn(Side::Player, "Oddish", 10, 20),
                    turn(Side::Opponent, "Staryu", 40, 0),
                ],
                outcome: MatchupOutcome::PlayerPokemonFaint,
            },
            Matchup {
                player_pokemon: PokemonInfo::new("Pikachu", 35, 35),
                opponent_pokemon: PokemonInfo::new("Staryu", 20, 30),
                turns: vec![turn(Side::Player, "Pikachu", 20, 0)],
                outcome: MatchupOutcome::OpponentPokemonFaint,
            },
        ];
        script
    }

    fn state_at(phase: Phase, matchup_index: usize, turn_index: usize) -> PlaybackState {
        PlaybackState {
            kind: BattleKind::Gym,
            phase,
            matchup_index,
            turn_index,
            hp: None,
        }
    }

    #[test]
    fn test_idle_snapshot_is_empty() {
        let script = gym_script();
        let snapshot = project(&PlaybackState::default(), Some(&script));
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_intro_without_script() {
        let state = state_at(Phase::Intro, 0, 0);
        let snapshot = project(&state, None);
        assert_eq!(snapshot.phase, Phase::Intro);
        assert_eq!(snapshot.message, "The Gym Leader wants to battle!");
        assert!(snapshot.player.is_none());
    }

    #[test]
    fn test_intro_names_trainer() {
        let script = gym_script();
        let snapshot = project(&state_at(Phase::Intro, 0, 0), Some(&script));
        assert_eq!(snapshot.message, "Misty wants to battle!");
    }

    #[test]
    fn test_turn_attack_message() {
        let script = gym_script();
        let mut state = state_at(Phase::TurnAttack, 0, 1);
        state.load_matchup(&script);

        let snapshot = project(&state, Some(&script));
        assert_eq!(snapshot.message, "Staryu used Tackle!");
        assert!(snapshot.damage_popup.is_none());
        assert_eq!(snapshot.hp_percent(Side::Player), Some(100.0));
    }

    #[test]
    fn test_turn_damage_popup_and_faint_banner() {
        let script = gym_script();
        let mut state = state_at(Phase::TurnDamage, 0, 1);
        state.load_matchup(&script);
        state.commit_turn(&script);

        let snapshot = project(&state, Some(&script));
        assert_eq!(
            snapshot.damage_popup,
            Some(DamagePopup {
                value: 40,
                target: Side::Player,
                critical: false,
                effectiveness: Effectiveness::Normal,
            })
        );
        assert_eq!(snapshot.banner, Banner::Faint(Side::Player));
        assert_eq!(snapshot.hp_percent(Side::Player), Some(0.0));
        assert_eq!(snapshot.message, "Oddish fainted!");
    }

    #[test]
    fn test_turn_damage_text() {
        let mut script = gym_script();
        {
            let first = &mut script.matchups[0].turns[0];
            first.is_critical = true;
            first.effectiveness = Effectiveness::Super;
            first.status_effect = Some("poison".to_string());
        }
        let mut state = state_at(Phase::TurnDamage, 0, 0);
        state.load_matchup(&script);
        state.commit_turn(&script);

        let snapshot = project(&state, Some(&script));
        assert_eq!(
            snapshot.message,
            "A critical hit! It's super effective! Staryu was afflicted with poison!"
        );
        assert_eq!(snapshot.banner, Banner::None);
        assert_eq!(snapshot.hp_percent(Side::Opponent), Some(20.0 / 30.0 * 100.0));
    }

    #[test]
    fn test_plain_damage_text() {
        let script = gym_script();
        let mut state = state_at(Phase::TurnDamage, 0, 0);
        state.load_matchup(&script);
        state.commit_turn(&script);

        let snapshot = project(&state, Some(&script));
        assert_eq!(snapshot.message, "Staryu took 10 damage.");
    }

    #[test]
    fn test_matchup_transition() {
        let script = gym_script();
        let mut state = state_at(Phase::MatchupTransition, 0, 1);
        state.load_matchup(&script);

        let snapshot = project(&state, Some(&script));
        assert_eq!(snapshot.banner, Banner::Faint(Side::Player));
        assert_eq!(snapshot.message, "Oddish fainted! Go! Pikachu!");
    }

    #[test]
    fn test_result_and_rewards_banners() {
        let script = gym_script();
        let state = state_at(Phase::Result, 1, 0);
        let snapshot = project(&state, Some(&script));
        assert_eq!(snapshot.banner, Banner::Victory);
        assert_eq!(snapshot.message, "You defeated Misty!");

        let snapshot = project(&state_at(Phase::Rewards, 1, 0), Some(&script));
        assert_eq!(
            snapshot.message,
            "Gained 200 XP. Got $1000. Received the cascade badge!"
        );
        assert!(matches!(snapshot.banner, Banner::Rewards(_)));

        let snapshot = project(&state_at(Phase::FadeOut, 1, 0), Some(&script));
        assert_eq!(snapshot.banner, Banner::Victory);
    }

    #[test]
    fn test_defeat_and_fled_banners() {
        let mut script = gym_script();
        script.final_result = FinalResult::Failure;
        let snapshot = project(&state_at(Phase::Result, 1, 0), Some(&script));
        assert_eq!(snapshot.banner, Banner::Defeat);

        script.final_result = FinalResult::Fled;
        let snapshot = project(&state_at(Phase::Result, 1, 0), Some(&script));
        assert_eq!(snapshot.banner, Banner::Fled);
        assert_eq!(snapshot.message, "Got away safely!");
    }

    #[test]
    fn test_catch_meter_only_in_catch_phases() {
        let mut script = BattleScript::new(FinalResult::Win);
        script.encounter = Some(PokemonInfo::new("Pidgey", 18, 18));
        script.catch_attempt = Some(CatchAttempt {
            strength: 0.7,
            is_critical: false,
            close_call: false,
            success: true,
        });
        let mut state = state_at(Phase::CatchShake, 0, 0);
        state.kind = BattleKind::Wild;

        let snapshot = project(&state, Some(&script));
        let meter = snapshot.catch_meter.unwrap();
        assert_eq!(meter.shakes, 3);
        assert_eq!(meter.caught, None);
        assert_eq!(snapshot.message, "The ball wobbled 3 times...");

        state.phase = Phase::CatchResult;
        let snapshot = project(&state, Some(&script));
        assert_eq!(snapshot.catch_meter.unwrap().caught, Some(true));
        assert_eq!(snapshot.banner, Banner::Caught);
        assert_eq!(snapshot.message, "Gotcha! Pidgey was caught!");

        state.phase = Phase::Result;
        assert!(project(&state, Some(&script)).catch_meter.is_none());
    }

    #[test]
    fn test_projection_is_stable() {
        let script = gym_script();
        let mut state = state_at(Phase::TurnDamage, 0, 0);
        state.load_matchup(&script);
        state.commit_turn(&script);

        assert_eq!(project(&state, Some(&script)), project(&state, Some(&script)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_serializes_for_export() {
        let script = gym_script();
        let mut state = state_at(Phase::TurnDamage, 0, 1);
        state.load_matchup(&script);
        state.commit_turn(&script);

        let value = serde_json::to_value(project(&state, Some(&script))).unwrap();
        assert_eq!(value["phase"], "turn_damage");
        assert_eq!(value["message"], "Oddish fainted!");
        assert_eq!(value["player"]["hp"], 0);
        assert_eq!(value["opponent"]["name"], "Staryu");
        assert_eq!(value["damage_popup"]["target"], "player");
        assert_eq!(value["banner"]["Faint"], "player");
        assert!(value["catch_meter"].is_null());
    }
}
