#![allow(dead_code)]

use idlemon_battle::{Phase, Snapshot};
use idlemon_protocol::{
    BattleScript, CatchAttempt, Effectiveness, FinalResult, Matchup, MatchupOutcome, PokemonInfo,
    Rewards, Side, Turn,
};
use idlemon_replay::{ManualClock, PlaybackConfig, PlaybackHost, Session};
use rand::Rng;
use rand::rngs::StdRng;

/// Host that keeps everything it is told
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub snapshots: Vec<Snapshot>,
    pub rewards: Vec<Rewards>,
    pub catches: Vec<(CatchAttempt, Option<PokemonInfo>)>,
}

impl RecordingHost {
    pub fn phases(&self) -> Vec<Phase> {
        self.snapshots.iter().map(|s| s.phase).collect()
    }

    pub fn count(&self, phase: Phase) -> usize {
        self.snapshots.iter().filter(|s| s.phase == phase).count()
    }

    pub fn last(&self, phase: Phase) -> Option<&Snapshot> {
        self.snapshots.iter().rev().find(|s| s.phase == phase)
    }
}

impl PlaybackHost for RecordingHost {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn persist_rewards(&mut self, rewards: &Rewards) {
        self.rewards.push(rewards.clone());
    }

    fn record_catch(&mut self, attempt: &CatchAttempt, target: Option<&PokemonInfo>) {
        self.catches.push((attempt.clone(), target.cloned()));
    }
}

pub type TestSession = Session<ManualClock, RecordingHost>;

pub fn session(config: PlaybackConfig) -> TestSession {
    Session::new(config, ManualClock::new(), RecordingHost::default())
}

pub fn turn(attacker: Side, attacker_name: &str, damage: u32, hp_after: u32) -> Turn {
    Turn {
        attacker,
        attacker_name: attacker_name.to_string(),
        move_name: "Tackle".to_string(),
        move_type: "normal".to_string(),
        effectiveness: Effectiveness::Normal,
        is_critical: false,
        damage_dealt: damage,
        defender_hp_after: hp_after,
        status_effect: None,
    }
}

/// Two matchups: the player's first pokemon faints after three turns, the
/// second knocks the opponent out in two.
pub fn gym_script() -> BattleScript {
    let mut script = BattleScript::new(FinalResult::Success);
    script.trainer = Some("Brock".to_string());
    script.matchups = vec![
        Matchup {
            player_pokemon: PokemonInfo::new("Pikachu", 40, 40),
            opponent_pokemon: PokemonInfo::new("Onix", 35, 35),
            turns: vec![
                turn(Side::Opponent, "Onix", 15, 25),
                turn(Side::Player, "Pikachu", 5, 30),
                turn(Side::Opponent, "Onix", 25, 0),
            ],
            outcome: MatchupOutcome::PlayerPokemonFaint,
        },
        Matchup {
            player_pokemon: PokemonInfo::new("Bulbasaur", 45, 45),
            opponent_pokemon: PokemonInfo::new("Geodude", 30, 30),
            turns: vec![
                turn(Side::Player, "Bulbasaur", 18, 12),
                turn(Side::Player, "Bulbasaur", 12, 0),
            ],
            outcome: MatchupOutcome::OpponentPokemonFaint,
        },
    ];
    script.rewards = Some(Rewards {
        xp: 120,
        money: 300,
        badge_id: Some("boulder".to_string()),
    });
    script
}

/// One matchup, one knockout turn, no rewards
pub fn one_turn_script(final_result: FinalResult) -> BattleScript {
    let mut script = BattleScript::new(final_result);
    script.encounter = Some(PokemonInfo::new("Rattata", 20, 20));
    script.matchups.push(Matchup {
        player_pokemon: PokemonInfo::new("Charmander", 39, 39),
        opponent_pokemon: PokemonInfo::new("Rattata", 20, 20),
        turns: vec![turn(Side::Player, "Charmander", 20, 0)],
        outcome: MatchupOutcome::OpponentPokemonFaint,
    });
    script
}

/// Wild encounter with a catch attempt; a ball that misses lets the pokemon flee
pub fn wild_catch_script(success: bool) -> BattleScript {
    let mut script = one_turn_script(if success {
        FinalResult::Win
    } else {
        FinalResult::Fled
    });
    script.catch_attempt = Some(CatchAttempt {
        strength: 0.55,
        is_critical: false,
        close_call: !success,
        success,
    });
    script.rewards = Some(Rewards {
        xp: 15,
        money: 0,
        badge_id: None,
    });
    script
}

/// A valid script of random shape
///
/// HP only goes down, each matchup ends with the fainted side at 0 and the
/// outcome agrees with the last turn.
pub fn random_script(rng: &mut StdRng) -> BattleScript {
    let matchup_count = rng.gen_range(0..=4);
    let mut matchups = Vec::with_capacity(matchup_count);

    for i in 0..matchup_count {
        let player_max = rng.gen_range(1..=120);
        let opponent_max = rng.gen_range(1..=120);
        let mut player_hp = player_max;
        let mut opponent_hp = opponent_max;
        let mut turns = Vec::new();
        let mut outcome = MatchupOutcome::Fled;

        for _ in 0..rng.gen_range(0..=6) {
            let attacker = if rng.gen_bool(0.5) {
                Side::Player
            } else {
                Side::Opponent
            };
            let defender_hp = match attacker {
                Side::Player => &mut opponent_hp,
                Side::Opponent => &mut player_hp,
            };
            let damage = rng.gen_range(0..=*defender_hp);
            *defender_hp -= damage;
            turns.push(turn(attacker, "Attacker", damage, *defender_hp));

            if *defender_hp == 0 {
                outcome = match attacker {
                    Side::Player => MatchupOutcome::OpponentPokemonFaint,
                    Side::Opponent => MatchupOutcome::PlayerPokemonFaint,
                };
                break;
            }
        }

        matchups.push(Matchup {
            player_pokemon: PokemonInfo::new(format!("Player{i}"), player_max, player_max),
            opponent_pokemon: PokemonInfo::new(format!("Opponent{i}"), opponent_max, opponent_max),
            turns,
            outcome,
        });
    }

    let mut script = BattleScript::new(if rng.gen_bool(0.5) {
        FinalResult::Win
    } else {
        FinalResult::Wipe
    });
    script.matchups = matchups;
    if rng.gen_bool(0.5) {
        script.rewards = Some(Rewards {
            xp: rng.gen_range(0..50),
            money: rng.gen_range(0..50),
            badge_id: None,
        });
    }
    script
}
