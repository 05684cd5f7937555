//! Play back a battle frame saved to disk
//!
//! Usage: cargo run --example replay_file -- <frame.json> [config.json]

use std::env;
use std::process;

use anyhow::{Context, Result};
use idlemon_client::{Banner, PlaybackClient, PlaybackConfig, PlaybackEvent, Phase};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(frame_path) = args.next() else {
        eprintln!("Usage: replay_file <frame.json> [config.json]");
        process::exit(1);
    };

    let frame = std::fs::read_to_string(&frame_path)
        .with_context(|| format!("Failed to read {}", frame_path))?;

    let config = match args.next() {
        Some(path) => PlaybackConfig::from_path(path)?,
        None if frame.contains("\"wild_battle\"") => PlaybackConfig::wild(),
        None => PlaybackConfig::gym(),
    };

    let (handle, mut events, _task) = PlaybackClient::spawn(config);
    if !handle.deliver_frame(&frame)? {
        eprintln!("{} does not contain a battle", frame_path);
        process::exit(1);
    }

    while let Some(event) = events.recv().await {
        match event {
            PlaybackEvent::Snapshot(snapshot) => {
                if snapshot.phase == Phase::Idle {
                    break;
                }

                let mut line = format!("[{:>18}] {}", snapshot.phase.as_str(), snapshot.message);
                for combatant in [&snapshot.player, &snapshot.opponent].into_iter().flatten() {
                    line.push_str(&format!(
                        "  {} {}/{} ({:.0}%)",
                        combatant.name, combatant.hp, combatant.max_hp, combatant.hp_percent
                    ));
                }
                if snapshot.banner != Banner::None {
                    line.push_str(&format!("  <{:?}>", snapshot.banner));
                }
                println!("{}", line);
            }
            PlaybackEvent::RewardsEarned(rewards) => {
                println!("  + {} XP, ${}", rewards.xp, rewards.money);
            }
            PlaybackEvent::PokemonCaught { pokemon, .. } => {
                if let Some(pokemon) = pokemon {
                    println!("  + caught {}", pokemon.name);
                }
            }
            PlaybackEvent::Outgoing(message) => {
                println!("  -> {}", message.to_wire_format());
            }
        }
    }

    Ok(())
}
