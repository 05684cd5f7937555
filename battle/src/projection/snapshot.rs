//! Renderable snapshot types

use idlemon_protocol::{Effectiveness, PokemonInfo, Rewards, Side};

use crate::types::{HpBar, Phase};

/// One combatant as the HP panel shows it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Combatant {
    pub name: String,
    pub sprite: String,
    pub hp: u32,
    pub max_hp: u32,
    /// Bar fill, 0 to 100
    pub hp_percent: f32,
}

impl Combatant {
    pub fn new(pokemon: &PokemonInfo, bar: &HpBar) -> Self {
        Self {
            name: pokemon.name.clone(),
            sprite: pokemon.sprite.clone(),
            hp: bar.current,
            max_hp: bar.max,
            hp_percent: bar.percent(),
        }
    }
}

/// Floating damage number over the defender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DamagePopup {
    pub value: u32,
    pub target: Side,
    pub critical: bool,
    pub effectiveness: Effectiveness,
}

/// Catch meter shown while a Poke Ball is in play
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CatchMeter {
    /// Meter fill, 0.0 to 1.0
    pub strength: f64,
    pub critical: bool,
    pub close_call: bool,
    pub shakes: u8,
    /// Revealed only once the result phase is reached
    pub caught: Option<bool>,
}

/// Overlay banner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Banner {
    #[default]
    None,
    Faint(Side),
    Victory,
    Defeat,
    Fled,
    Caught,
    BrokeFree,
    Rewards(Rewards),
}

/// Everything the battle panel needs to draw one frame of playback
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub phase: Phase,
    pub message: String,
    pub player: Option<Combatant>,
    pub opponent: Option<Combatant>,
    pub damage_popup: Option<DamagePopup>,
    pub banner: Banner,
    pub catch_meter: Option<CatchMeter>,
}

impl Snapshot {
    /// Get the combatant for a side
    pub fn combatant(&self, side: Side) -> Option<&Combatant> {
        match side {
            Side::Player => self.player.as_ref(),
            Side::Opponent => self.opponent.as_ref(),
        }
    }

    /// HP bar fill for a side, if a matchup is on screen
    pub fn hp_percent(&self, side: Side) -> Option<f32> {
        self.combatant(side).map(|c| c.hp_percent)
    }
}
