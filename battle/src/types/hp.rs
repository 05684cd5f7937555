//! Projected HP

use idlemon_protocol::{Matchup, PokemonInfo, Side};

/// Convert an HP value to a bar percentage in 0..=100
///
/// A max HP of 0 is shown as a full bar.
pub fn hp_percent(hp: u32, max_hp: u32) -> f32 {
    if max_hp == 0 {
        return 100.0;
    }
    (hp as f32 / max_hp as f32 * 100.0).clamp(0.0, 100.0)
}

/// HP of one combatant as currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HpBar {
    pub current: u32,
    pub max: u32,
}

impl HpBar {
    pub fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    pub fn from_pokemon(pokemon: &PokemonInfo) -> Self {
        Self::new(pokemon.hp, pokemon.max_hp)
    }

    pub fn percent(&self) -> f32 {
        hp_percent(self.current, self.max)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

/// Projected HP for both sides of the current matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HpState {
    pub player: HpBar,
    pub opponent: HpBar,
}

impl HpState {
    /// Starting HP of a matchup
    pub fn from_matchup(matchup: &Matchup) -> Self {
        Self {
            player: HpBar::from_pokemon(&matchup.player_pokemon),
            opponent: HpBar::from_pokemon(&matchup.opponent_pokemon),
        }
    }

    pub fn bar(&self, side: Side) -> &HpBar {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn bar_mut(&mut self, side: Side) -> &mut HpBar {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}
