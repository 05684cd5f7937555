//! HP updates applied while a script plays back

use idlemon_protocol::{BattleScript, Turn};

use super::state::PlaybackState;
use crate::types::HpState;

impl PlaybackState {
    /// Show the starting HP of the matchup under the cursor
    pub fn load_matchup(&mut self, script: &BattleScript) {
        self.hp = self.current_matchup(script).map(HpState::from_matchup);
    }

    /// Commit the damage of the turn under the cursor to the HP bars
    ///
    /// Returns the committed turn. The defender's HP is taken from the turn,
    /// never computed from the damage value.
    pub fn commit_turn<'a>(&mut self, script: &'a BattleScript) -> Option<&'a Turn> {
        let turn = self.current_turn(script)?;
        let hp = self.hp.as_mut()?;

        let bar = hp.bar_mut(turn.defender());
        bar.current = turn.defender_hp_after.min(bar.current);

        Some(turn)
    }
}
