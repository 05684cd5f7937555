//! PlaybackState - the single mutable record of a battle being replayed

use idlemon_protocol::{BattleKind, BattleScript, Matchup, Turn};

use crate::types::{HpState, Phase};

/// Where playback currently is within a script
///
/// Only the playback machine writes to this struct. Everything the UI shows
/// is derived from it together with the script.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlaybackState {
    /// Wild encounter or gym battle
    pub kind: BattleKind,

    pub phase: Phase,

    /// Cursor into `script.matchups`
    pub matchup_index: usize,

    /// Cursor into the current matchup's turns
    pub turn_index: usize,

    /// HP shown for the current matchup (None until a matchup is loaded)
    pub hp: Option<HpState>,
}

impl PlaybackState {
    /// Create an idle state for a kind of battle
    pub fn new(kind: BattleKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Drop cursors and HP, keeping the battle kind
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Get the matchup under the cursor
    pub fn current_matchup<'a>(&self, script: &'a BattleScript) -> Option<&'a Matchup> {
        script.matchup(self.matchup_index)
    }

    /// Get the turn under the cursor
    pub fn current_turn<'a>(&self, script: &'a BattleScript) -> Option<&'a Turn> {
        self.current_matchup(script)?.turns.get(self.turn_index)
    }

    /// Get the matchup after the current one
    pub fn next_matchup<'a>(&self, script: &'a BattleScript) -> Option<&'a Matchup> {
        script.matchup(self.matchup_index + 1)
    }

    /// Whether the turn under the cursor is the last of its matchup
    pub fn is_last_turn(&self, script: &BattleScript) -> bool {
        self.current_matchup(script)
            .is_some_and(|m| self.turn_index + 1 >= m.turns.len())
    }

    /// Whether the matchup under the cursor is the last of the script
    pub fn is_last_matchup(&self, script: &BattleScript) -> bool {
        self.matchup_index + 1 >= script.matchups.len()
    }
}
