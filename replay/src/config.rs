//! Playback configuration
//!
//! Dwell times are UX pacing constants. Changing them never changes which
//! phases are visited, only how long each one is held.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use idlemon_protocol::BattleKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid playback config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dwell time {field} of {millis}ms exceeds the {max}ms limit")]
    DwellTooLong {
        field: &'static str,
        millis: u64,
        max: u64,
    },
}

/// Upper bound on any single dwell
pub const MAX_DWELL_MS: u64 = 60_000;

/// How long each phase holds before advancing, in milliseconds
///
/// A value of 0 advances immediately without scheduling a timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellTimes {
    pub intro_ms: u64,
    /// Window in which a catch can be triggered before turns start
    pub battling_ms: u64,
    pub attack_ms: u64,
    pub damage_ms: u64,
    pub matchup_transition_ms: u64,
    /// Extra hold for the "Go!" send-out message between matchups
    pub send_out_ms: u64,
    pub catch_throw_ms: u64,
    /// Per ball shake
    pub catch_shake_ms: u64,
    pub catch_result_ms: u64,
    pub result_ms: u64,
    pub rewards_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for DwellTimes {
    fn default() -> Self {
        Self {
            intro_ms: 1000,
            battling_ms: 1500,
            attack_ms: 600,
            damage_ms: 500,
            matchup_transition_ms: 1200,
            send_out_ms: 1000,
            catch_throw_ms: 800,
            catch_shake_ms: 600,
            catch_result_ms: 1200,
            result_ms: 1500,
            rewards_ms: 2000,
            fade_out_ms: 500,
        }
    }
}

impl DwellTimes {
    /// Every dwell set to zero, so a battle plays out in a single call
    pub fn instant() -> Self {
        Self {
            intro_ms: 0,
            battling_ms: 0,
            attack_ms: 0,
            damage_ms: 0,
            matchup_transition_ms: 0,
            send_out_ms: 0,
            catch_throw_ms: 0,
            catch_shake_ms: 0,
            catch_result_ms: 0,
            result_ms: 0,
            rewards_ms: 0,
            fade_out_ms: 0,
        }
    }

    fn fields(&self) -> [(&'static str, u64); 12] {
        [
            ("intro_ms", self.intro_ms),
            ("battling_ms", self.battling_ms),
            ("attack_ms", self.attack_ms),
            ("damage_ms", self.damage_ms),
            ("matchup_transition_ms", self.matchup_transition_ms),
            ("send_out_ms", self.send_out_ms),
            ("catch_throw_ms", self.catch_throw_ms),
            ("catch_shake_ms", self.catch_shake_ms),
            ("catch_result_ms", self.catch_result_ms),
            ("result_ms", self.result_ms),
            ("rewards_ms", self.rewards_ms),
            ("fade_out_ms", self.fade_out_ms),
        ]
    }

    /// Reject dwell times long enough to look like a hang
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.fields().into_iter().find(|(_, ms)| *ms > MAX_DWELL_MS) {
            Some((field, millis)) => Err(ConfigError::DwellTooLong {
                field,
                millis,
                max: MAX_DWELL_MS,
            }),
            None => Ok(()),
        }
    }
}

/// Convert a dwell in milliseconds to a [`Duration`]
pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn default_true() -> bool {
    true
}

/// Variant configuration for one playback engine
///
/// Wild encounters and gym battles share the same machine. They differ only
/// in whether an intro is shown, whether the catch sub-sequence is reachable,
/// and their dwell times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub kind: BattleKind,

    /// Show the intro banner before battling
    #[serde(default = "default_true")]
    pub intro: bool,

    #[serde(default)]
    pub dwell: DwellTimes,
}

impl PlaybackConfig {
    /// Wild encounter: intro, catch window, catch sub-sequence enabled
    pub fn wild() -> Self {
        Self {
            kind: BattleKind::Wild,
            intro: true,
            dwell: DwellTimes::default(),
        }
    }

    /// Gym battle: challenge intro, turns start as soon as battling begins
    pub fn gym() -> Self {
        Self {
            kind: BattleKind::Gym,
            intro: true,
            dwell: DwellTimes {
                battling_ms: 0,
                ..DwellTimes::default()
            },
        }
    }

    pub fn for_kind(kind: BattleKind) -> Self {
        match kind {
            BattleKind::Wild => Self::wild(),
            BattleKind::Gym => Self::gym(),
        }
    }

    /// Replace the dwell times, rejecting any above [`MAX_DWELL_MS`]
    pub fn with_dwell(mut self, dwell: DwellTimes) -> Result<Self, ConfigError> {
        dwell.validate()?;
        self.dwell = dwell;
        Ok(self)
    }

    pub fn without_intro(mut self) -> Self {
        self.intro = false;
        self
    }

    /// Whether the catch sub-sequence can be entered
    pub fn catch_enabled(&self) -> bool {
        self.kind == BattleKind::Wild
    }

    /// Parse a config from JSON, filling unspecified dwell times with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.dwell.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read playback config {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to load playback config {}", path.display()))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::wild()
    }
}
