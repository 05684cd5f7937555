//! Session - one playback engine instance
//!
//! A session owns everything a battle panel needs: the clock, the host, the
//! script being replayed and the [`PlaybackState`]. It keeps at most one
//! timer outstanding and drops any fired handle that is not that timer.

use idlemon_battle::{Phase, PlaybackState, Snapshot, project};
use idlemon_protocol::{BattleKind, BattleScript};

use crate::clock::{Clock, ManualClock, TimerHandle};
use crate::config::PlaybackConfig;
use crate::host::PlaybackHost;
use crate::machine::{self, Dwell, Effect};

pub struct Session<C: Clock, H: PlaybackHost = ()> {
    config: PlaybackConfig,
    clock: C,
    host: H,
    script: Option<BattleScript>,
    state: PlaybackState,
    pending: Option<TimerHandle>,
    /// Intro finished before the script arrived
    intro_elapsed: bool,
}

impl<C: Clock> Session<C> {
    /// Wild encounter session with no host
    pub fn wild(clock: C) -> Self {
        Self::new(PlaybackConfig::wild(), clock, ())
    }

    /// Gym battle session with no host
    pub fn gym(clock: C) -> Self {
        Self::new(PlaybackConfig::gym(), clock, ())
    }
}

impl<C: Clock, H: PlaybackHost> Session<C, H> {
    pub fn new(config: PlaybackConfig, clock: C, host: H) -> Self {
        Self {
            state: PlaybackState::new(config.kind),
            config,
            clock,
            host,
            script: None,
            pending: None,
            intro_elapsed: false,
        }
    }

    /// Begin replaying a script
    ///
    /// Anything already playing is reset first. A script that fails
    /// validation skips straight to its declared result.
    pub fn start(&mut self, script: BattleScript) {
        if !self.state.is_idle() {
            self.reset();
        }

        let first = self.accept(script);
        self.run_from(first);
    }

    /// Enter the intro before the script is known
    ///
    /// Used for gym challenges, where the authority answers after the
    /// challenge banner is already showing. The session holds at the end of
    /// the intro until [`deliver`](Self::deliver) is called.
    ///
    /// Only gym sessions can challenge. Returns `false` and changes nothing
    /// for any other kind.
    pub fn challenge(&mut self) -> bool {
        if self.config.kind != BattleKind::Gym {
            tracing::debug!(kind = self.config.kind.as_str(), "Challenge ignored");
            return false;
        }

        if !self.state.is_idle() {
            self.reset();
        }

        tracing::info!(kind = self.config.kind.as_str(), "Challenge issued");
        self.run_from(Phase::Intro);
        true
    }

    /// Hand over a script from the authority
    ///
    /// Completes a pending challenge, or starts a new battle otherwise.
    pub fn deliver(&mut self, script: BattleScript) {
        if !self.awaiting_script() {
            self.start(script);
            return;
        }

        match self.accept(script) {
            Phase::Result => self.run_from(Phase::Result),
            _ if self.intro_elapsed => {
                self.intro_elapsed = false;
                self.run_from(Phase::Battling);
            }
            // The intro timer is still running and will pick the script up
            _ => {}
        }
    }

    /// Stop playback and return to idle
    pub fn cancel(&mut self) {
        if self.state.is_idle() {
            return;
        }
        self.reset();
    }

    /// Throw a ball during the battling phase of a wild encounter
    ///
    /// Returns `false` and changes nothing when a catch is not possible
    /// right now.
    pub fn trigger_catch_attempt(&mut self) -> bool {
        let allowed = self
            .script
            .as_ref()
            .is_some_and(|script| machine::can_catch(&self.state, script, &self.config));

        if !allowed {
            tracing::debug!(phase = %self.state.phase, "Catch trigger ignored");
            return false;
        }

        tracing::info!("Catch attempt triggered");
        self.run_from(Phase::CatchThrow);
        true
    }

    /// Process a fired timer
    ///
    /// Only the current pending handle advances the machine.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.pending != Some(handle) {
            tracing::debug!(
                handle = handle.id(),
                pending = ?self.pending.map(|h| h.id()),
                "Ignoring stale timer"
            );
            return;
        }

        self.pending = None;
        self.advance();
    }

    /// Project the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        project(&self.state, self.script.as_ref())
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn script(&self) -> Option<&BattleScript> {
        self.script.as_ref()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_playing(&self) -> bool {
        !self.state.is_idle()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn awaiting_script(&self) -> bool {
        self.state.phase == Phase::Intro && self.script.is_none()
    }

    /// Store a script and pick the phase playback starts from
    fn accept(&mut self, script: BattleScript) -> Phase {
        let first = match script.validate() {
            Ok(()) => {
                tracing::info!(
                    kind = self.config.kind.as_str(),
                    matchups = script.matchups.len(),
                    turns = script.total_turns(),
                    result = ?script.final_result,
                    "Starting battle playback"
                );
                Phase::Intro
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    result = ?script.final_result,
                    "Malformed battle script, skipping to result"
                );
                Phase::Result
            }
        };

        self.script = Some(script);
        first
    }

    fn advance(&mut self) {
        let Some(script) = self.script.as_ref() else {
            self.hold_intro();
            return;
        };

        let next = machine::next_phase(&mut self.state, script);
        self.run_from(next);
    }

    /// Enter `phase` and keep going through every zero-length dwell
    fn run_from(&mut self, mut phase: Phase) {
        self.cancel_pending();

        loop {
            let effect = machine::enter(&mut self.state, phase, self.script.as_ref());
            tracing::debug!(
                phase = %phase,
                matchup = self.state.matchup_index,
                turn = self.state.turn_index,
                "Entered phase"
            );

            if phase == Phase::Idle {
                self.script = None;
                self.intro_elapsed = false;
                tracing::info!("Battle playback finished");
            }

            if let Some(effect) = effect {
                self.apply_effect(effect);
            }
            self.publish();

            match machine::dwell(&self.state, self.script.as_ref(), &self.config) {
                Dwell::Hold => return,
                Dwell::Timed(delay) => {
                    self.pending = Some(self.clock.schedule(delay));
                    return;
                }
                Dwell::Immediate => match self.script.as_ref() {
                    Some(script) => phase = machine::next_phase(&mut self.state, script),
                    None => {
                        self.hold_intro();
                        return;
                    }
                },
            }
        }
    }

    fn hold_intro(&mut self) {
        tracing::debug!("Intro finished, waiting for battle script");
        self.intro_elapsed = true;
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.clock.cancel(handle);
        }
    }

    fn reset(&mut self) {
        self.clock.cancel_all();
        self.pending = None;
        self.script = None;
        self.intro_elapsed = false;
        self.state.reset();

        tracing::info!(kind = self.config.kind.as_str(), "Playback reset");
        self.publish();
    }

    fn apply_effect(&mut self, effect: Effect) {
        let Some(script) = self.script.as_ref() else {
            return;
        };

        match effect {
            Effect::PersistRewards => {
                if let Some(rewards) = script.visible_rewards() {
                    tracing::info!(xp = rewards.xp, money = rewards.money, "Rewards earned");
                    self.host.persist_rewards(rewards);
                }
            }
            Effect::RecordCatch => {
                if let Some(attempt) = script.catch_attempt.as_ref() {
                    let target = script.catch_target();
                    tracing::info!(
                        pokemon = target.map(|p| p.name.as_str()),
                        "Pokemon caught"
                    );
                    self.host.record_catch(attempt, target);
                }
            }
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.host.on_snapshot(&snapshot);
    }
}

impl<H: PlaybackHost> Session<ManualClock, H> {
    /// Fire the earliest pending timer, returning whether one existed
    pub fn fire_next(&mut self) -> bool {
        match self.clock.fire_next() {
            Some(handle) => {
                self.on_timer(handle);
                true
            }
            None => false,
        }
    }

    /// Fire timers until the session is idle, returning how many fired
    pub fn run_to_idle(&mut self) -> usize {
        let mut fired = 0;
        while self.is_playing() && self.fire_next() {
            fired += 1;
        }
        fired
    }

    /// Move virtual time forward, firing every timer that comes due
    ///
    /// Timers scheduled while advancing also fire if they fall inside the
    /// window.
    pub fn advance_by(&mut self, millis: u64) -> usize {
        let target = self.clock.now().saturating_add(millis);
        let mut fired = 0;

        while self.clock.next_deadline().is_some_and(|d| d <= target) {
            if self.fire_next() {
                fired += 1;
            }
        }

        let rest = target.saturating_sub(self.clock.now());
        self.clock.advance(rest);
        fired
    }
}
