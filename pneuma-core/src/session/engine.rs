//! Breath session engine
//!
//! Tracks the active session: phase, round, half-breath progress, hold
//! and recovery timers. Driven by a fixed-cadence tick (`advance`) and
//! emits haptic cues for the transitions that occur. At most one phase
//! transition happens per tick; half-breath overshoot is discarded
//! rather than carried into the next half-breath.

use heapless::Vec;

use crate::config::{
    SessionConfig, COUNTDOWN_MS, HOLD_MILESTONE_MS, RECOVERY_MS, TOTAL_ROUNDS,
};

use super::cues::HapticCue;
use super::command::SessionCommand;
use super::phase::Phase;

/// Upper bound on cues a single tick can emit
pub const MAX_CUES_PER_TICK: usize = 4;

/// Cues emitted by one tick, in emission order
pub type Cues = Vec<HapticCue, MAX_CUES_PER_TICK>;

/// Minimum breath indicator scale (per-mille)
///
/// Never zero, so the rendered indicator stays visible.
pub const MIN_SCALE_X1000: u16 = 10;

/// Maximum breath indicator scale (per-mille)
pub const MAX_SCALE_X1000: u16 = 1_000;

/// Recovery crescendo: click window upper bound (ms remaining)
const CRESCENDO_CLICK_MS: u32 = 2_000;

/// Recovery crescendo: retry window upper bound (ms remaining)
const CRESCENDO_RETRY_MS: u32 = 1_000;

/// Click cadence within the click window (ms)
const CRESCENDO_CLICK_PERIOD_MS: u32 = 500;

/// Retry cadence within the retry window (ms)
const CRESCENDO_RETRY_PERIOD_MS: u32 = 250;

/// Published per-tick view of the session
///
/// A snapshot is a single atomically-observed value; renderers read
/// snapshots, never the live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    /// Current phase
    pub phase: Phase,
    /// Round number, 1-based
    pub round: u8,
    /// Configured breaths per round
    pub total_breaths: u8,
    /// Configured full cycle duration, ms
    pub breath_length_ms: u32,
    /// 1-based ordinal of the breath in progress
    pub breath_number: u8,
    /// Fraction of the current half-breath completed, per-mille
    pub progress_x1000: u16,
    /// Current half-breath direction
    pub is_inhale: bool,
    /// Whether the tick loop is running
    pub is_active: bool,
    /// Remaining countdown (Starting / PreRecovery), ms
    pub countdown_ms: u32,
    /// Elapsed hold time, ms
    pub hold_ms: u32,
    /// Remaining recovery time, ms
    pub recovery_ms: u32,
    /// Breath indicator scale, per-mille in [10, 1000]
    pub scale_x1000: u16,
    /// Smoothed heart rate in 0.1 bpm units, if a sensor is fitted
    ///
    /// Cosmetic only - never feeds back into session timing.
    pub bpm_x10: Option<u16>,
}

/// The breath session state machine
///
/// One instance lives for the whole device uptime. It is single-writer:
/// commands and ticks must come from the same execution context.
#[derive(Debug, Clone)]
pub struct BreathSession {
    phase: Phase,
    round: u8,
    config: SessionConfig,
    /// Half-breaths completed this round
    breath_count: u16,
    /// Elapsed time in the current half-breath, ms
    breath_timer_ms: u32,
    is_inhale: bool,
    hold_ms: u32,
    /// Time since the last hold milestone cue, ms
    hold_cue_ms: u32,
    recovery_ms: u32,
    countdown_ms: u32,
    scale_x1000: u16,
    is_active: bool,
    bpm_x10: Option<u16>,
}

impl Default for BreathSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathSession {
    /// Create an idle session with default configuration
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create an idle session with the given configuration
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            phase: Phase::Idle,
            round: 1,
            config,
            breath_count: 0,
            breath_timer_ms: 0,
            is_inhale: true,
            hold_ms: 0,
            hold_cue_ms: 0,
            recovery_ms: RECOVERY_MS,
            countdown_ms: COUNTDOWN_MS,
            scale_x1000: MIN_SCALE_X1000,
            is_active: false,
            bpm_x10: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round, 1-based
    pub fn round(&self) -> u8 {
        self.round
    }

    /// Whether the tick loop should be running
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Current configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 1-based ordinal of the breath in progress
    pub fn breath_number(&self) -> u8 {
        (self.breath_count / 2 + 1) as u8
    }

    /// Breath indicator scale, per-mille
    pub fn scale_x1000(&self) -> u16 {
        self.scale_x1000
    }

    /// Fraction of the current half-breath completed, per-mille
    ///
    /// Zero outside the Breathing phase.
    pub fn progress_x1000(&self) -> u16 {
        if self.phase != Phase::Breathing {
            return 0;
        }
        let half_ms = self.config.half_length_ms();
        if half_ms == 0 {
            return 1_000;
        }
        (self.breath_timer_ms * 1_000 / half_ms).min(1_000) as u16
    }

    /// Toggle between running and paused
    ///
    /// From idle this starts a fresh session. While mid-session it pauses
    /// (keeping phase and timers) or resumes. Returns the new active flag;
    /// the caller arms or disarms the tick source accordingly.
    pub fn start_stop(&mut self) -> bool {
        if !self.is_active {
            if self.phase == Phase::Idle {
                self.phase = Phase::Starting;
                self.countdown_ms = COUNTDOWN_MS;
            }
            self.is_active = true;
        } else {
            self.is_active = false;
        }
        self.is_active
    }

    /// Return to idle with all counters and timers at their defaults
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.round = 1;
        self.breath_count = 0;
        self.breath_timer_ms = 0;
        self.is_inhale = true;
        self.hold_ms = 0;
        self.hold_cue_ms = 0;
        self.recovery_ms = RECOVERY_MS;
        self.countdown_ms = COUNTDOWN_MS;
        self.scale_x1000 = MIN_SCALE_X1000;
        self.is_active = false;
    }

    /// End the hold phase
    ///
    /// No-op unless the session is holding. Returns whether it applied.
    pub fn finish_holding(&mut self) -> bool {
        if self.phase == Phase::Holding {
            self.phase = Phase::PreRecovery;
            self.countdown_ms = COUNTDOWN_MS;
            true
        } else {
            false
        }
    }

    /// Add 5 breaths per round (no-op while active)
    pub fn increase_breaths(&mut self) -> bool {
        !self.is_active && self.config.increase_breaths()
    }

    /// Remove 5 breaths per round (no-op while active)
    pub fn decrease_breaths(&mut self) -> bool {
        !self.is_active && self.config.decrease_breaths()
    }

    /// Lengthen the breath cycle by 0.5 s (no-op while active)
    pub fn increase_length(&mut self) -> bool {
        !self.is_active && self.config.increase_length()
    }

    /// Shorten the breath cycle by 0.5 s (no-op while active)
    pub fn decrease_length(&mut self) -> bool {
        !self.is_active && self.config.decrease_length()
    }

    /// Apply a user command
    ///
    /// Returns whether the command changed anything.
    pub fn apply(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::StartStop => {
                self.start_stop();
                true
            }
            SessionCommand::Reset => {
                self.reset();
                true
            }
            SessionCommand::FinishHolding => self.finish_holding(),
            SessionCommand::IncreaseBreaths => self.increase_breaths(),
            SessionCommand::DecreaseBreaths => self.decrease_breaths(),
            SessionCommand::IncreaseLength => self.increase_length(),
            SessionCommand::DecreaseLength => self.decrease_length(),
        }
    }

    /// Record the latest smoothed heart rate reading (0.1 bpm units)
    ///
    /// Display-only; has no effect on phase timing.
    pub fn set_heart_rate(&mut self, bpm_x10: Option<u16>) {
        self.bpm_x10 = bpm_x10;
    }

    /// Advance the session by one tick of `delta_ms`
    ///
    /// Returns the haptic cues emitted by this tick. A tick while paused
    /// or idle is a no-op.
    pub fn advance(&mut self, delta_ms: u32) -> Cues {
        let mut cues = Cues::new();

        if !self.is_active {
            return cues;
        }

        match self.phase {
            Phase::Idle => {}
            Phase::Starting => self.tick_starting(delta_ms, &mut cues),
            Phase::Breathing => self.tick_breathing(delta_ms, &mut cues),
            Phase::Holding => self.tick_holding(delta_ms, &mut cues),
            Phase::PreRecovery => self.tick_pre_recovery(delta_ms, &mut cues),
            Phase::Recovery => self.tick_recovery(delta_ms, &mut cues),
        }

        cues
    }

    /// Capture the published view of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            round: self.round,
            total_breaths: self.config.total_breaths,
            breath_length_ms: self.config.breath_length_ms,
            breath_number: self.breath_number(),
            progress_x1000: self.progress_x1000(),
            is_inhale: self.is_inhale,
            is_active: self.is_active,
            countdown_ms: self.countdown_ms,
            hold_ms: self.hold_ms,
            recovery_ms: self.recovery_ms,
            scale_x1000: self.scale_x1000,
            bpm_x10: self.bpm_x10,
        }
    }

    /// Tick while in Starting phase
    fn tick_starting(&mut self, delta_ms: u32, cues: &mut Cues) {
        self.countdown_ms = self.countdown_ms.saturating_sub(delta_ms);

        if self.countdown_ms == 0 {
            self.phase = Phase::Breathing;
            self.breath_count = 0;
            self.breath_timer_ms = 0;
            self.is_inhale = true;
            self.scale_x1000 = MIN_SCALE_X1000;
            let _ = cues.push(HapticCue::Start);
        }
    }

    /// Tick while in Breathing phase
    fn tick_breathing(&mut self, delta_ms: u32, cues: &mut Cues) {
        self.breath_timer_ms += delta_ms;
        let half_ms = self.config.half_length_ms();

        if self.breath_timer_ms >= half_ms {
            // Half-breath complete; overshoot is discarded
            self.breath_count += 1;
            self.is_inhale = !self.is_inhale;
            self.breath_timer_ms = 0;

            if self.breath_count >= self.config.half_breaths() {
                self.phase = Phase::Holding;
                self.hold_ms = 0;
                self.hold_cue_ms = 0;
                self.scale_x1000 = MIN_SCALE_X1000;
                let _ = cues.push(HapticCue::Success);
                return;
            }

            if self.is_inhale {
                let _ = cues.push(HapticCue::Click);
            }
        }

        self.scale_x1000 = breathing_scale(self.breath_timer_ms, half_ms, self.is_inhale);
    }

    /// Tick while in Holding phase
    fn tick_holding(&mut self, delta_ms: u32, cues: &mut Cues) {
        self.hold_ms += delta_ms;
        self.hold_cue_ms += delta_ms;

        if self.hold_cue_ms >= HOLD_MILESTONE_MS {
            self.hold_cue_ms = 0;
            let _ = cues.push(HapticCue::Notification);
        }
    }

    /// Tick while in PreRecovery phase
    fn tick_pre_recovery(&mut self, delta_ms: u32, cues: &mut Cues) {
        self.countdown_ms = self.countdown_ms.saturating_sub(delta_ms);

        // Indicator ramps from min to max over the countdown, cueing the
        // deep inhale before recovery
        let elapsed = COUNTDOWN_MS - self.countdown_ms;
        let span = (MAX_SCALE_X1000 - MIN_SCALE_X1000) as u32;
        self.scale_x1000 = MIN_SCALE_X1000 + (span * elapsed / COUNTDOWN_MS) as u16;

        if self.countdown_ms == 0 {
            self.phase = Phase::Recovery;
            self.recovery_ms = RECOVERY_MS;
            let _ = cues.push(HapticCue::Start);
        }
    }

    /// Tick while in Recovery phase
    fn tick_recovery(&mut self, delta_ms: u32, cues: &mut Cues) {
        self.recovery_ms = self.recovery_ms.saturating_sub(delta_ms);

        // Crescendo over the final seconds: clicks on 500 ms boundaries
        // within (1 s, 2 s], sharper retries on 250 ms boundaries in the
        // last second
        if self.recovery_ms > 0 {
            if self.recovery_ms <= CRESCENDO_RETRY_MS {
                if self.recovery_ms % CRESCENDO_RETRY_PERIOD_MS < delta_ms {
                    let _ = cues.push(HapticCue::Retry);
                }
            } else if self.recovery_ms <= CRESCENDO_CLICK_MS
                && self.recovery_ms % CRESCENDO_CLICK_PERIOD_MS < delta_ms
            {
                let _ = cues.push(HapticCue::Click);
            }
        }

        if self.recovery_ms == 0 {
            if self.round < TOTAL_ROUNDS {
                self.round += 1;
                self.phase = Phase::Starting;
                self.countdown_ms = COUNTDOWN_MS;
                let _ = cues.push(HapticCue::Notification);
            } else {
                // Final round done: full reset, which also stops the loop
                self.reset();
                let _ = cues.push(HapticCue::Stop);
            }
        }
    }
}

/// Breath indicator scale while breathing
///
/// Linear in half-breath progress: grows toward max on inhale, shrinks
/// toward min on exhale.
fn breathing_scale(timer_ms: u32, half_ms: u32, is_inhale: bool) -> u16 {
    let progress_x1000 = if half_ms == 0 {
        1_000
    } else {
        (timer_ms * 1_000 / half_ms).min(1_000)
    };
    let span = (MAX_SCALE_X1000 - MIN_SCALE_X1000) as u32;
    let offset = (span * progress_x1000 / 1_000) as u16;

    if is_inhale {
        MIN_SCALE_X1000 + offset
    } else {
        MAX_SCALE_X1000 - offset
    }
}
