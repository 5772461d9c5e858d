//! User commands applied to the session
//!
//! Every command is valid in every state; commands that do not apply to
//! the current state are silent no-ops.

/// User-triggered session operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionCommand {
    /// Toggle between running and paused (starts a fresh session from idle)
    StartStop,
    /// Abort and return to idle with default timers
    Reset,
    /// End the hold phase (only meaningful while holding)
    FinishHolding,
    /// Add 5 breaths per round
    IncreaseBreaths,
    /// Remove 5 breaths per round
    DecreaseBreaths,
    /// Lengthen the breath cycle by 0.5 s
    IncreaseLength,
    /// Shorten the breath cycle by 0.5 s
    DecreaseLength,
}

impl SessionCommand {
    /// Check if this command adjusts configuration
    ///
    /// Adjusters are rejected while the session is active.
    pub fn is_adjuster(&self) -> bool {
        matches!(
            self,
            SessionCommand::IncreaseBreaths
                | SessionCommand::DecreaseBreaths
                | SessionCommand::IncreaseLength
                | SessionCommand::DecreaseLength
        )
    }
}
