//! Session phases
//!
//! All haptic and display behavior is a function of the current phase
//! and the session timers.

/// Breath session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Never started, or all rounds completed
    #[default]
    Idle,
    /// 3 second countdown before breathing begins
    Starting,
    /// Paced inhale/exhale cycles
    Breathing,
    /// Breath retention, ended by the user
    Holding,
    /// 3 second "inhale deeply" countdown after the hold
    PreRecovery,
    /// 15 second rest before the next round (or session end)
    Recovery,
}

impl Phase {
    /// Check if this phase runs a start-style countdown
    pub fn uses_countdown(&self) -> bool {
        matches!(self, Phase::Starting | Phase::PreRecovery)
    }

    /// Check if this phase belongs to a round in progress
    pub fn in_round(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Check if the breath indicator is animated in this phase
    ///
    /// The indicator pulses with the breath cycle and ramps during the
    /// pre-recovery inhale; elsewhere it sits at its minimum.
    pub fn animates_indicator(&self) -> bool {
        matches!(self, Phase::Breathing | Phase::PreRecovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }

    #[test]
    fn test_countdown_phases() {
        assert!(Phase::Starting.uses_countdown());
        assert!(Phase::PreRecovery.uses_countdown());
        assert!(!Phase::Breathing.uses_countdown());
        assert!(!Phase::Recovery.uses_countdown());
    }

    #[test]
    fn test_in_round() {
        assert!(!Phase::Idle.in_round());
        assert!(Phase::Starting.in_round());
        assert!(Phase::Holding.in_round());
        assert!(Phase::Recovery.in_round());
    }

    #[test]
    fn test_indicator_phases() {
        assert!(Phase::Breathing.animates_indicator());
        assert!(Phase::PreRecovery.animates_indicator());
        assert!(!Phase::Holding.animates_indicator());
        assert!(!Phase::Idle.animates_indicator());
    }
}
