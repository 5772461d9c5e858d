//! Haptic cues emitted by the session
//!
//! Cues are fire-and-forget: the session appends them to the tick result
//! and never waits on playback.

/// Named haptic cues
///
/// The session describes *what* happened; the haptic driver decides how
/// each cue feels on the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HapticCue {
    /// Breathing or recovery begins
    Start,
    /// Light tap: inhale start, or mid crescendo during recovery
    Click,
    /// All breaths done, hold begins
    Success,
    /// Hold milestone (every 60 s) or next round queued
    Notification,
    /// Session complete
    Stop,
    /// Sharp tap in the final second of recovery
    Retry,
}

impl HapticCue {
    /// All cue values, for exhaustive pattern tables
    pub const ALL: [HapticCue; 6] = [
        HapticCue::Start,
        HapticCue::Click,
        HapticCue::Success,
        HapticCue::Notification,
        HapticCue::Stop,
        HapticCue::Retry,
    ];

    /// Check if this cue marks a phase boundary
    ///
    /// Crescendo and milestone cues repeat within a phase; boundary cues
    /// fire exactly once per transition.
    pub fn is_phase_boundary(&self) -> bool {
        matches!(self, HapticCue::Start | HapticCue::Success | HapticCue::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_cue() {
        assert_eq!(HapticCue::ALL.len(), 6);
        for (i, a) in HapticCue::ALL.iter().enumerate() {
            for b in HapticCue::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_phase_boundary_cues() {
        assert!(HapticCue::Start.is_phase_boundary());
        assert!(HapticCue::Success.is_phase_boundary());
        assert!(HapticCue::Stop.is_phase_boundary());
        assert!(!HapticCue::Click.is_phase_boundary());
        assert!(!HapticCue::Retry.is_phase_boundary());
    }
}
