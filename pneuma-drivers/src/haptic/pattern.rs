//! Vibration patterns for session cues
//!
//! Each pattern is a list of millisecond timings: motor-on first, then
//! alternating off/on. The motor always ends up off after a pattern.

use pneuma_core::session::HapticCue;

/// Pulse timings for a cue (on, off, on, ...)
pub fn cue_timings(cue: HapticCue) -> &'static [u32] {
    match cue {
        // Two firm pulses: breathing or recovery begins
        HapticCue::Start => &[80, 60, 80],
        // Single light tap
        HapticCue::Click => &[20],
        // Rising triple: all breaths done, hold begins
        HapticCue::Success => &[30, 40, 50, 40, 110],
        // Gentle double tap
        HapticCue::Notification => &[60, 80, 60],
        // Long fade-out: session complete
        HapticCue::Stop => &[140, 60, 60, 60, 30],
        // Sharp single tap for the recovery crescendo
        HapticCue::Retry => &[45],
    }
}

/// Total playback time of a cue's pattern in milliseconds
pub fn cue_duration_ms(cue: HapticCue) -> u32 {
    cue_timings(cue).iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_a_pattern() {
        for cue in HapticCue::ALL {
            let timings = cue_timings(cue);
            assert!(!timings.is_empty());
            // Patterns start and end with the motor on
            assert_eq!(timings.len() % 2, 1);
            assert!(timings.iter().all(|t| *t > 0));
        }
    }

    #[test]
    fn test_durations() {
        assert_eq!(cue_duration_ms(HapticCue::Click), 20);
        assert_eq!(cue_duration_ms(HapticCue::Start), 220);
        assert_eq!(cue_duration_ms(HapticCue::Stop), 350);
    }

    #[test]
    fn test_patterns_stay_short() {
        // Playback is serialized with other cues; nothing should hog the
        // motor for longer than a breath indicator frame or two
        for cue in HapticCue::ALL {
            assert!(cue_duration_ms(cue) <= 400);
        }
    }
}
