//! Haptic output trait

use crate::session::HapticCue;

/// Trait for haptic cue playback
///
/// Playback is fire-and-forget: the session never waits for a cue to
/// finish, and a failing motor must not stall the tick path. Queueing
/// and pattern shaping belong to the implementation.
pub trait HapticSink {
    /// Play a cue
    fn play(&mut self, cue: HapticCue);
}

/// Sink that drops every cue (haptics disabled or not fitted)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHaptics;

impl HapticSink for NullHaptics {
    fn play(&mut self, _cue: HapticCue) {}
}
