//! Session controller
//!
//! Coordinates the breath session, the button mapper, and the tick gate.
//! The controller task feeds it button events and tick firings; it owns
//! all mutation of the session.

use pneuma_core::gate::TickGate;
use pneuma_core::input::{ButtonEvent, InputMapper};
use pneuma_core::session::{BreathSession, Cues, SessionSnapshot};

use pneuma_core::config::TICK_INTERVAL_MS;

/// Controller state for coordinating the session
pub struct SessionController {
    /// The breath session state machine
    session: BreathSession,
    /// Button-to-command mapping
    mapper: InputMapper,
    /// Guard for the periodic tick source
    gate: TickGate,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Create a controller with an idle session
    pub fn new() -> Self {
        Self {
            session: BreathSession::new(),
            mapper: InputMapper::new(),
            gate: TickGate::new(),
        }
    }

    /// Process a debounced button event
    ///
    /// Returns whether session state changed (and a new snapshot should
    /// be published).
    pub fn handle_button(&mut self, event: ButtonEvent) -> bool {
        let Some(command) = self.mapper.map(event, self.session.phase()) else {
            return false;
        };

        let changed = self.session.apply(command);
        self.sync_gate();
        changed
    }

    /// Process a tick firing stamped with `generation`
    ///
    /// Stale or out-of-gate firings are rejected and return None.
    pub fn handle_tick(&mut self, generation: u32) -> Option<Cues> {
        if !self.gate.accepts(generation) {
            return None;
        }

        let cues = self.session.advance(TICK_INTERVAL_MS);

        // The session deactivates itself when the final round completes
        if !self.session.is_active() {
            self.gate.stop();
        }

        Some(cues)
    }

    /// Record the latest heart rate reading for the display
    pub fn set_heart_rate(&mut self, bpm_x10: Option<u16>) {
        self.session.set_heart_rate(bpm_x10);
    }

    /// Generation new tick firings must carry to be accepted
    pub fn gate_generation(&self) -> u32 {
        self.gate.generation()
    }

    /// Published view of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Arm or disarm the gate to match the session's active flag
    fn sync_gate(&mut self) {
        if self.session.is_active() {
            self.gate.start();
        } else {
            self.gate.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pneuma_core::session::Phase;

    #[test]
    fn test_button_starts_session_and_arms_gate() {
        let mut controller = SessionController::new();
        assert!(controller.handle_button(ButtonEvent::PrimaryClick));

        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Starting);
        assert!(snap.is_active);

        // Current-generation ticks are accepted
        let generation = controller.gate_generation();
        assert!(controller.handle_tick(generation).is_some());
    }

    #[test]
    fn test_stale_tick_rejected_after_pause() {
        let mut controller = SessionController::new();
        controller.handle_button(ButtonEvent::PrimaryClick);
        let generation = controller.gate_generation();

        // Pause closes the gate; a firing already in flight is dropped
        controller.handle_button(ButtonEvent::PrimaryClick);
        assert!(controller.handle_tick(generation).is_none());
    }

    #[test]
    fn test_session_completion_closes_gate() {
        let mut controller = SessionController::new();
        controller.handle_button(ButtonEvent::PrimaryLongPress);
        assert!(controller.handle_tick(controller.gate_generation()).is_none());
    }
}
