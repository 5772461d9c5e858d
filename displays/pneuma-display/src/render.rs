//! Watch face renderer
//!
//! Turns session snapshots into the four text rows of the watch face:
//! phase, timer, breath indicator bar, and heart rate.

use core::fmt::Write;

use heapless::String;

use pneuma_core::session::text::{phase_line, timer_line};
use pneuma_core::session::SessionSnapshot;

use crate::screen::{Screen, LINE_LEN, SCREEN_COLS};

/// Row assignments on the panel
const ROW_PHASE: usize = 0;
const ROW_TIMER: usize = 1;
const ROW_INDICATOR: usize = 2;
const ROW_HEART_RATE: usize = 3;

/// Renderer from session snapshots to a screen buffer
///
/// The breath indicator bar is the text-mode stand-in for the breathing
/// orb: its width follows the session's indicator scale.
#[derive(Default)]
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    /// Create a renderer with an empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the rendered screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable access, for flushing to a backend
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Render a snapshot into the screen buffer
    pub fn render(&mut self, snap: &SessionSnapshot) {
        self.screen.set_line(ROW_PHASE, phase_line(snap).as_str());
        self.screen.set_line(ROW_TIMER, timer_line(snap).as_str());
        self.screen
            .set_line(ROW_INDICATOR, indicator_bar(snap.scale_x1000).as_str());
        self.screen
            .set_line(ROW_HEART_RATE, heart_rate_line(snap.bpm_x10).as_str());
    }
}

/// Breath indicator bar, e.g. `########............`
///
/// Width follows the per-mille scale; never empty, so the indicator
/// stays visible at the minimum scale.
fn indicator_bar(scale_x1000: u16) -> String<LINE_LEN> {
    let filled = (scale_x1000 as usize * SCREEN_COLS / 1_000).clamp(1, SCREEN_COLS);

    let mut bar = String::new();
    for i in 0..SCREEN_COLS {
        let _ = bar.push(if i < filled { '#' } else { '.' });
    }
    bar
}

/// Heart rate row, e.g. `HR 62` (or `HR --` with no reading)
fn heart_rate_line(bpm_x10: Option<u16>) -> String<LINE_LEN> {
    let mut line = String::new();
    match bpm_x10 {
        Some(bpm_x10) => {
            let _ = write!(line, "HR {}", bpm_x10 / 10);
        }
        None => {
            let _ = line.push_str("HR --");
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pneuma_core::session::{BreathSession, Phase};

    fn snapshot() -> SessionSnapshot {
        BreathSession::new().snapshot()
    }

    #[test]
    fn test_idle_face() {
        let mut renderer = Renderer::new();
        renderer.render(&snapshot());

        let screen = renderer.screen();
        assert_eq!(screen.get_line(ROW_PHASE), Some("Ready to start"));
        assert_eq!(screen.get_line(ROW_TIMER), Some(""));
        assert_eq!(
            screen.get_line(ROW_INDICATOR),
            Some("#...................")
        );
        assert_eq!(screen.get_line(ROW_HEART_RATE), Some("HR --"));
    }

    #[test]
    fn test_breathing_face() {
        let mut snap = snapshot();
        snap.phase = Phase::Breathing;
        snap.round = 2;
        snap.breath_number = 7;
        snap.scale_x1000 = 500;
        snap.bpm_x10 = Some(684);

        let mut renderer = Renderer::new();
        renderer.render(&snap);

        let screen = renderer.screen();
        assert_eq!(screen.get_line(ROW_PHASE), Some("Round 2/3: Breathing"));
        assert_eq!(screen.get_line(ROW_TIMER), Some("7/30"));
        assert_eq!(
            screen.get_line(ROW_INDICATOR),
            Some("##########..........")
        );
        assert_eq!(screen.get_line(ROW_HEART_RATE), Some("HR 68"));
    }

    #[test]
    fn test_indicator_bounds() {
        assert_eq!(indicator_bar(10).as_str(), "#...................");
        assert_eq!(indicator_bar(1_000).as_str(), "####################");
    }

    #[test]
    fn test_rerender_same_snapshot_stays_clean() {
        let mut renderer = Renderer::new();
        let snap = snapshot();

        renderer.render(&snap);
        renderer.screen_mut().mark_clean();

        renderer.render(&snap);
        assert!(!renderer.screen().is_dirty());
    }
}
