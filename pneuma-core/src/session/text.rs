//! Display text derivation
//!
//! Pure functions from a session snapshot to the two text lines the
//! watch face shows. Strings are derived every frame and never stored
//! in the session.

use core::fmt::Write;

use heapless::String;

use super::engine::SessionSnapshot;
use super::phase::Phase;

/// Maximum phase line length (matches the screen width)
pub const PHASE_LINE_LEN: usize = 20;

/// Maximum timer line length
pub const TIMER_LINE_LEN: usize = 8;

/// Phase line, e.g. `Round 2/3: Breathing`
pub fn phase_line(snap: &SessionSnapshot) -> String<PHASE_LINE_LEN> {
    let mut line = String::new();

    if snap.phase == Phase::Idle {
        let _ = line.push_str("Ready to start");
        return line;
    }

    let name = match snap.phase {
        Phase::Starting => "Starting",
        Phase::Breathing => "Breathing",
        Phase::Holding => "Holding",
        Phase::PreRecovery => "Inhale",
        Phase::Recovery => "Recovery",
        Phase::Idle => "",
    };
    let _ = write!(line, "Round {}/3: {}", snap.round, name);

    line
}

/// Timer line: countdown, breath ordinal, hold seconds, or recovery seconds
pub fn timer_line(snap: &SessionSnapshot) -> String<TIMER_LINE_LEN> {
    let mut line = String::new();

    match snap.phase {
        Phase::Idle => {}
        Phase::Starting => {
            let _ = write!(line, "{}", secs_ceil(snap.countdown_ms));
        }
        Phase::Breathing => {
            let _ = write!(line, "{}/{}", snap.breath_number, snap.total_breaths);
        }
        Phase::Holding => {
            let _ = write!(line, "{}s", snap.hold_ms / 1_000);
        }
        Phase::PreRecovery => {
            let _ = line.push_str("Inhale");
        }
        Phase::Recovery => {
            let _ = write!(line, "{}s", secs_ceil(snap.recovery_ms));
        }
    }

    line
}

/// Milliseconds to whole seconds, rounding up
fn secs_ceil(ms: u32) -> u32 {
    ms.div_ceil(1_000)
}
