//! Button input task
//!
//! Polls the face buttons, debounces them, and distinguishes short
//! clicks from long presses on the primary button. Debounced events go
//! to the controller through the button channel.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use pneuma_core::input::ButtonEvent;

use crate::channels::BUTTON_CHANNEL;

/// Poll interval for button scanning (ms)
const POLL_MS: u32 = 10;

/// Presses at least this long are long presses
const LONG_PRESS_MS: u32 = 500;

/// Presses shorter than this are bounce and ignored
const DEBOUNCE_MS: u32 = 30;

/// Outcome of one poll of a single button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Click,
    Long,
}

/// Per-button press tracking
///
/// A long press fires while the button is still held; a click fires on
/// release. Sub-debounce presses fire nothing.
struct PressTracker {
    held_ms: u32,
    down: bool,
    fired_long: bool,
}

impl PressTracker {
    const fn new() -> Self {
        Self {
            held_ms: 0,
            down: false,
            fired_long: false,
        }
    }

    fn update(&mut self, is_down: bool, delta_ms: u32) -> Option<Press> {
        if is_down {
            if !self.down {
                self.down = true;
                self.held_ms = 0;
                self.fired_long = false;
            }
            self.held_ms = self.held_ms.saturating_add(delta_ms);

            if self.held_ms >= LONG_PRESS_MS && !self.fired_long {
                self.fired_long = true;
                return Some(Press::Long);
            }
            None
        } else if self.down {
            self.down = false;
            if !self.fired_long && self.held_ms >= DEBOUNCE_MS {
                return Some(Press::Click);
            }
            None
        } else {
            None
        }
    }
}

/// Button task - scans the four face buttons
///
/// All buttons are active low with internal pull-ups.
#[embassy_executor::task]
pub async fn button_task(
    primary: Input<'static>,
    plus: Input<'static>,
    minus: Input<'static>,
    select: Input<'static>,
) {
    info!("Button task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_MS as u64));

    let mut primary_state = PressTracker::new();
    let mut plus_state = PressTracker::new();
    let mut minus_state = PressTracker::new();
    let mut select_state = PressTracker::new();

    loop {
        ticker.next().await;

        // Every tracker advances each poll, even when another button
        // already produced an event
        let primary_press = primary_state.update(primary.is_low(), POLL_MS);
        let plus_press = plus_state.update(plus.is_low(), POLL_MS);
        let minus_press = minus_state.update(minus.is_low(), POLL_MS);
        let select_press = select_state.update(select.is_low(), POLL_MS);

        let event = match primary_press {
            Some(Press::Click) => Some(ButtonEvent::PrimaryClick),
            Some(Press::Long) => Some(ButtonEvent::PrimaryLongPress),
            None => {
                // Long presses only matter on the primary button
                if matches!(plus_press, Some(Press::Click)) {
                    Some(ButtonEvent::PlusClick)
                } else if matches!(minus_press, Some(Press::Click)) {
                    Some(ButtonEvent::MinusClick)
                } else if matches!(select_press, Some(Press::Click)) {
                    Some(ButtonEvent::SelectClick)
                } else {
                    None
                }
            }
        };

        if let Some(event) = event {
            if BUTTON_CHANNEL.try_send(event).is_err() {
                warn!("Button queue full, dropping {:?}", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_fires_on_release() {
        let mut tracker = PressTracker::new();
        assert_eq!(tracker.update(true, 10), None);
        assert_eq!(tracker.update(true, 10), None);
        assert_eq!(tracker.update(true, 10), None);
        assert_eq!(tracker.update(false, 10), Some(Press::Click));
    }

    #[test]
    fn test_bounce_ignored() {
        let mut tracker = PressTracker::new();
        assert_eq!(tracker.update(true, 10), None);
        assert_eq!(tracker.update(false, 10), None);
    }

    #[test]
    fn test_long_press_fires_while_held() {
        let mut tracker = PressTracker::new();
        for _ in 0..49 {
            assert_eq!(tracker.update(true, 10), None);
        }
        assert_eq!(tracker.update(true, 10), Some(Press::Long));
        // Release after a long press is not also a click
        assert_eq!(tracker.update(false, 10), None);
    }
}
