//! GPIO vibration motor driver
//!
//! Drives a coin vibration motor through a transistor on a single GPIO.
//! Playback is blocking for the duration of the pattern (at most a few
//! hundred milliseconds); callers that must not block should run the
//! driver on its own task and feed it through a queue.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use pneuma_core::session::HapticCue;
use pneuma_core::traits::HapticSink;

use super::pattern::cue_timings;

/// Vibration motor on a GPIO with a delay provider
pub struct GpioHaptic<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> GpioHaptic<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a driver; the motor is switched off
    pub fn new(mut pin: P, delay: D) -> Self {
        let _ = pin.set_low();
        Self { pin, delay }
    }

    /// Play a raw on/off timing pattern
    ///
    /// Timings alternate motor-on / motor-off, starting with on. The
    /// motor is forced off afterwards regardless of pattern shape.
    pub fn play_pattern(&mut self, timings: &[u32]) -> Result<(), P::Error> {
        for (i, duration_ms) in timings.iter().enumerate() {
            if i % 2 == 0 {
                self.pin.set_high()?;
            } else {
                self.pin.set_low()?;
            }
            self.delay.delay_ms(*duration_ms);
        }
        self.pin.set_low()
    }

    /// Release the pin and delay provider
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> HapticSink for GpioHaptic<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn play(&mut self, cue: HapticCue) {
        // Fire-and-forget: a failing pin must not propagate into the
        // session tick path
        let _ = self.play_pattern(cue_timings(cue));
    }
}
