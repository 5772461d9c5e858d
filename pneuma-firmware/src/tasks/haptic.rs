//! Haptic playback task
//!
//! Drains the cue queue and plays each cue's vibration pattern on the
//! motor GPIO. Playback is serialized; the session never waits on it.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use pneuma_drivers::haptic::cue_timings;

use crate::channels::CUE_CHANNEL;

/// Haptic task - plays queued cues on the vibration motor
#[embassy_executor::task]
pub async fn haptic_task(mut motor: Output<'static>) {
    info!("Haptic task started");

    motor.set_low();

    loop {
        let cue = CUE_CHANNEL.receive().await;
        trace!("Playing cue {:?}", cue);

        // Timings alternate motor-on / motor-off, starting with on
        for (i, duration_ms) in cue_timings(cue).iter().enumerate() {
            if i % 2 == 0 {
                motor.set_high();
            } else {
                motor.set_low();
            }
            Timer::after_millis(*duration_ms as u64).await;
        }
        motor.set_low();
    }
}
