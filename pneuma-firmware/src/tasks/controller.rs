//! Main controller task
//!
//! Receives button events and tick firings, updates the session, and
//! fans out haptic cues and display snapshots.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::{select, Either};

use crate::channels::{BUTTON_CHANNEL, CUE_CHANNEL, HR_READING, SNAPSHOT};
use crate::controller::SessionController;
use crate::tasks::tick::{GATE_GENERATION, TICK_SIGNAL};

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task() {
    info!("Controller task started");

    let mut controller = SessionController::new();

    // Publish the idle face
    SNAPSHOT.signal(controller.snapshot());

    loop {
        match select(BUTTON_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(event) => {
                debug!("Button: {:?}", event);

                let changed = controller.handle_button(event);
                GATE_GENERATION.store(controller.gate_generation(), Ordering::Relaxed);

                if changed {
                    SNAPSHOT.signal(controller.snapshot());
                }
            }

            Either::Second(stamp) => {
                // Heart rate is display-only; fold it in before publishing
                if let Some(reading) = HR_READING.try_take() {
                    controller.set_heart_rate(reading);
                }

                if let Some(cues) = controller.handle_tick(stamp.generation) {
                    for cue in cues {
                        debug!("Cue: {:?}", cue);
                        if CUE_CHANNEL.try_send(cue).is_err() {
                            warn!("Cue queue full, dropping {:?}", cue);
                        }
                    }

                    GATE_GENERATION.store(controller.gate_generation(), Ordering::Relaxed);
                    SNAPSHOT.signal(controller.snapshot());
                } else {
                    trace!("Stale tick at {}ms dropped", stamp.now_ms);
                }
            }
        }
    }
}
