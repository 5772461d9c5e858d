//! Tick task for time-based updates
//!
//! Provides the fixed 50 ms ticks that drive the breath session. Each
//! firing is stamped with the tick-gate generation it was scheduled
//! under, so the controller can reject firings that were in flight when
//! the session stopped.

use core::sync::atomic::{AtomicU32, Ordering};

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

use pneuma_core::config::TICK_INTERVAL_MS;

/// A tick firing with its gate stamp
#[derive(Debug, Clone, Copy)]
pub struct TickStamp {
    /// Milliseconds since the tick task started
    pub now_ms: u32,
    /// Gate generation this firing was scheduled under
    pub generation: u32,
}

/// Signal to notify controller of tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, TickStamp> = Signal::new();

/// Gate generation published by the controller
pub static GATE_GENERATION: AtomicU32 = AtomicU32::new(0);

/// Tick task - sends periodic tick signals with timestamp and stamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        let generation = GATE_GENERATION.load(Ordering::Relaxed);

        TICK_SIGNAL.signal(TickStamp { now_ms, generation });
    }
}
