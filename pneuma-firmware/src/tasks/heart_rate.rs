//! Heart rate task
//!
//! Samples the PPG front-end at 20 Hz, runs beat detection and rate
//! smoothing, and publishes the smoothed value for the display. Sensor
//! faults publish None and never reach the session path.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use pneuma_drivers::sensor::pulse::{
    BeatDetector, PulseSmoother, CONTACT_FLOOR, LOCK_BEATS, MAX_BPM_X10, MIN_BPM_X10,
    SATURATION_MARGIN,
};

use crate::channels::HR_READING;

/// PPG sampling period (ms)
const SAMPLE_PERIOD_MS: u32 = 50;

/// 12-bit ADC full scale
const ADC_MAX: u16 = 4_096;

/// Heart rate task - samples the photodiode and tracks the pulse
#[embassy_executor::task]
pub async fn heart_rate_task(mut adc: Adc<'static, Async>, mut ppg_channel: Channel<'static>) {
    info!("Heart rate task started");

    let mut detector = BeatDetector::new(SAMPLE_PERIOD_MS);
    let mut smoother = PulseSmoother::new();
    let mut beats: u32 = 0;

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS as u64));

    loop {
        ticker.next().await;

        let raw = match adc.read(&mut ppg_channel).await {
            Ok(raw) => raw,
            Err(_) => {
                warn!("ADC read error");
                HR_READING.signal(None);
                continue;
            }
        };

        // Off-wrist or saturated front-end: drop the lock and report no
        // reading until contact returns
        if raw < CONTACT_FLOOR || raw >= ADC_MAX - SATURATION_MARGIN {
            if beats != 0 {
                debug!("Pulse contact lost");
            }
            beats = 0;
            detector = BeatDetector::new(SAMPLE_PERIOD_MS);
            HR_READING.signal(None);
            continue;
        }

        if let Some(interval_ms) = detector.update(raw) {
            let raw_bpm_x10 = (600_000 / interval_ms) as u16;
            if (MIN_BPM_X10..=MAX_BPM_X10).contains(&raw_bpm_x10) {
                beats += 1;
                let smoothed = smoother.update(raw_bpm_x10);
                if beats >= LOCK_BEATS {
                    trace!("HR {} (x10)", smoothed);
                    HR_READING.signal(Some(smoothed));
                }
            }
        }
    }
}
