//! Display task
//!
//! Renders session snapshots into the watch face and flushes dirty
//! screens to the backend.

use defmt::*;

use pneuma_display::{DisplayBackend, DisplayError, Renderer, SCREEN_COLS, SCREEN_ROWS};

use crate::channels::SNAPSHOT;

/// Text backend over the RTT console
///
/// Bring-up backend: prints each drawn row to the defmt log.
// TODO: swap in the I2C OLED backend once the panel is wired
pub struct RttBackend;

impl DisplayBackend for RttBackend {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
        info!("face[{}] {}", row, text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Display task - renders snapshots to the watch face
#[embassy_executor::task]
pub async fn display_task() {
    info!("Display task started");

    let mut renderer = Renderer::new();
    let mut backend = RttBackend;

    loop {
        let snapshot = SNAPSHOT.wait().await;
        renderer.render(&snapshot);

        if renderer.screen().is_dirty() {
            if let Err(e) = renderer.screen_mut().flush_to(&mut backend) {
                warn!("Display flush failed: {:?}", e);
            }
        }
    }
}
