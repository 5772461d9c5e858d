//! Screen buffer types
//!
//! Provides a character-based screen buffer for the watch face.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the watch panel
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the watch panel
pub const SCREEN_COLS: usize = 20;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for the text-mode watch face
///
/// Rendering writes into the buffer; a display task flushes dirty
/// screens to any `DisplayBackend` implementation.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Only marks the screen dirty when the content actually changes, so
    /// a steady watch face does not cause redraw traffic.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row >= SCREEN_ROWS {
            return;
        }

        // Truncate if too long
        let text = if text.len() > LINE_LEN {
            &text[..LINE_LEN]
        } else {
            text
        };

        if self.lines[row].as_str() == text {
            return;
        }

        self.lines[row].clear();
        let _ = self.lines[row].push_str(text);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Flush the buffer to a backend and mark the screen clean
    pub fn flush_to<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line.as_str())?;
            }
        }
        backend.flush()?;
        self.dirty = false;
        Ok(())
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        SCREEN_COLS
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_dirty() {
        let screen = Screen::new();
        assert!(screen.is_dirty());
        assert_eq!(screen.get_line(0), Some(""));
    }

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "a line that is much longer than twenty columns");
        assert_eq!(screen.get_line(0).unwrap().len(), LINE_LEN);
    }

    #[test]
    fn test_unchanged_line_stays_clean() {
        let mut screen = Screen::new();
        screen.set_line(1, "Holding");
        screen.mark_clean();

        screen.set_line(1, "Holding");
        assert!(!screen.is_dirty());

        screen.set_line(1, "Recovery");
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_line(SCREEN_ROWS, "nope");
        assert!(!screen.is_dirty());
    }

    /// Backend recording drawn rows
    #[derive(Default)]
    struct RecordingBackend {
        drawn: heapless::Vec<(u8, String<LINE_LEN>), 8>,
        flushes: usize,
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.drawn.clear();
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            let mut line = String::new();
            let _ = line.push_str(text);
            let _ = self.drawn.push((row, line));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_flush_sends_nonempty_rows_and_cleans() {
        let mut screen = Screen::new();
        screen.set_line(0, "Ready to start");
        screen.set_line(2, "#...");

        let mut backend = RecordingBackend::default();
        screen.flush_to(&mut backend).unwrap();

        assert!(!screen.is_dirty());
        assert_eq!(backend.flushes, 1);
        assert_eq!(backend.drawn.len(), 2);
        assert_eq!(backend.drawn[0].0, 0);
        assert_eq!(backend.drawn[1].0, 2);
    }
}
