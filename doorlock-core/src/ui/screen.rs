//! Screen buffer
//!
//! Character buffer matching the 16x2 LCD. Writes are positional like the
//! LCD itself, and a dirty flag tells the refresh task when to flush.

use crate::traits::{Display, DisplayError};

/// Number of character rows
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns
pub const SCREEN_COLS: usize = 16;

const BLANK: u8 = b' ';

/// Screen buffer for the terminal LCD
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    /// Character cells, ASCII only
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// Entry cursor position, if shown
    cursor: Option<(u8, u8)>,
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new blank screen
    pub const fn new() -> Self {
        Self {
            cells: [[BLANK; SCREEN_COLS]; SCREEN_ROWS],
            cursor: None,
            dirty: true,
        }
    }

    /// Write text at a position, clipping at the end of the row
    ///
    /// Non-ASCII characters are drawn as `?`.
    pub fn write(&mut self, row: usize, col: usize, text: &str) -> Result<(), DisplayError> {
        let line = self
            .cells
            .get_mut(row)
            .ok_or(DisplayError::InvalidCoordinates)?;
        if col >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        for (cell, ch) in line[col..].iter_mut().zip(text.chars()) {
            *cell = if ch.is_ascii() { ch as u8 } else { b'?' };
        }
        self.dirty = true;
        Ok(())
    }

    /// Get the content of a row, trailing blanks included
    pub fn line(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
    }

    /// Get all rows
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..SCREEN_ROWS).filter_map(|row| self.line(row))
    }

    /// Entry cursor position
    pub fn cursor(&self) -> Option<(u8, u8)> {
        self.cursor
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Copy this buffer onto a physical display
    pub fn flush_to<D: Display>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        display.clear()?;
        for row in 0..SCREEN_ROWS {
            if let Some(text) = self.line(row) {
                display.show(row as u8, 0, text.trim_end())?;
            }
        }
        display.set_cursor(self.cursor)?;
        self.dirty = false;
        Ok(())
    }
}

impl Display for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[BLANK; SCREEN_COLS]; SCREEN_ROWS];
        self.dirty = true;
        Ok(())
    }

    fn show(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.write(row as usize, col as usize, text)
    }

    fn set_cursor(&mut self, position: Option<(u8, u8)>) -> Result<(), DisplayError> {
        if let Some((row, col)) = position {
            if row as usize >= SCREEN_ROWS || col as usize > SCREEN_COLS {
                return Err(DisplayError::InvalidCoordinates);
            }
        }
        if self.cursor != position {
            self.cursor = position;
            self.dirty = true;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.lines()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line);
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DisplayExt;

    #[test]
    fn test_new_screen_is_blank() {
        let screen = Screen::new();
        assert_eq!(screen.line(0), Some("                "));
        assert!(screen.is_dirty());
        assert_eq!(screen.cursor(), None);
    }

    #[test]
    fn test_positional_write() {
        let mut screen = Screen::new();
        screen.show(1, 7, "Must Be 5").unwrap();
        assert_eq!(screen.line(1), Some("       Must Be 5"));
    }

    #[test]
    fn test_write_clips_at_row_end() {
        let mut screen = Screen::new();
        screen.show(0, 12, "abcdefgh").unwrap();
        assert_eq!(screen.line(0), Some("            abcd"));
    }

    #[test]
    fn test_invalid_coordinates() {
        let mut screen = Screen::new();
        assert_eq!(screen.show(2, 0, "x"), Err(DisplayError::InvalidCoordinates));
        assert_eq!(screen.show(0, 16, "x"), Err(DisplayError::InvalidCoordinates));
        assert_eq!(
            screen.set_cursor(Some((5, 0))),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_show_lines_replaces_content() {
        let mut screen = Screen::new();
        screen.show(1, 0, "*****").unwrap();
        screen.show_lines("  Door Opened", None).unwrap();
        assert_eq!(screen.line(0).map(str::trim_end), Some("  Door Opened"));
        assert_eq!(screen.line(1).map(str::trim_end), Some(""));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_cursor(None).unwrap();
        assert!(!screen.is_dirty());
        screen.set_cursor(Some((1, 0))).unwrap();
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_flush_copies_to_display() {
        let mut source = Screen::new();
        source.show(0, 0, "Enter Password: ").unwrap();
        source.set_cursor(Some((1, 2))).unwrap();

        let mut target = Screen::new();
        source.flush_to(&mut target).unwrap();
        assert!(!source.is_dirty());
        assert_eq!(target.line(0), source.line(0));
        assert_eq!(target.cursor(), Some((1, 2)));
    }
}
