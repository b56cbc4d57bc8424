//! Character display trait
//!
//! A small text-mode display (16x2 on the terminal). Rows and columns are
//! zero-based.

/// Errors from display operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display
    Communication,
    /// Row or column off the display
    InvalidCoordinates,
}

/// Trait for character displays
pub trait Display {
    /// Clear the entire screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a position, overwriting what is there
    fn show(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Place the blinking entry cursor, or hide it with `None`
    fn set_cursor(&mut self, position: Option<(u8, u8)>) -> Result<(), DisplayError>;
}

/// Helper methods for common screen layouts
pub trait DisplayExt: Display {
    /// Clear, then draw up to two lines starting at column 0
    fn show_lines(&mut self, top: &str, bottom: Option<&str>) -> Result<(), DisplayError> {
        self.clear()?;
        self.show(0, 0, top)?;
        if let Some(bottom) = bottom {
            self.show(1, 0, bottom)?;
        }
        Ok(())
    }

    /// Blank a whole row
    fn clear_row(&mut self, row: u8, width: u8) -> Result<(), DisplayError> {
        for col in 0..width {
            self.show(row, col, " ")?;
        }
        Ok(())
    }
}

// Blanket implementation for all Display types
impl<T: Display> DisplayExt for T {}
