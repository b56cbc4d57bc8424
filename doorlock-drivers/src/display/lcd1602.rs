//! HD44780 16x2 character LCD on a PCF8574 I2C backpack
//!
//! The backpack's expander drives the LCD in 4-bit mode:
//!
//! | PCF8574 | P7-P4  | P3        | P2 | P1 | P0 |
//! |---------|--------|-----------|----|----|----|
//! | LCD     | D7-D4  | backlight | E  | RW | RS |
//!
//! Each byte goes out as two nibbles, each latched by an E pulse, so one
//! LCD byte is a single four-byte I2C write.
//!
//! The driver mirrors a [`Screen`] buffer: [`Lcd1602::render`] rewrites
//! only rows that changed since the last render, then places the cursor.

use doorlock_core::traits::DisplayError;
use doorlock_core::ui::{Screen, SCREEN_COLS, SCREEN_ROWS};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Default 7-bit address of PCF8574 backpacks (0x3F on PCF8574A)
pub const LCD_ADDR: u8 = 0x27;

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Expander bits
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// DDRAM address of column 0 on each row
const ROW_OFFSETS: [u8; SCREEN_ROWS] = [0x00, 0x40];

/// Execution time of ordinary instructions (us)
const EXEC_US: u32 = 50;
/// Execution time of clear/home (us)
const CLEAR_US: u32 = 2000;

/// HD44780 LCD driver
pub struct Lcd1602<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    backlight: bool,
    /// What the glass currently shows, `None` until first render
    shown: Option<[[u8; SCREEN_COLS]; SCREEN_ROWS]>,
    cursor_visible: bool,
}

impl<I, D> Lcd1602<I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create a new driver at the default backpack address
    pub fn new(i2c: I, delay: D) -> Self {
        Self::with_address(i2c, delay, LCD_ADDR)
    }

    /// Create a new driver at a specific address
    pub fn with_address(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
            shown: None,
            cursor_visible: false,
        }
    }

    /// Run the 4-bit initialization sequence
    ///
    /// Leaves the display on, cursor hidden, cleared.
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on time
        self.delay.delay_ms(50).await;

        // Three times 8-bit mode, then switch to 4-bit
        self.write_nibble(0x30, 0).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x30, 0).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x30, 0).await?;
        self.delay.delay_us(150).await;
        self.write_nibble(0x20, 0).await?;
        self.delay.delay_us(EXEC_US).await;

        self.command(cmd::FUNCTION_4BIT_2LINE).await?;
        self.cursor_visible = false;
        self.command(self.display_control()).await?;
        self.clear().await?;
        self.command(cmd::ENTRY_MODE_INCREMENT).await
    }

    /// Clear the display and forget what was shown
    pub async fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR).await?;
        self.delay.delay_us(CLEAR_US).await;
        self.shown = Some([[b' '; SCREEN_COLS]; SCREEN_ROWS]);
        Ok(())
    }

    /// Move the DDRAM address to a row and column
    pub async fn set_position(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        let offset = ROW_OFFSETS
            .get(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        if col as usize > SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.command(cmd::SET_DDRAM_ADDR | (offset + col)).await
    }

    /// Write text at a position; non-ASCII characters become `?`
    pub async fn write_str(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_position(row, col).await?;
        let room = SCREEN_COLS.saturating_sub(col as usize);
        for ch in text.chars().take(room) {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.data(byte).await?;
        }
        // Direct writes bypass the mirror
        self.shown = None;
        Ok(())
    }

    /// Show or hide the underline cursor at the current position
    pub async fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        if self.cursor_visible == visible {
            return Ok(());
        }
        self.cursor_visible = visible;
        self.command(self.display_control()).await
    }

    /// Switch the backlight
    pub async fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander_write(&[self.flags(0)]).await
    }

    /// Bring the glass in line with a screen buffer
    ///
    /// Rows identical to the last render are skipped. The cursor is parked
    /// at the screen's cursor position and shown if `cursor_on`; with no
    /// cursor position it is hidden.
    pub async fn render(&mut self, screen: &Screen, cursor_on: bool) -> Result<(), DisplayError> {
        for row in 0..SCREEN_ROWS {
            let Some(line) = screen.line(row) else {
                continue;
            };
            let mut cells = [b' '; SCREEN_COLS];
            for (cell, byte) in cells.iter_mut().zip(line.bytes()) {
                *cell = byte;
            }

            if self.shown.map(|shown| shown[row]) == Some(cells) {
                continue;
            }

            self.set_position(row as u8, 0).await?;
            for &byte in cells.iter() {
                self.data(byte).await?;
            }
            let mut shown = self.shown.unwrap_or([[0; SCREEN_COLS]; SCREEN_ROWS]);
            shown[row] = cells;
            self.shown = Some(shown);
        }

        match screen.cursor() {
            Some((row, col)) => {
                self.set_position(row, col).await?;
                self.set_cursor_visible(cursor_on).await
            }
            None => self.set_cursor_visible(false).await,
        }
    }

    fn display_control(&self) -> u8 {
        let mut control = cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON;
        if self.cursor_visible {
            control |= cmd::CURSOR_ON;
        }
        control
    }

    fn flags(&self, rs: u8) -> u8 {
        if self.backlight {
            rs | BACKLIGHT
        } else {
            rs
        }
    }

    async fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(command, 0).await
    }

    async fn data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.send(byte, RS).await
    }

    /// Send one byte as two E-latched nibbles in a single bus write
    async fn send(&mut self, byte: u8, rs: u8) -> Result<(), DisplayError> {
        let flags = self.flags(rs);
        let high = (byte & 0xF0) | flags;
        let low = ((byte << 4) & 0xF0) | flags;
        self.expander_write(&[high | EN, high, low | EN, low]).await?;
        self.delay.delay_us(EXEC_US).await;
        Ok(())
    }

    async fn write_nibble(&mut self, nibble: u8, rs: u8) -> Result<(), DisplayError> {
        let bits = (nibble & 0xF0) | self.flags(rs);
        self.expander_write(&[bits | EN, bits]).await
    }

    async fn expander_write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(|_| DisplayError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockDelay;
    use doorlock_core::traits::Display;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every byte written to the expander
    #[derive(Clone, Default)]
    struct Backpack {
        bytes: Rc<RefCell<Vec<u8>>>,
        fail: bool,
    }

    impl Backpack {
        /// Decode latched nibbles back into (rs, byte) pairs
        ///
        /// Only meaningful after `init`, when every transfer is a full byte.
        fn transfers(&self) -> Vec<(bool, u8)> {
            let latched: Vec<u8> = self
                .bytes
                .borrow()
                .iter()
                .copied()
                .filter(|b| b & EN != 0)
                .collect();
            latched
                .chunks(2)
                .filter(|pair| pair.len() == 2)
                .map(|pair| (pair[0] & RS != 0, (pair[0] & 0xF0) | (pair[1] >> 4)))
                .collect()
        }

        fn text(&self) -> String {
            self.transfers()
                .into_iter()
                .filter(|(rs, _)| *rs)
                .map(|(_, b)| b as char)
                .collect()
        }

        fn reset(&self) {
            self.bytes.borrow_mut().clear();
        }
    }

    impl ErrorType for Backpack {
        type Error = ErrorKind;
    }

    impl I2c for Backpack {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail || address != LCD_ADDR {
                return Err(ErrorKind::Bus);
            }
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.bytes.borrow_mut().extend_from_slice(bytes);
                }
            }
            Ok(())
        }
    }

    fn lcd() -> (Lcd1602<Backpack, MockDelay>, Backpack) {
        let backpack = Backpack::default();
        let mut lcd = Lcd1602::new(backpack.clone(), MockDelay::default());
        block_on(lcd.init()).unwrap();
        backpack.reset();
        (lcd, backpack)
    }

    #[test]
    fn test_init_sequence() {
        let backpack = Backpack::default();
        let delay = MockDelay::default();
        let mut lcd = Lcd1602::new(backpack.clone(), delay.clone());
        block_on(lcd.init()).unwrap();

        let bytes = backpack.bytes.borrow().clone();
        // Four lone nibbles: 3, 3, 3, 2 with backlight
        assert_eq!(&bytes[..8], &[0x3C, 0x38, 0x3C, 0x38, 0x3C, 0x38, 0x2C, 0x28]);
        // Then function set, display on, clear, entry mode
        let commands: Vec<u8> = bytes[8..]
            .chunks(4)
            .map(|c| (c[0] & 0xF0) | (c[2] >> 4))
            .collect();
        assert_eq!(commands, vec![0x28, 0x0C, 0x01, 0x06]);
        assert_eq!(delay.log_us()[0], 50_000);
    }

    #[test]
    fn test_write_str_positions_and_clips() {
        let (mut lcd, backpack) = lcd();
        block_on(lcd.write_str(1, 12, "ABCDEFG")).unwrap();

        let transfers = backpack.transfers();
        assert_eq!(transfers[0], (false, 0x80 | 0x40 | 12));
        assert_eq!(backpack.text(), "ABCD");
    }

    #[test]
    fn test_invalid_position() {
        let (mut lcd, _) = lcd();
        assert_eq!(
            block_on(lcd.set_position(2, 0)),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_render_skips_unchanged_rows() {
        let (mut lcd, backpack) = lcd();
        let mut screen = Screen::new();
        screen.show(0, 0, "Enter Password: ").unwrap();

        block_on(lcd.render(&screen, false)).unwrap();
        // Row 1 is blank, same as after clear
        assert_eq!(backpack.text(), "Enter Password: ");

        backpack.reset();
        screen.show(1, 0, "*").unwrap();
        block_on(lcd.render(&screen, false)).unwrap();
        assert_eq!(backpack.text(), "*               ");
    }

    #[test]
    fn test_render_cursor() {
        let (mut lcd, backpack) = lcd();
        let mut screen = Screen::new();
        screen.set_cursor(Some((1, 3))).unwrap();

        block_on(lcd.render(&screen, true)).unwrap();
        let commands: Vec<u8> = backpack
            .transfers()
            .into_iter()
            .filter(|(rs, _)| !rs)
            .map(|(_, b)| b)
            .collect();
        assert_eq!(commands, vec![0x80 | 0x43, 0x0E]);

        // Blink phase off hides it without moving anything else
        backpack.reset();
        block_on(lcd.render(&screen, false)).unwrap();
        let commands: Vec<u8> = backpack.transfers().into_iter().map(|(_, b)| b).collect();
        assert_eq!(commands, vec![0x80 | 0x43, 0x0C]);
    }

    #[test]
    fn test_render_without_cursor_hides_it() {
        let (mut lcd, backpack) = lcd();
        block_on(lcd.set_cursor_visible(true)).unwrap();
        backpack.reset();

        block_on(lcd.render(&Screen::new(), true)).unwrap();
        assert_eq!(backpack.transfers(), vec![(false, 0x0C)]);
    }

    #[test]
    fn test_backlight_off() {
        let (mut lcd, backpack) = lcd();
        block_on(lcd.set_backlight(false)).unwrap();
        block_on(lcd.write_str(0, 0, "A")).unwrap();
        assert!(backpack.bytes.borrow().iter().all(|b| b & BACKLIGHT == 0));
    }

    #[test]
    fn test_bus_error() {
        let backpack = Backpack {
            fail: true,
            ..Backpack::default()
        };
        let mut lcd = Lcd1602::new(backpack, MockDelay::default());
        assert_eq!(block_on(lcd.init()), Err(DisplayError::Communication));
    }
}
