//! 4x4 matrix keypad
//!
//! Rows are outputs idling high; columns are inputs with pull-ups. A scan
//! drives one row low at a time and looks for a column pulled low through
//! a closed key.
//!
//! ```text
//!          col0  col1  col2  col3
//! row0      7     8     9     %
//! row1      4     5     6     *
//! row2      1     2     3     -
//! row3      ON    0     =     +
//! ```
//!
//! A press is reported once: after it has been seen on two scans one
//! debounce interval apart, and only when the key is released again.

use doorlock_core::traits::{KeyCode, Keypad};
use doorlock_hal::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

/// Number of rows
pub const ROWS: usize = 4;

/// Number of columns
pub const COLS: usize = 4;

/// Key at each (row, column)
pub const KEY_MAP: [[KeyCode; COLS]; ROWS] = [
    [
        KeyCode::Digit(7),
        KeyCode::Digit(8),
        KeyCode::Digit(9),
        KeyCode::Percent,
    ],
    [
        KeyCode::Digit(4),
        KeyCode::Digit(5),
        KeyCode::Digit(6),
        KeyCode::Multiply,
    ],
    [
        KeyCode::Digit(1),
        KeyCode::Digit(2),
        KeyCode::Digit(3),
        KeyCode::Minus,
    ],
    [KeyCode::On, KeyCode::Digit(0), KeyCode::Equals, KeyCode::Plus],
];

/// Scan timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadConfig {
    /// Pause between idle scans (ms)
    pub scan_interval_ms: u32,
    /// Time a press must be stable before it counts (ms)
    pub debounce_ms: u32,
    /// Settling time after driving a row, before reading columns (us)
    pub row_settle_us: u32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: 5,
            debounce_ms: 20,
            row_settle_us: 10,
        }
    }
}

/// Matrix keypad driver
pub struct MatrixKeypad<R, C, D> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
    config: KeypadConfig,
}

impl<R, C, D> MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    /// Create a keypad driver; all rows are released
    pub fn new(rows: [R; ROWS], cols: [C; COLS], delay: D, config: KeypadConfig) -> Self {
        let mut keypad = Self {
            rows,
            cols,
            delay,
            config,
        };
        for row in keypad.rows.iter_mut() {
            row.set_high();
        }
        keypad
    }

    /// One pass over the matrix
    ///
    /// Returns the first closed key as (row, column).
    pub async fn scan(&mut self) -> Option<(usize, usize)> {
        for r in 0..ROWS {
            self.rows[r].set_low();
            self.delay.delay_us(self.config.row_settle_us).await;
            let hit = self.cols.iter().position(|col| col.is_low());
            self.rows[r].set_high();
            if let Some(c) = hit {
                return Some((r, c));
            }
        }
        None
    }

    /// Key at a matrix position
    pub fn key_at(row: usize, col: usize) -> Option<KeyCode> {
        KEY_MAP.get(row).and_then(|keys| keys.get(col)).copied()
    }

    async fn wait_release(&mut self, position: (usize, usize)) {
        loop {
            self.delay.delay_ms(self.config.scan_interval_ms).await;
            if self.scan().await != Some(position) {
                return;
            }
        }
    }
}

impl<R, C, D> Keypad for MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    async fn read_key(&mut self) -> KeyCode {
        loop {
            let Some(position) = self.scan().await else {
                self.delay.delay_ms(self.config.scan_interval_ms).await;
                continue;
            };

            self.delay.delay_ms(self.config.debounce_ms).await;
            if self.scan().await != Some(position) {
                continue;
            }

            self.wait_release(position).await;
            if let Some(key) = Self::key_at(position.0, position.1) {
                return key;
            }
        }
    }
}
