//! Shared screen buffer
//!
//! The terminal runner draws into a [`Screen`] through [`SharedScreen`];
//! the LCD task copies it to the glass whenever it changes.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use doorlock_core::traits::{Display, DisplayError};
use doorlock_core::ui::Screen;

/// Screen contents as the runner last drew them
pub static SCREEN: Mutex<CriticalSectionRawMutex, RefCell<Screen>> =
    Mutex::new(RefCell::new(Screen::new()));

/// Signal to trigger LCD refresh
pub static SCREEN_REFRESH: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// [`Display`] handle onto the shared screen
pub struct SharedScreen;

impl SharedScreen {
    fn update(
        &mut self,
        f: impl FnOnce(&mut Screen) -> Result<(), DisplayError>,
    ) -> Result<(), DisplayError> {
        let dirty = SCREEN.lock(|cell| {
            let mut screen = cell.borrow_mut();
            f(&mut screen)?;
            Ok::<bool, DisplayError>(screen.is_dirty())
        })?;
        if dirty {
            SCREEN_REFRESH.signal(());
        }
        Ok(())
    }

    /// Copy of the current contents, marking them as shown
    pub fn take_snapshot() -> Screen {
        SCREEN.lock(|cell| {
            let mut screen = cell.borrow_mut();
            screen.mark_clean();
            screen.clone()
        })
    }
}

impl Display for SharedScreen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.update(|screen| screen.clear())
    }

    fn show(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.update(|screen| screen.show(row, col, text))
    }

    fn set_cursor(&mut self, position: Option<(u8, u8)>) -> Result<(), DisplayError> {
        self.update(|screen| screen.set_cursor(position))
    }
}
