//! Terminal screens
//!
//! Full screens clear the display first. Entry feedback (`Echo`,
//! `FiveOnly`, `MustBeFive`, `ClearEntry`) only touches the entry row.

use crate::traits::{Display, DisplayError, DisplayExt};

use super::screen::SCREEN_COLS;

/// Row used for password entry and feedback
pub const ENTRY_ROW: u8 = 1;

/// Something the terminal shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HmiView {
    /// "Enter Password: "
    Prompt,
    /// "Re-Enter Pass: "
    RePrompt,
    /// Masked echo of the digit at this position
    Echo(u8),
    /// Blank the entry row
    ClearEntry,
    /// Sixth digit rejected
    FiveOnly,
    /// Submit with fewer than five digits
    MustBeFive,
    /// Open door / change password choice
    Menu,
    /// Define rejected
    Mismatch,
    /// Check rejected
    Incorrect,
    /// Breach response running
    Breach,
    /// First door heartbeat
    DoorOpening,
    /// Second door heartbeat
    DoorOpened,
    /// Third door heartbeat
    DoorClosing,
}

impl HmiView {
    /// Draw this view
    pub fn render<D: Display>(&self, display: &mut D) -> Result<(), DisplayError> {
        match self {
            HmiView::Prompt => display.show_lines("Enter Password: ", None),
            HmiView::RePrompt => display.show_lines("Re-Enter Pass: ", None),
            HmiView::Echo(position) => display.show(ENTRY_ROW, *position, "*"),
            HmiView::ClearEntry => display.clear_row(ENTRY_ROW, SCREEN_COLS as u8),
            HmiView::FiveOnly => display.show(ENTRY_ROW, 8, "5 Only"),
            HmiView::MustBeFive => display.show(ENTRY_ROW, 7, "Must Be 5"),
            HmiView::Menu => display.show_lines("+ : Open Door", Some("- : Change Pass")),
            HmiView::Mismatch => display.show_lines("  PASSWORDS DO", Some("   NOT MATCH")),
            HmiView::Incorrect => display.show_lines("   PASSWORD", Some("   INCORRECT")),
            HmiView::Breach => display.show_lines("      ERROR", None),
            HmiView::DoorOpening => display.show_lines("  Opening Door", None),
            HmiView::DoorOpened => display.show_lines("  Door Opened", None),
            HmiView::DoorClosing => display.show_lines("  Closing Door", None),
        }
    }

    /// View shown for the n-th door heartbeat (0-based)
    ///
    /// The last heartbeat brings back the entry prompt.
    pub fn for_heartbeat(index: u8) -> Self {
        match index {
            0 => HmiView::DoorOpening,
            1 => HmiView::DoorOpened,
            2 => HmiView::DoorClosing,
            _ => HmiView::Prompt,
        }
    }
}
