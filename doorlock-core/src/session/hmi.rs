//! Terminal session
//!
//! Every input (key, reply byte, finished wait) returns a short list of
//! effects for the runner to carry out in order. `AwaitReply` and `Wait`
//! are always last: the runner performs them and feeds the outcome back
//! through `handle_reply` or `wait_elapsed`, which yields the next list.

use heapless::Vec;

use doorlock_protocol::{Password, Reply, Request, PASSWORD_LEN, REPLY_DOOR_HEARTBEAT};

use crate::config::LockConfig;
use crate::lockout::{LockoutPolicy, LockoutStatus};
use crate::state::{HmiEvent, HmiState};
use crate::traits::KeyCode;
use crate::ui::HmiView;

/// Most effects produced by a single input
pub const MAX_EFFECTS: usize = 4;

/// Effects for one input
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Timed pauses on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitKind {
    /// Mismatch / incorrect message dwell
    Message,
    /// Alarm dwell after a breach
    Breach,
    /// Debounce pause after a digit key
    KeySettle,
}

/// Something the runner must do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Draw a view
    Render(HmiView),
    /// Send a request to the control unit
    Send(Request),
    /// Read one byte and pass it to `handle_reply`
    AwaitReply,
    /// Pause, then call `wait_elapsed`
    Wait(WaitKind),
}

/// Client side of the protocol
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HmiSession {
    state: HmiState,
    password_on_record: bool,
    entry: Vec<u8, PASSWORD_LEN>,
    first_entry: Password,
    lockout: LockoutPolicy,
}

impl Default for HmiSession {
    fn default() -> Self {
        Self::new(LockoutPolicy::default())
    }
}

impl HmiSession {
    /// Create a session in the boot state
    pub fn new(lockout: LockoutPolicy) -> Self {
        Self {
            state: HmiState::Booting,
            password_on_record: false,
            entry: Vec::new(),
            first_entry: Password::BLANK,
            lockout,
        }
    }

    /// Create a session from configuration
    pub fn from_config(config: &LockConfig) -> Self {
        Self::new(LockoutPolicy::from_config(&config.lockout))
    }

    /// Show the prompt and wait for the boot byte
    pub fn start(&mut self) -> Effects {
        effects(&[Effect::Render(HmiView::Prompt), Effect::AwaitReply])
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyCode) -> Effects {
        match self.state {
            HmiState::Entering | HmiState::ReEntering => self.entry_key(key),
            HmiState::Menu => self.menu_key(key),
            _ => Effects::new(),
        }
    }

    fn entry_key(&mut self, key: KeyCode) -> Effects {
        match key {
            KeyCode::Digit(digit) => {
                let view = match self.entry.push(digit) {
                    Ok(()) => HmiView::Echo(self.entry_len() - 1),
                    Err(_) => HmiView::FiveOnly,
                };
                effects(&[Effect::Render(view), Effect::Wait(WaitKind::KeySettle)])
            }
            KeyCode::Minus => {
                self.entry.clear();
                effects(&[Effect::Render(HmiView::ClearEntry)])
            }
            KeyCode::Equals => self.submit(),
            _ => Effects::new(),
        }
    }

    fn submit(&mut self) -> Effects {
        let Ok(password) = Password::from_digits(&self.entry) else {
            return effects(&[Effect::Render(HmiView::MustBeFive)]);
        };
        self.entry.clear();

        let reentry = self.state == HmiState::ReEntering;
        self.state = self.state.transition(HmiEvent::Submit {
            on_record: self.password_on_record,
        });

        if reentry {
            let request = Request::DefinePassword {
                entry: self.first_entry,
                confirmation: password,
            };
            effects(&[Effect::Send(request), Effect::AwaitReply])
        } else if self.password_on_record {
            effects(&[
                Effect::Send(Request::CheckPassword(password)),
                Effect::AwaitReply,
            ])
        } else {
            self.first_entry = password;
            effects(&[Effect::Render(HmiView::RePrompt)])
        }
    }

    fn menu_key(&mut self, key: KeyCode) -> Effects {
        match key {
            KeyCode::Plus => {
                self.state = self.state.transition(HmiEvent::OpenDoor);
                effects(&[Effect::Send(Request::OpenDoor), Effect::AwaitReply])
            }
            KeyCode::Minus => {
                self.password_on_record = false;
                self.state = self.state.transition(HmiEvent::ChangePassword);
                effects(&[Effect::Render(HmiView::Prompt)])
            }
            _ => Effects::new(),
        }
    }

    /// Handle a byte from the control unit
    pub fn handle_reply(&mut self, byte: u8) -> Effects {
        let reply = Reply::from_byte(byte);
        match self.state {
            HmiState::Booting => {
                self.password_on_record = reply == Some(Reply::PasswordStored);
                self.state = self.state.transition(HmiEvent::BootStatus);
                Effects::new()
            }
            HmiState::AwaitingDefine => {
                self.first_entry = Password::BLANK;
                if reply == Some(Reply::PasswordDefined) {
                    self.accept()
                } else {
                    self.password_on_record = false;
                    self.state = self.state.transition(HmiEvent::Rejected);
                    effects(&[
                        Effect::Render(HmiView::Mismatch),
                        Effect::Wait(WaitKind::Message),
                    ])
                }
            }
            HmiState::AwaitingCheck => {
                if reply == Some(Reply::PasswordVerified) {
                    self.accept()
                } else {
                    self.lockout.record_failure();
                    self.state = self.state.transition(HmiEvent::Rejected);
                    effects(&[
                        Effect::Render(HmiView::Incorrect),
                        Effect::Wait(WaitKind::Message),
                    ])
                }
            }
            HmiState::DoorCycle(read) => {
                self.state = self.state.transition(HmiEvent::DoorByte);
                let mut out = Effects::new();
                if byte == REPLY_DOOR_HEARTBEAT {
                    let _ = out.push(Effect::Render(HmiView::for_heartbeat(read)));
                }
                if self.state.awaits_reply() {
                    let _ = out.push(Effect::AwaitReply);
                }
                out
            }
            _ => Effects::new(),
        }
    }

    fn accept(&mut self) -> Effects {
        self.lockout.record_success();
        self.password_on_record = true;
        self.state = self.state.transition(HmiEvent::Accepted);
        effects(&[Effect::Render(HmiView::Menu)])
    }

    /// Handle the end of a pause
    pub fn wait_elapsed(&mut self, kind: WaitKind) -> Effects {
        match (self.state, kind) {
            (HmiState::Message, WaitKind::Message) => {
                if self.lockout.status() == LockoutStatus::Breach {
                    self.state = self.state.transition(HmiEvent::BreachRaised);
                    effects(&[
                        Effect::Render(HmiView::Breach),
                        Effect::Send(Request::Breach),
                        Effect::Wait(WaitKind::Breach),
                    ])
                } else {
                    self.state = self.state.transition(HmiEvent::MessageElapsed);
                    effects(&[Effect::Render(HmiView::Prompt)])
                }
            }
            (HmiState::Breach, WaitKind::Breach) => {
                self.lockout.breach_handled();
                self.state = self.state.transition(HmiEvent::BreachElapsed);
                effects(&[Effect::Render(HmiView::Prompt)])
            }
            _ => Effects::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> HmiState {
        self.state
    }

    /// Check if the control unit is known to hold a password
    pub fn password_on_record(&self) -> bool {
        self.password_on_record
    }

    /// Consecutive failed checks
    pub fn failures(&self) -> u8 {
        self.lockout.failures()
    }

    /// Digits collected for the current entry
    pub fn digits_entered(&self) -> usize {
        self.entry.len()
    }

    /// Blinking cursor position, shown only while collecting digits
    pub fn cursor(&self) -> Option<(u8, u8)> {
        self.state
            .accepts_digits()
            .then(|| (crate::ui::view::ENTRY_ROW, self.entry_len()))
    }

    /// Entry column of the next digit
    fn entry_len(&self) -> u8 {
        // Bounded by PASSWORD_LEN
        self.entry.len() as u8
    }
}

fn effects(list: &[Effect]) -> Effects {
    // Lists are built from literals no longer than MAX_EFFECTS
    Effects::from_slice(list).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booted(on_record: bool) -> HmiSession {
        let mut session = HmiSession::default();
        session.start();
        session.handle_reply(if on_record { 0xFF } else { 0x00 });
        session
    }

    fn type_digits(session: &mut HmiSession, digits: &[u8]) {
        for &digit in digits {
            session.handle_key(KeyCode::Digit(digit));
        }
    }

    fn sent(effects: &Effects) -> Option<Request> {
        effects.iter().find_map(|effect| match effect {
            Effect::Send(request) => Some(*request),
            _ => None,
        })
    }

    #[test]
    fn test_boot_status() {
        let session = booted(true);
        assert_eq!(session.state(), HmiState::Entering);
        assert!(session.password_on_record());

        let session = booted(false);
        assert!(!session.password_on_record());
    }

    #[test]
    fn test_start_shows_prompt_then_reads() {
        let mut session = HmiSession::default();
        assert_eq!(
            session.start().as_slice(),
            &[Effect::Render(HmiView::Prompt), Effect::AwaitReply]
        );
    }

    #[test]
    fn test_digit_echo_and_settle() {
        let mut session = booted(true);
        let out = session.handle_key(KeyCode::Digit(7));
        assert_eq!(
            out.as_slice(),
            &[
                Effect::Render(HmiView::Echo(0)),
                Effect::Wait(WaitKind::KeySettle)
            ]
        );
        assert_eq!(session.cursor(), Some((1, 1)));
    }

    #[test]
    fn test_cursor_follows_each_echo() {
        let mut session = booted(true);
        for (position, digit) in [4, 0, 9, 2, 6].into_iter().enumerate() {
            let out = session.handle_key(KeyCode::Digit(digit));
            assert_eq!(out[0], Effect::Render(HmiView::Echo(position as u8)));
            assert_eq!(session.cursor(), Some((1, position as u8 + 1)));
        }

        // Rejected sixth digit leaves the cursor where it was
        session.handle_key(KeyCode::Digit(1));
        assert_eq!(session.cursor(), Some((1, 5)));
    }

    #[test]
    fn test_sixth_digit_rejected() {
        let mut session = booted(true);
        type_digits(&mut session, &[1, 2, 3, 4, 5]);
        let out = session.handle_key(KeyCode::Digit(6));
        assert_eq!(out[0], Effect::Render(HmiView::FiveOnly));
        assert_eq!(session.digits_entered(), 5);
    }

    #[test]
    fn test_short_submit_keeps_buffer() {
        let mut session = booted(true);
        type_digits(&mut session, &[1, 2, 3]);
        let out = session.handle_key(KeyCode::Equals);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::MustBeFive)]);
        assert_eq!(session.digits_entered(), 3);
        assert_eq!(session.state(), HmiState::Entering);
    }

    #[test]
    fn test_minus_clears_entry() {
        let mut session = booted(true);
        type_digits(&mut session, &[1, 2, 3]);
        let out = session.handle_key(KeyCode::Minus);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::ClearEntry)]);
        assert_eq!(session.digits_entered(), 0);
    }

    #[test]
    fn test_define_flow() {
        let mut session = booted(false);
        type_digits(&mut session, &[1, 1, 1, 1, 1]);
        let out = session.handle_key(KeyCode::Equals);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::RePrompt)]);
        assert_eq!(session.state(), HmiState::ReEntering);

        type_digits(&mut session, &[1, 1, 1, 1, 1]);
        let out = session.handle_key(KeyCode::Equals);
        let password = Password::new([1, 1, 1, 1, 1]);
        assert_eq!(
            sent(&out),
            Some(Request::DefinePassword {
                entry: password,
                confirmation: password,
            })
        );
        assert_eq!(out.last(), Some(&Effect::AwaitReply));

        let out = session.handle_reply(0x02);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::Menu)]);
        assert!(session.password_on_record());
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn test_define_rejected_forgets_password_state() {
        let mut session = booted(false);
        type_digits(&mut session, &[1, 2, 3, 4, 5]);
        session.handle_key(KeyCode::Equals);
        type_digits(&mut session, &[5, 4, 3, 2, 1]);
        session.handle_key(KeyCode::Equals);

        let out = session.handle_reply(0x00);
        assert_eq!(
            out.as_slice(),
            &[
                Effect::Render(HmiView::Mismatch),
                Effect::Wait(WaitKind::Message)
            ]
        );
        let out = session.wait_elapsed(WaitKind::Message);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::Prompt)]);
        assert_eq!(session.state(), HmiState::Entering);
        assert!(!session.password_on_record());
        // Counter only tracks checks
        assert_eq!(session.failures(), 0);
    }

    #[test]
    fn test_failed_check_counts() {
        let mut session = booted(true);
        type_digits(&mut session, &[9, 9, 9, 9, 9]);
        let out = session.handle_key(KeyCode::Equals);
        assert_eq!(
            sent(&out),
            Some(Request::CheckPassword(Password::new([9, 9, 9, 9, 9])))
        );

        let out = session.handle_reply(0x00);
        assert_eq!(out[0], Effect::Render(HmiView::Incorrect));
        assert_eq!(session.failures(), 1);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn test_third_failure_raises_breach() {
        let mut session = booted(true);
        for attempt in 1..=3 {
            type_digits(&mut session, &[9, 9, 9, 9, 9]);
            session.handle_key(KeyCode::Equals);
            session.handle_reply(0x00);
            assert_eq!(session.failures(), attempt);

            let out = session.wait_elapsed(WaitKind::Message);
            if attempt < 3 {
                assert_eq!(out.as_slice(), &[Effect::Render(HmiView::Prompt)]);
            } else {
                assert_eq!(
                    out.as_slice(),
                    &[
                        Effect::Render(HmiView::Breach),
                        Effect::Send(Request::Breach),
                        Effect::Wait(WaitKind::Breach),
                    ]
                );
            }
        }

        assert_eq!(session.state(), HmiState::Breach);
        assert!(session.handle_key(KeyCode::Digit(1)).is_empty());

        let out = session.wait_elapsed(WaitKind::Breach);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::Prompt)]);
        assert_eq!(session.failures(), 0);
        assert_eq!(session.state(), HmiState::Entering);
    }

    #[test]
    fn test_success_resets_counter() {
        let mut session = booted(true);
        type_digits(&mut session, &[9, 9, 9, 9, 9]);
        session.handle_key(KeyCode::Equals);
        session.handle_reply(0x00);
        session.wait_elapsed(WaitKind::Message);

        type_digits(&mut session, &[1, 1, 1, 1, 1]);
        session.handle_key(KeyCode::Equals);
        session.handle_reply(0x03);
        assert_eq!(session.failures(), 0);
        assert_eq!(session.state(), HmiState::Menu);
    }

    #[test]
    fn test_menu_open_door_reads_four_bytes() {
        let mut session = booted(true);
        type_digits(&mut session, &[1, 1, 1, 1, 1]);
        session.handle_key(KeyCode::Equals);
        session.handle_reply(0x03);

        // Other keys are ignored on the menu
        assert!(session.handle_key(KeyCode::Digit(3)).is_empty());

        let out = session.handle_key(KeyCode::Plus);
        assert_eq!(
            out.as_slice(),
            &[Effect::Send(Request::OpenDoor), Effect::AwaitReply]
        );

        let views = [
            HmiView::DoorOpening,
            HmiView::DoorOpened,
            HmiView::DoorClosing,
        ];
        for view in views {
            let out = session.handle_reply(0x04);
            assert_eq!(out.as_slice(), &[Effect::Render(view), Effect::AwaitReply]);
        }
        let out = session.handle_reply(0x04);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::Prompt)]);
        assert_eq!(session.state(), HmiState::Entering);
        assert!(session.password_on_record());
    }

    #[test]
    fn test_door_cycle_consumes_unexpected_byte() {
        let mut session = booted(true);
        type_digits(&mut session, &[1, 1, 1, 1, 1]);
        session.handle_key(KeyCode::Equals);
        session.handle_reply(0x03);
        session.handle_key(KeyCode::Plus);

        let out = session.handle_reply(0x55);
        assert_eq!(out.as_slice(), &[Effect::AwaitReply]);
        assert_eq!(session.state(), HmiState::DoorCycle(1));
    }

    #[test]
    fn test_menu_change_password() {
        let mut session = booted(true);
        type_digits(&mut session, &[1, 1, 1, 1, 1]);
        session.handle_key(KeyCode::Equals);
        session.handle_reply(0x03);

        let out = session.handle_key(KeyCode::Minus);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::Prompt)]);
        assert!(!session.password_on_record());

        // Next entry starts a definition
        type_digits(&mut session, &[2, 2, 2, 2, 2]);
        let out = session.handle_key(KeyCode::Equals);
        assert_eq!(out.as_slice(), &[Effect::Render(HmiView::RePrompt)]);
    }
}
