//! Control unit session

use doorlock_protocol::{Password, Reply, Request};

use crate::state::{ControlEvent, ControlState};

/// What the control unit must do for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlAction {
    /// Send this reply byte
    Reply(Reply),
    /// Write the password to the store, then reply `PasswordDefined`
    Commit(Password),
    /// Arm the door sequencer
    OpenDoor,
    /// Sound the alarm for the dwell period; no reply
    Alarm,
}

/// Server side of the protocol
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSession {
    state: ControlState,
    stored: Password,
}

impl ControlSession {
    /// Create a session in the boot state
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish boot with the password read from the store
    ///
    /// Returns the boot byte for the terminal.
    pub fn boot(&mut self, stored: Password) -> Reply {
        self.stored = stored;
        self.state = self.state.transition(ControlEvent::BootComplete);
        Reply::boot_status(self.password_on_record())
    }

    /// Decide how to answer a request
    ///
    /// Returns `None` when the session is not waiting for a command.
    pub fn handle_request(&mut self, request: Request) -> Option<ControlAction> {
        if !self.state.is_waiting() {
            return None;
        }
        self.state = self
            .state
            .transition(ControlEvent::Received(request.command()));

        let action = match request {
            Request::DefinePassword {
                entry,
                confirmation,
            } => {
                if entry.matches(&confirmation) {
                    // Stays in DefiningPassword until the write completes
                    return Some(ControlAction::Commit(entry));
                }
                ControlAction::Reply(Reply::Nack)
            }
            Request::CheckPassword(candidate) => {
                if self.stored.matches(&candidate) {
                    ControlAction::Reply(Reply::PasswordVerified)
                } else {
                    ControlAction::Reply(Reply::Nack)
                }
            }
            Request::OpenDoor => return Some(ControlAction::OpenDoor),
            Request::Breach => return Some(ControlAction::Alarm),
        };

        self.state = self.state.transition(ControlEvent::Handled);
        Some(action)
    }

    /// Every slot of a commit was written
    pub fn committed(&mut self, password: Password) {
        self.stored = password;
        self.state = self.state.transition(ControlEvent::Handled);
    }

    /// A commit gave up; the cached password is left as it was
    pub fn commit_failed(&mut self) {
        self.state = self.state.transition(ControlEvent::Handled);
    }

    /// The open request was armed or rejected as busy
    pub fn door_handled(&mut self) {
        self.state = self.state.transition(ControlEvent::Handled);
    }

    /// The alarm dwell finished
    pub fn alarm_cleared(&mut self) {
        self.state = self.state.transition(ControlEvent::AlarmCleared);
    }

    /// Password the store is expected to hold
    pub fn stored_password(&self) -> Password {
        self.stored
    }

    /// Current state
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Check if a password is on record
    ///
    /// An all-zero password reads the same as an erased store.
    pub fn password_on_record(&self) -> bool {
        !self.stored.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn booted(stored: [u8; 5]) -> ControlSession {
        let mut session = ControlSession::new();
        session.boot(Password::new(stored));
        session
    }

    #[test]
    fn test_boot_reply() {
        let mut session = ControlSession::new();
        assert_eq!(session.boot(Password::BLANK), Reply::Nack);
        assert_eq!(session.state(), ControlState::WaitCommand);

        let mut session = ControlSession::new();
        assert_eq!(
            session.boot(Password::new([0, 0, 0, 0, 7])),
            Reply::PasswordStored
        );
    }

    #[test]
    fn test_requests_before_boot_are_ignored() {
        let mut session = ControlSession::new();
        assert_eq!(session.handle_request(Request::OpenDoor), None);
        assert_eq!(session.state(), ControlState::Boot);
    }

    #[test]
    fn test_define_match_commits() {
        let mut session = booted([0; 5]);
        let password = Password::new([1, 1, 1, 1, 1]);
        let action = session.handle_request(Request::DefinePassword {
            entry: password,
            confirmation: password,
        });
        assert_eq!(action, Some(ControlAction::Commit(password)));
        assert_eq!(session.state(), ControlState::DefiningPassword);

        session.committed(password);
        assert_eq!(session.state(), ControlState::WaitCommand);
        assert!(session.password_on_record());
    }

    #[test]
    fn test_define_mismatch_replies_nack() {
        let mut session = booted([0; 5]);
        let action = session.handle_request(Request::DefinePassword {
            entry: Password::new([1, 2, 3, 4, 5]),
            confirmation: Password::new([1, 2, 3, 4, 6]),
        });
        assert_eq!(action, Some(ControlAction::Reply(Reply::Nack)));
        assert_eq!(session.state(), ControlState::WaitCommand);
        assert!(!session.password_on_record());
    }

    #[test]
    fn test_check_after_define_uses_new_password() {
        let mut session = booted([9, 9, 9, 9, 9]);
        let password = Password::new([2, 4, 6, 8, 0]);
        session.handle_request(Request::DefinePassword {
            entry: password,
            confirmation: password,
        });
        session.committed(password);

        assert_eq!(
            session.handle_request(Request::CheckPassword(password)),
            Some(ControlAction::Reply(Reply::PasswordVerified))
        );
        assert_eq!(
            session.handle_request(Request::CheckPassword(Password::new([9, 9, 9, 9, 9]))),
            Some(ControlAction::Reply(Reply::Nack))
        );
    }

    #[test]
    fn test_failed_commit_keeps_old_password() {
        let old = Password::new([1, 1, 1, 1, 1]);
        let new = Password::new([2, 2, 2, 2, 2]);
        let mut session = booted(*old.as_bytes());
        session.handle_request(Request::DefinePassword {
            entry: new,
            confirmation: new,
        });
        session.commit_failed();

        assert_eq!(
            session.handle_request(Request::CheckPassword(old)),
            Some(ControlAction::Reply(Reply::PasswordVerified))
        );
    }

    #[test]
    fn test_repeated_check_still_succeeds() {
        let stored = [3, 1, 4, 1, 5];
        let mut session = booted(stored);
        for _ in 0..5 {
            assert_eq!(
                session.handle_request(Request::CheckPassword(Password::new(stored))),
                Some(ControlAction::Reply(Reply::PasswordVerified))
            );
        }
    }

    #[test]
    fn test_open_door_and_breach() {
        let mut session = booted([1; 5]);
        assert_eq!(
            session.handle_request(Request::OpenDoor),
            Some(ControlAction::OpenDoor)
        );
        assert_eq!(session.state(), ControlState::OpeningDoor);
        session.door_handled();

        assert_eq!(
            session.handle_request(Request::Breach),
            Some(ControlAction::Alarm)
        );
        assert_eq!(session.state(), ControlState::Breached);
        assert_eq!(session.handle_request(Request::OpenDoor), None);
        session.alarm_cleared();
        assert_eq!(session.state(), ControlState::WaitCommand);
    }

    proptest! {
        #[test]
        fn prop_define_commits_iff_entries_equal(
            entry in prop::array::uniform5(0u8..=9),
            confirmation in prop::array::uniform5(0u8..=9),
        ) {
            let mut session = booted([0; 5]);
            let action = session.handle_request(Request::DefinePassword {
                entry: Password::new(entry),
                confirmation: Password::new(confirmation),
            });
            if entry == confirmation {
                prop_assert_eq!(action, Some(ControlAction::Commit(Password::new(entry))));
            } else {
                prop_assert_eq!(action, Some(ControlAction::Reply(Reply::Nack)));
            }
        }

        #[test]
        fn prop_check_verifies_iff_equal(
            stored in prop::array::uniform5(any::<u8>()),
            candidate in prop::array::uniform5(any::<u8>()),
        ) {
            let mut session = booted(stored);
            let expected = if stored == candidate {
                Reply::PasswordVerified
            } else {
                Reply::Nack
            };
            prop_assert_eq!(
                session.handle_request(Request::CheckPassword(Password::new(candidate))),
                Some(ControlAction::Reply(expected))
            );
        }
    }
}
