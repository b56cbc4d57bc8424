//! Control unit runner

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use doorlock_protocol::{ParseError, Password, Reply, Request, RequestParser};

use crate::config::LockConfig;
use crate::sequencer::{Door, SequencerError};
use crate::session::{ControlAction, ControlSession};
use crate::traits::{
    Alarm, DoorMotor, Link, LinkError, MotorError, SlotStore, StoreError, PASSWORD_SLOTS,
};

/// Errors surfaced by the control runner
///
/// `Link` ends the exchange. The others are reported after the protocol
/// has already been answered, so serving can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Transport failed
    Link(LinkError),
    /// Store read or write failed after all attempts
    Store(StoreError),
    /// Byte was not a command and was skipped
    Protocol(ParseError),
    /// Open requested while the door cycle is running
    Sequencer(SequencerError),
    /// Motor rejected a command
    Motor(MotorError),
}

impl From<LinkError> for ControlError {
    fn from(e: LinkError) -> Self {
        ControlError::Link(e)
    }
}

impl From<StoreError> for ControlError {
    fn from(e: StoreError) -> Self {
        ControlError::Store(e)
    }
}

impl From<ParseError> for ControlError {
    fn from(e: ParseError) -> Self {
        ControlError::Protocol(e)
    }
}

impl From<SequencerError> for ControlError {
    fn from(e: SequencerError) -> Self {
        ControlError::Sequencer(e)
    }
}

impl From<MotorError> for ControlError {
    fn from(e: MotorError) -> Self {
        ControlError::Motor(e)
    }
}

/// Serves terminal requests
///
/// The door itself is ticked elsewhere; this runner only arms it and sends
/// the opening heartbeat.
pub struct ControlRunner<'d, L, S, A, Dl, M: RawMutex, Mo> {
    link: L,
    store: S,
    alarm: A,
    delay: Dl,
    door: &'d Door<M, Mo>,
    config: LockConfig,
    session: ControlSession,
    parser: RequestParser,
}

impl<'d, L, S, A, Dl, M, Mo> ControlRunner<'d, L, S, A, Dl, M, Mo>
where
    L: Link,
    S: SlotStore,
    A: Alarm,
    Dl: DelayNs,
    M: RawMutex,
    Mo: DoorMotor,
{
    /// Create a runner
    pub fn new(
        link: L,
        store: S,
        alarm: A,
        delay: Dl,
        door: &'d Door<M, Mo>,
        config: LockConfig,
    ) -> Self {
        Self {
            link,
            store,
            alarm,
            delay,
            door,
            config,
            session: ControlSession::new(),
            parser: RequestParser::new(),
        }
    }

    /// Scan the store and send the boot byte
    ///
    /// The byte is sent even if the store cannot be read; an unreadable
    /// store is reported as empty.
    pub async fn boot(&mut self) -> Result<Reply, ControlError> {
        let (stored, result) = match self.store.load_password().await {
            Ok(password) => (password, Ok(())),
            Err(e) => (Password::BLANK, Err(ControlError::Store(e))),
        };
        let reply = self.session.boot(stored);
        self.link.send(reply.to_byte()).await?;
        result.map(|()| reply)
    }

    /// Read bytes until one request is complete, then answer it
    pub async fn step(&mut self) -> Result<Request, ControlError> {
        let request = loop {
            let byte = self.link.receive().await?;
            if let Some(request) = self.parser.feed(byte)? {
                break request;
            }
        };

        let Some(action) = self.session.handle_request(request) else {
            return Ok(request);
        };
        self.perform(action).await?;
        Ok(request)
    }

    /// Boot, then serve until the link fails
    ///
    /// Non-fatal errors are passed to `on_error` and serving continues.
    pub async fn run(&mut self, mut on_error: impl FnMut(ControlError)) -> LinkError {
        if let Err(e) = self.boot().await {
            if let ControlError::Link(link) = e {
                return link;
            }
            on_error(e);
        }

        loop {
            match self.step().await {
                Ok(_) => {}
                Err(ControlError::Link(e)) => return e,
                Err(e) => on_error(e),
            }
        }
    }

    async fn perform(&mut self, action: ControlAction) -> Result<(), ControlError> {
        match action {
            ControlAction::Reply(reply) => {
                self.link.send(reply.to_byte()).await?;
            }
            ControlAction::Commit(password) => {
                let attempts = self.config.store.write_attempts.max(1);
                let mut last_error = StoreError::Bus;
                for _ in 0..attempts {
                    match self.store.store_password(&password).await {
                        Ok(()) => {
                            self.session.committed(password);
                            self.link.send(Reply::PasswordDefined.to_byte()).await?;
                            return Ok(());
                        }
                        Err(e) => last_error = e,
                    }
                }
                // Earlier slots may already hold new bytes
                let previous = self.session.stored_password();
                let _ = self.roll_back(previous).await;
                self.session.commit_failed();
                self.link.send(Reply::Nack.to_byte()).await?;
                return Err(last_error.into());
            }
            ControlAction::OpenDoor => {
                let armed = self.door.arm();
                self.session.door_handled();
                armed?;
                self.link.send(Reply::DoorHeartbeat.to_byte()).await?;
                if let Some(fault) = self.door.take_motor_fault() {
                    return Err(fault.into());
                }
            }
            ControlAction::Alarm => {
                self.alarm.on();
                self.delay.delay_ms(self.config.lockout.alarm_dwell_ms).await;
                self.alarm.off();
                self.session.alarm_cleared();
            }
        }
        Ok(())
    }

    /// Rewrite every slot with the password held before a failed commit
    ///
    /// A failing slot does not stop the others from being restored.
    async fn roll_back(&mut self, previous: Password) -> Result<(), StoreError> {
        let attempts = self.config.store.write_attempts.max(1);
        let mut result = Ok(());
        for (slot, &byte) in (0..PASSWORD_SLOTS).zip(previous.as_bytes().iter()) {
            let mut written = Err(StoreError::Bus);
            for _ in 0..attempts {
                written = self.store.write(slot, byte).await;
                if written.is_ok() {
                    break;
                }
            }
            if let Err(e) = written {
                result = Err(e);
            }
        }
        result
    }

    /// Current session
    pub fn session(&self) -> &ControlSession {
        &self.session
    }

    /// The store, for inspection
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The alarm, for inspection
    pub fn alarm(&self) -> &A {
        &self.alarm
    }
}
