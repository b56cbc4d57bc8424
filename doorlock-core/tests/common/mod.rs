//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::poll_fn;
use std::rc::Rc;
use std::task::Poll;

use doorlock_core::traits::{
    Alarm, Direction, DoorMotor, KeyCode, Keypad, Link, LinkError, MotorError, SlotStore,
    StoreError, PASSWORD_SLOTS,
};

pub type Queue = Rc<RefCell<VecDeque<u8>>>;

/// One end of an in-memory byte link
///
/// `receive` stays pending until a byte is queued; the busy-polling
/// `block_on` picks it up on the next pass.
pub struct MemLink {
    rx: Queue,
    tx: Queue,
    sent: Rc<RefCell<Vec<u8>>>,
}

impl MemLink {
    /// Connected pair: (terminal end, control end)
    pub fn pair() -> (MemLink, MemLink) {
        let to_control = Queue::default();
        let to_terminal = Queue::default();
        let terminal = MemLink {
            rx: to_terminal.clone(),
            tx: to_control.clone(),
            sent: Rc::default(),
        };
        let control = MemLink {
            rx: to_control,
            tx: to_terminal,
            sent: Rc::default(),
        };
        (terminal, control)
    }

    /// Queue feeding the peer, for bytes sent outside the runner
    pub fn outbound(&self) -> Queue {
        self.tx.clone()
    }

    /// Everything this end has sent through `send`
    pub fn sent_log(&self) -> Rc<RefCell<Vec<u8>>> {
        self.sent.clone()
    }
}

impl Link for MemLink {
    async fn send(&mut self, byte: u8) -> Result<(), LinkError> {
        self.tx.borrow_mut().push_back(byte);
        self.sent.borrow_mut().push(byte);
        Ok(())
    }

    async fn receive(&mut self) -> Result<u8, LinkError> {
        poll_fn(|cx| match self.rx.borrow_mut().pop_front() {
            Some(byte) => Poll::Ready(Ok(byte)),
            None => {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }
}

/// Five-slot store with injectable write failures
#[derive(Clone, Default)]
pub struct MemStore {
    pub slots: Rc<RefCell<[u8; PASSWORD_SLOTS as usize]>>,
    /// Number of upcoming writes that fail
    pub failing_writes: Rc<Cell<u32>>,
    /// Slot whose writes always fail
    pub broken_slot: Rc<Cell<Option<u8>>>,
    /// Every read fails
    pub unreadable: Rc<Cell<bool>>,
    pub writes: Rc<Cell<u32>>,
}

impl MemStore {
    pub fn with(bytes: [u8; 5]) -> Self {
        let store = Self::default();
        *store.slots.borrow_mut() = bytes;
        store
    }

    pub fn contents(&self) -> [u8; 5] {
        *self.slots.borrow()
    }
}

impl SlotStore for MemStore {
    async fn read(&mut self, slot: u8) -> Result<u8, StoreError> {
        if self.unreadable.get() {
            return Err(StoreError::Bus);
        }
        self.slots
            .borrow()
            .get(slot as usize)
            .copied()
            .ok_or(StoreError::InvalidSlot(slot))
    }

    async fn write(&mut self, slot: u8, value: u8) -> Result<(), StoreError> {
        self.writes.set(self.writes.get() + 1);
        if self.failing_writes.get() > 0 {
            self.failing_writes.set(self.failing_writes.get() - 1);
            return Err(StoreError::Bus);
        }
        if self.broken_slot.get() == Some(slot) {
            return Err(StoreError::Bus);
        }
        let mut slots = self.slots.borrow_mut();
        let cell = slots
            .get_mut(slot as usize)
            .ok_or(StoreError::InvalidSlot(slot))?;
        *cell = value;
        Ok(())
    }
}

/// Buzzer that records every switch
#[derive(Clone, Default)]
pub struct MockAlarm {
    pub history: Rc<RefCell<Vec<bool>>>,
}

impl Alarm for MockAlarm {
    fn set_active(&mut self, active: bool) {
        self.history.borrow_mut().push(active);
    }

    fn is_active(&self) -> bool {
        self.history.borrow().last().copied().unwrap_or(false)
    }
}

/// Motor that remembers its last command
#[derive(Debug, Default)]
pub struct MockMotor {
    pub running: Option<(Direction, u8)>,
    pub commands: Vec<Option<Direction>>,
    /// Reject every drive command
    pub faulty: bool,
}

impl DoorMotor for MockMotor {
    fn drive(&mut self, direction: Direction, speed_percent: u8) -> Result<(), MotorError> {
        if self.faulty {
            return Err(MotorError::Fault);
        }
        self.running = Some((direction, speed_percent));
        self.commands.push(Some(direction));
        Ok(())
    }

    fn stop(&mut self) {
        self.running = None;
        self.commands.push(None);
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

/// Delay that returns at once and adds up what was asked for
#[derive(Clone, Default)]
pub struct InstantDelay {
    pub total_ms: Rc<Cell<u64>>,
}

impl embedded_hal_async::delay::DelayNs for InstantDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ns) / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
    }
}

/// Keypad replaying a fixed script, then waiting forever
#[derive(Default)]
pub struct ScriptedKeypad {
    keys: VecDeque<KeyCode>,
}

impl ScriptedKeypad {
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Keypad for ScriptedKeypad {
    async fn read_key(&mut self) -> KeyCode {
        match self.keys.pop_front() {
            Some(key) => key,
            None => poll_fn(|_| Poll::Pending).await,
        }
    }
}

/// Keys for five digits followed by `=`
pub fn entry(digits: [u8; 5]) -> impl Iterator<Item = KeyCode> {
    digits
        .into_iter()
        .map(KeyCode::Digit)
        .chain(std::iter::once(KeyCode::Equals))
}

/// Screen buffer that also keeps every top-row text drawn at column 0
#[derive(Default)]
pub struct RecordingDisplay {
    pub screen: doorlock_core::ui::Screen,
    pub headlines: Vec<String>,
}

impl doorlock_core::traits::Display for RecordingDisplay {
    fn clear(&mut self) -> Result<(), doorlock_core::traits::DisplayError> {
        self.screen.clear()
    }

    fn show(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
    ) -> Result<(), doorlock_core::traits::DisplayError> {
        if row == 0 && col == 0 {
            self.headlines.push(text.to_string());
        }
        self.screen.show(row, col, text)
    }

    fn set_cursor(
        &mut self,
        position: Option<(u8, u8)>,
    ) -> Result<(), doorlock_core::traits::DisplayError> {
        self.screen.set_cursor(position)
    }
}

impl RecordingDisplay {
    pub fn row(&self, row: usize) -> &str {
        self.screen.line(row).map(str::trim_end).unwrap_or("")
    }
}
