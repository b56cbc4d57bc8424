//! Terminal runner

use embedded_hal_async::delay::DelayNs;

use crate::config::LockConfig;
use crate::session::{Effect, Effects, HmiSession, WaitKind};
use crate::traits::{Display, DisplayError, Keypad, Link, LinkError};

/// Errors surfaced by the terminal runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HmiError {
    /// Transport failed
    Link(LinkError),
    /// Display rejected a draw
    Display(DisplayError),
}

impl From<LinkError> for HmiError {
    fn from(e: LinkError) -> Self {
        HmiError::Link(e)
    }
}

impl From<DisplayError> for HmiError {
    fn from(e: DisplayError) -> Self {
        HmiError::Display(e)
    }
}

/// Drives the terminal session from keypad and link input
pub struct HmiRunner<L, K, D, Dl> {
    link: L,
    keypad: K,
    display: D,
    delay: Dl,
    config: LockConfig,
    session: HmiSession,
}

impl<L, K, D, Dl> HmiRunner<L, K, D, Dl>
where
    L: Link,
    K: Keypad,
    D: Display,
    Dl: DelayNs,
{
    /// Create a runner
    pub fn new(link: L, keypad: K, display: D, delay: Dl, config: LockConfig) -> Self {
        Self {
            link,
            keypad,
            display,
            delay,
            session: HmiSession::from_config(&config),
            config,
        }
    }

    /// Show the prompt and wait for the boot byte
    pub async fn boot(&mut self) -> Result<(), HmiError> {
        let effects = self.session.start();
        self.apply(effects).await
    }

    /// Handle one key press, including every exchange it starts
    pub async fn step(&mut self) -> Result<(), HmiError> {
        let key = self.keypad.read_key().await;
        let effects = self.session.handle_key(key);
        self.apply(effects).await
    }

    /// Pick up an exchange interrupted by a link error
    ///
    /// A bad byte leaves the session blocked on a reply, where key presses
    /// are ignored. This waits for the next byte instead. Does nothing when
    /// no reply is outstanding.
    pub async fn resume(&mut self) -> Result<(), HmiError> {
        if !self.session.state().awaits_reply() {
            return Ok(());
        }
        let mut effects = Effects::new();
        let _ = effects.push(Effect::AwaitReply);
        self.apply(effects).await
    }

    /// Boot, then handle keys until an error occurs
    pub async fn run(&mut self) -> HmiError {
        if let Err(e) = self.boot().await {
            return e;
        }
        loop {
            if let Err(e) = self.step().await {
                return e;
            }
        }
    }

    /// Carry out effects until the session has nothing more to do
    async fn apply(&mut self, mut effects: Effects) -> Result<(), HmiError> {
        loop {
            let mut next = None;
            for effect in effects {
                match effect {
                    Effect::Render(view) => view.render(&mut self.display)?,
                    Effect::Send(request) => self.link.send_all(&request.encode()).await?,
                    Effect::AwaitReply => {
                        self.display.set_cursor(self.session.cursor())?;
                        let byte = self.link.receive().await?;
                        next = Some(self.session.handle_reply(byte));
                        break;
                    }
                    Effect::Wait(kind) => {
                        self.display.set_cursor(self.session.cursor())?;
                        self.delay.delay_ms(self.wait_ms(kind)).await;
                        next = Some(self.session.wait_elapsed(kind));
                        break;
                    }
                }
            }
            self.display.set_cursor(self.session.cursor())?;

            match next {
                Some(follow_up) => effects = follow_up,
                None => return Ok(()),
            }
        }
    }

    fn wait_ms(&self, kind: WaitKind) -> u32 {
        match kind {
            WaitKind::Message => self.config.ui.message_ms,
            WaitKind::Breach => self.config.lockout.alarm_dwell_ms,
            WaitKind::KeySettle => self.config.ui.key_settle_ms,
        }
    }

    /// Current session
    pub fn session(&self) -> &HmiSession {
        &self.session
    }

    /// The link, for inspection
    pub fn link(&self) -> &L {
        &self.link
    }

    /// The display, for inspection
    pub fn display(&self) -> &D {
        &self.display
    }
}
