//! Byte link over a UART
//!
//! Wraps the receive and transmit halves of any `embedded-io-async` serial
//! port. Each byte is written and flushed on its own: the protocol has no
//! framing, so the peer must see a byte as soon as it is sent.

use doorlock_core::config::{LinkConfig, Parity};
use doorlock_core::traits::{Link, LinkError};
use doorlock_hal::uart::{self, UartConfig};
use embedded_io_async::{Error as _, ErrorKind, Read, Write};

/// UART framing for the configured link: 8 data bits, one stop bit
pub fn uart_config(link: &LinkConfig) -> UartConfig {
    let parity = match link.parity {
        Parity::None => uart::Parity::None,
        Parity::Even => uart::Parity::Even,
        Parity::Odd => uart::Parity::Odd,
    };
    UartConfig {
        parity,
        ..UartConfig::with_baudrate(link.baudrate)
    }
}

/// Serial [`Link`] over split UART halves
pub struct SerialLink<R, W> {
    rx: R,
    tx: W,
    last_error: Option<ErrorKind>,
}

impl<R, W> SerialLink<R, W>
where
    R: Read,
    W: Write,
{
    /// Create a link from a receiver and a transmitter
    pub fn new(rx: R, tx: W) -> Self {
        Self {
            rx,
            tx,
            last_error: None,
        }
    }

    /// Kind of the most recent UART error, if any
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Forget the recorded error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Give back the UART halves
    pub fn into_parts(self) -> (R, W) {
        (self.rx, self.tx)
    }

    fn record(&mut self, kind: ErrorKind) -> LinkError {
        self.last_error = Some(kind);
        LinkError::Io
    }
}

impl<R, W> Link for SerialLink<R, W>
where
    R: Read,
    W: Write,
{
    async fn send(&mut self, byte: u8) -> Result<(), LinkError> {
        if let Err(e) = self.tx.write_all(&[byte]).await {
            return Err(self.record(e.kind()));
        }
        if let Err(e) = self.tx.flush().await {
            return Err(self.record(e.kind()));
        }
        Ok(())
    }

    async fn receive(&mut self) -> Result<u8, LinkError> {
        let mut buf = [0u8; 1];
        match self.rx.read(&mut buf).await {
            Ok(0) => Err(LinkError::Disconnected),
            Ok(_) => Ok(buf[0]),
            Err(e) => Err(self.record(e.kind())),
        }
    }

    async fn send_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if let Err(e) = self.tx.write_all(bytes).await {
            return Err(self.record(e.kind()));
        }
        if let Err(e) = self.tx.flush().await {
            return Err(self.record(e.kind()));
        }
        Ok(())
    }
}
