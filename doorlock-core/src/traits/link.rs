//! Serial link trait
//!
//! One byte at a time, in order. Implementations on hardware wait forever
//! for the next byte; test transports may give up and report `Timeout`.

/// Errors from link operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No byte arrived within the transport's wait bound
    Timeout,
    /// Peer went away
    Disconnected,
    /// UART-level error (framing, parity, overrun)
    Io,
}

/// Byte-oriented serial link
pub trait Link {
    /// Send a single byte
    fn send(&mut self, byte: u8) -> impl core::future::Future<Output = Result<(), LinkError>>;

    /// Receive the next byte
    fn receive(&mut self) -> impl core::future::Future<Output = Result<u8, LinkError>>;

    /// Send a run of bytes in order
    fn send_all(
        &mut self,
        bytes: &[u8],
    ) -> impl core::future::Future<Output = Result<(), LinkError>> {
        async move {
            for &byte in bytes {
                self.send(byte).await?;
            }
            Ok(())
        }
    }
}
