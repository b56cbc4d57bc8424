//! Inter-task communication channels
//!
//! The UART is owned by the link tasks. Everything else reaches the
//! terminal through these channels, so the request loop and the door tick
//! can both send without sharing the transmitter.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use doorlock_core::traits::{Link, LinkError};

/// Channel capacity for received bytes (one define request fits)
const RX_CHANNEL_SIZE: usize = 32;

/// Channel capacity for outgoing status bytes
const TX_CHANNEL_SIZE: usize = 8;

/// Bytes received from the terminal
pub static RX_CHANNEL: Channel<CriticalSectionRawMutex, u8, RX_CHANNEL_SIZE> = Channel::new();

/// Status bytes queued for the terminal
pub static TX_CHANNEL: Channel<CriticalSectionRawMutex, u8, TX_CHANNEL_SIZE> = Channel::new();

/// [`Link`] over the static byte channels
///
/// Never fails: the link tasks absorb UART errors.
pub struct ChannelLink;

impl Link for ChannelLink {
    async fn send(&mut self, byte: u8) -> Result<(), LinkError> {
        TX_CHANNEL.send(byte).await;
        Ok(())
    }

    async fn receive(&mut self) -> Result<u8, LinkError> {
        Ok(RX_CHANNEL.receive().await)
    }
}
