//! UART link tasks
//!
//! Move raw bytes between the buffered UART and the link channels.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use crate::channels::{RX_CHANNEL, TX_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Link RX task - forwards every received byte to the request loop
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    RX_CHANNEL.send(byte).await;
                }
            }
            Err(e) => {
                // Parity and framing errors drop the byte; the parser
                // resynchronises on the next command byte
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Link TX task - sends queued status bytes one at a time
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let byte = TX_CHANNEL.receive().await;

        if let Err(e) = tx.write_all(&[byte]).await {
            warn!("UART write error: {:?}", e);
            continue;
        }
        if let Err(e) = tx.flush().await {
            warn!("UART flush error: {:?}", e);
            continue;
        }
        trace!("TX: {=u8:#04x}", byte);
    }
}
