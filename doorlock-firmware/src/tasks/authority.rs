//! Authority task
//!
//! Owns the password store and the buzzer, answers terminal requests and
//! arms the door.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;

use doorlock_core::runner::{ControlError, ControlRunner};
use doorlock_drivers::alarm::Buzzer;
use doorlock_hal_rp2040::RpOutput;
use doorlock_protocol::Request;

use super::door::{BoardDoor, BoardMotor, DOOR_ARMED};
use crate::channels::ChannelLink;
use crate::store::BoardStore;

/// Control runner with the board's collaborators
pub type BoardRunner = ControlRunner<
    'static,
    ChannelLink,
    BoardStore,
    Buzzer<RpOutput<'static>>,
    Delay,
    CriticalSectionRawMutex,
    BoardMotor,
>;

/// Authority task - sends the boot status then serves requests forever
#[embassy_executor::task]
pub async fn authority_task(mut runner: BoardRunner, door: &'static BoardDoor) {
    info!("Authority task started");

    match runner.boot().await {
        Ok(reply) => info!("Boot status sent: {:?}", reply),
        Err(e) => warn!("Boot: {:?}", e),
    }

    loop {
        match runner.step().await {
            Ok(Request::OpenDoor) if door.is_armed() => {
                info!("Door armed");
                DOOR_ARMED.signal(());
            }
            Ok(request) => {
                debug!("Served {:?} in {:?}", request.command(), runner.session().state());
            }
            Err(ControlError::Protocol(e)) => {
                debug!("Skipped byte: {:?}", e);
            }
            Err(ControlError::Link(e)) => {
                // The channel link cannot fail
                error!("Link failed: {:?}", e);
                return;
            }
            Err(e) => warn!("Request failed: {:?}", e),
        }
    }
}
