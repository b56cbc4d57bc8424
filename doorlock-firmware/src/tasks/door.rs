//! Door tick task
//!
//! Advances the door cycle once per tick while it is armed and reports
//! every phase edge to the terminal with a heartbeat byte.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use doorlock_core::sequencer::{Door, DoorPhase};
use doorlock_drivers::motor::HBridgeMotor;
use doorlock_hal_rp2040::{RpOutput, RpPwm};
use doorlock_protocol::Reply;

use crate::channels::TX_CHANNEL;

/// Door motor on the board's H-bridge
pub type BoardMotor = HBridgeMotor<RpOutput<'static>, RpOutput<'static>, RpPwm<'static>>;

/// Door shared by the request loop and this task
pub type BoardDoor = Door<CriticalSectionRawMutex, BoardMotor>;

/// Raised by the request loop after arming the door
pub static DOOR_ARMED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Door tick task - runs one cycle per arm signal
#[embassy_executor::task]
pub async fn door_tick_task(door: &'static BoardDoor, tick_ms: u32) {
    info!("Door tick task started ({}ms ticks)", tick_ms);

    let period = Duration::from_millis(u64::from(tick_ms));

    loop {
        DOOR_ARMED.wait().await;
        if !door.is_armed() {
            continue;
        }

        // Tick 1 is one period after the arm, not after the last cycle
        let mut ticker = Ticker::every(period);

        while door.is_armed() {
            ticker.next().await;

            let Some(edge) = door.tick() else {
                continue;
            };
            info!("Door {:?} at tick {}", edge.phase, edge.tick);

            if let Some(fault) = door.take_motor_fault() {
                error!("Motor fault: {:?}", fault);
            }

            TX_CHANNEL.send(Reply::DoorHeartbeat.to_byte()).await;

            if edge.phase == DoorPhase::Idle {
                debug!("Door cycle complete");
            }
        }
    }
}
