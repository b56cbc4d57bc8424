//! Doorlock - Control Unit Firmware
//!
//! Main firmware binary for the RP2040 control unit. Holds the stored
//! password, answers the terminal's requests over UART0 and runs the door
//! motor and the alarm buzzer.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use doorlock_core::config::StoreBackend;
use doorlock_core::runner::ControlRunner;
use doorlock_core::sequencer::Door;
use doorlock_drivers::alarm::Buzzer;
use doorlock_drivers::link::uart_config;
use doorlock_drivers::motor::{HBridgeConfig, HBridgeMotor};
use doorlock_drivers::storage::{Eeprom24, EepromConfig, FlashSlotStore};
use doorlock_hal_rp2040::{PwmChannel, Rp2040FlashStorage, RpOutput, RpPwm};

use crate::channels::ChannelLink;
use crate::store::BoardStore;
use crate::tasks::BoardDoor;

mod channels;
mod config;
mod store;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// Shared between the authority task and the door tick task
static DOOR: StaticCell<BoardDoor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Doorlock control unit starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // Terminal link on UART0 (GPIO0=TX, GPIO1=RX)
    let tx_buf = TX_BUF.init([0u8; 32]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let link_config = uart_config(&config.link);
    let uart = Uart::new_blocking(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        doorlock_hal_rp2040::uart::uart_config(&link_config),
    );
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!(
        "UART initialized: {} baud, {}us per byte",
        link_config.baudrate,
        link_config.char_time_us()
    );

    // Door motor H-bridge (GPIO10=IN1, GPIO11=IN2, GPIO12=EN on PWM6 A)
    let in1 = RpOutput::new(Output::new(p.PIN_10, Level::Low));
    let in2 = RpOutput::new(Output::new(p.PIN_11, Level::Low));
    let enable = RpPwm::new(
        Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm::Config::default()),
        PwmChannel::A,
    );
    let motor = HBridgeMotor::new(in1, in2, enable, HBridgeConfig::default());
    let door: &'static BoardDoor = DOOR.init(Door::new(config.door, motor));

    info!("Door motor initialized");

    // Alarm buzzer (GPIO15, active high)
    let buzzer = Buzzer::new(RpOutput::new(Output::new(p.PIN_15, Level::Low)));

    let store = match config.store.backend {
        StoreBackend::Eeprom => {
            // 24Cxx on I2C0 (GPIO16=SDA, GPIO17=SCL)
            let i2c = I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, i2c::Config::default());
            info!("Password store: EEPROM at {:#06x}", config.store.base_address);
            BoardStore::Eeprom(Eeprom24::new(
                i2c,
                Delay,
                EepromConfig::from_store(&config.store),
            ))
        }
        StoreBackend::Flash => {
            info!("Password store: on-chip flash");
            BoardStore::Flash(FlashSlotStore::new(Rp2040FlashStorage::new(
                p.FLASH, p.DMA_CH0,
            )))
        }
    };

    let runner = ControlRunner::new(ChannelLink, store, buzzer, Delay, door, config);

    // Spawn tasks
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::door_tick_task(door, config.door.tick_ms))
        .unwrap();
    spawner.spawn(tasks::authority_task(runner, door)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
