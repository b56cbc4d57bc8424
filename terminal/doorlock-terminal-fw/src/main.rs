//! Doorlock Terminal Firmware
//!
//! Firmware for the keypad/LCD terminal (STM32F042K6). Collects password
//! entries, talks to the control unit over USART2 and shows prompts on a
//! 16x2 character LCD.

#![no_std]
#![no_main]

mod screen;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::{I2C1, USART2};
use embassy_stm32::usart::{self, BufferedUart, BufferedUartRx, BufferedUartTx};
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use doorlock_core::config::{parse_config, LockConfig};
use doorlock_core::runner::{HmiError, HmiRunner};
use doorlock_core::traits::LinkError;
use doorlock_drivers::display::Lcd1602;
use doorlock_drivers::keypad::{KeypadConfig, MatrixKeypad};
use doorlock_drivers::link::{uart_config, SerialLink};
use doorlock_hal_stm32f0::{StmInput, StmOutput};

use crate::screen::{SharedScreen, SCREEN_REFRESH};

bind_interrupts!(struct Irqs {
    USART2 => usart::BufferedInterruptHandler<USART2>;
    I2C1 => i2c::EventInterruptHandler<I2C1>, i2c::ErrorInterruptHandler<I2C1>;
});

type TerminalLcd = Lcd1602<I2c<'static, Async, i2c::Master>, Delay>;
type TerminalLink = SerialLink<BufferedUartRx<'static>, BufferedUartTx<'static>>;
type TerminalKeypad = MatrixKeypad<StmOutput<'static>, StmInput<'static>, Delay>;
type TerminalRunner = HmiRunner<TerminalLink, TerminalKeypad, SharedScreen, Delay>;

/// Embedded configuration, same file as the control unit's
const EMBEDDED_CONFIG: &str = include_str!("../lock.toml");

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Doorlock terminal starting...");

    let p = embassy_stm32::init(Default::default());
    let config = load_config();

    // Setup I2C for the LCD backpack (PB6=SCL, PB7=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.timeout = Duration::from_millis(100);

    let i2c = I2c::new(
        p.I2C1, p.PB6, p.PB7, Irqs, p.DMA1_CH2, p.DMA1_CH3, i2c_config,
    );
    let lcd = Lcd1602::new(i2c, Delay);

    // Setup UART for the control unit (PA2=TX, PA3=RX on F042K6)
    let link_config = uart_config(&config.link);
    let uart = BufferedUart::new(
        p.USART2,
        p.PA3, // RX
        p.PA2, // TX
        TX_BUF.init([0u8; 16]),
        RX_BUF.init([0u8; 16]),
        Irqs,
        doorlock_hal_stm32f0::uart_config(&link_config),
    )
    .unwrap();
    let (tx, rx) = uart.split();
    let link = SerialLink::new(rx, tx);

    info!(
        "UART initialized: {} baud, {}us per byte",
        link_config.baudrate,
        link_config.char_time_us()
    );

    // Setup keypad (rows PA0, PA1, PA4, PA5; columns PA6, PA7, PB0, PB1)
    let rows = [
        StmOutput::new(Output::new(p.PA0, Level::High, Speed::Low)),
        StmOutput::new(Output::new(p.PA1, Level::High, Speed::Low)),
        StmOutput::new(Output::new(p.PA4, Level::High, Speed::Low)),
        StmOutput::new(Output::new(p.PA5, Level::High, Speed::Low)),
    ];
    let cols = [
        StmInput::new(Input::new(p.PA6, Pull::Up)),
        StmInput::new(Input::new(p.PA7, Pull::Up)),
        StmInput::new(Input::new(p.PB0, Pull::Up)),
        StmInput::new(Input::new(p.PB1, Pull::Up)),
    ];
    let keypad = MatrixKeypad::new(rows, cols, Delay, KeypadConfig::default());

    let runner = HmiRunner::new(link, keypad, SharedScreen, Delay, config);

    // Spawn tasks
    spawner
        .spawn(lcd_task(lcd, config.ui.cursor_blink_ms))
        .unwrap();
    spawner.spawn(terminal_task(runner)).unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> LockConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) if config.validate().is_ok() => config,
        Ok(config) => {
            warn!("Embedded config rejected: {:?}", config.validate());
            LockConfig::default()
        }
        Err(e) => {
            warn!("Failed to parse embedded config: {:?}", e);
            LockConfig::default()
        }
    }
}

/// Terminal task - runs the password session
#[embassy_executor::task]
async fn terminal_task(mut runner: TerminalRunner) {
    info!("Terminal task started");

    let mut result = runner.boot().await;

    loop {
        match result {
            Ok(()) => {
                trace!("State: {:?}", runner.session().state());
                result = runner.step().await;
            }
            Err(HmiError::Link(LinkError::Io)) => {
                if let Some(kind) = runner.link().last_error() {
                    warn!("UART error: {:?}", Debug2Format(&kind));
                }
                result = runner.resume().await;
            }
            Err(e) => {
                warn!("Terminal error: {:?}", e);
                Timer::after(Duration::from_millis(10)).await;
                result = runner.resume().await;
            }
        }
    }
}

/// LCD update task
///
/// Redraws on every screen change and toggles the entry cursor every
/// blink half-period.
#[embassy_executor::task]
async fn lcd_task(mut lcd: TerminalLcd, blink_ms: u32) {
    info!("LCD task started");

    while let Err(e) = lcd.init().await {
        error!("Failed to initialize LCD: {:?}", e);
        Timer::after(Duration::from_secs(1)).await;
    }
    info!("LCD initialized");

    let blink = Duration::from_millis(u64::from(blink_ms));
    let mut cursor_on = true;

    loop {
        match select(SCREEN_REFRESH.wait(), Timer::after(blink)).await {
            // Keep the cursor solid while the screen is changing
            Either::First(()) => cursor_on = true,
            Either::Second(()) => cursor_on = !cursor_on,
        }

        let screen = SharedScreen::take_snapshot();
        if let Err(e) = lcd.render(&screen, cursor_on).await {
            warn!("LCD update failed: {:?}", e);
        } else {
            trace!("LCD updated");
        }
    }
}
