//! UART support for STM32F0
//!
//! Maps the link framing onto embassy-stm32.

use doorlock_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use embassy_stm32::usart;

/// Translate the link framing into an embassy-stm32 USART config
///
/// The peripheral counts the parity bit as a data bit; embassy selects
/// the 9-bit word length when parity is enabled on 8-bit data.
pub fn uart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}
