//! Configuration loading
//!
//! The configuration is compiled in from `lock.toml`; build.rs has already
//! checked it with a full TOML parser.

use defmt::*;

use doorlock_core::config::{parse_config, LockConfig};

/// Embedded configuration (compiled into firmware)
/// Edit lock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../lock.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to the built-in defaults if either step fails.
pub fn load_config() -> LockConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default configuration");
            return LockConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded config rejected: {:?}", e);
        warn!("Using default configuration");
        return LockConfig::default();
    }

    info!(
        "Door: hold={} close={} done={} ticks of {}ms at {}%",
        config.door.hold_tick,
        config.door.close_tick,
        config.door.done_tick,
        config.door.tick_ms,
        config.door.speed_percent
    );
    debug!(
        "Link: {} baud, parity {:?}; store: {:?}",
        config.link.baudrate, config.link.parity, config.store.backend
    );
    config
}
