//! Build script for doorlock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates lock.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate lock.toml at compile time
///
/// The firmware's own parser only knows a subset of TOML; catching syntax
/// and range errors here keeps a bad file from silently falling back to
/// defaults on the board.
fn validate_config() {
    println!("cargo:rerun-if-changed=lock.toml");

    let config_path = Path::new("lock.toml");
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read lock.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in lock.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_door(&config, &mut errors);
    validate_lockout(&config, &mut errors);
    validate_link(&config, &mut errors);
    validate_store(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in lock.toml", &errors);
    }

    println!("cargo:warning=lock.toml validated successfully");
}

fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn string<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    config.get(section)?.get(key)?.as_str()
}

/// Door ticks must be strictly increasing
fn validate_door(config: &toml::Value, errors: &mut Vec<String>) {
    let hold = int(config, "door", "hold_tick").unwrap_or(15);
    let close = int(config, "door", "close_tick").unwrap_or(18);
    let done = int(config, "door", "done_tick").unwrap_or(33);

    if !(0 < hold && hold < close && close < done && done <= i64::from(u16::MAX)) {
        errors.push(format!(
            "[door] ticks must satisfy 0 < hold < close < done (got {}, {}, {})",
            hold, close, done
        ));
    }
    if let Some(speed) = int(config, "door", "speed_percent") {
        if !(0..=100).contains(&speed) {
            errors.push("[door] speed_percent must be 0-100".to_string());
        }
    }
    if int(config, "door", "tick_ms") == Some(0) {
        errors.push("[door] tick_ms must not be 0".to_string());
    }
}

fn validate_lockout(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(max) = int(config, "lockout", "max_failures") {
        if !(1..=255).contains(&max) {
            errors.push("[lockout] max_failures must be 1-255".to_string());
        }
    }
}

fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(parity) = string(config, "link", "parity") {
        if !["none", "even", "odd"].contains(&parity) {
            errors.push("[link] parity must be 'none', 'even', or 'odd'".to_string());
        }
    }
    if let Some(baud) = int(config, "link", "baudrate") {
        if baud <= 0 {
            errors.push("[link] baudrate must be positive".to_string());
        }
    }
}

fn validate_store(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(backend) = string(config, "store", "backend") {
        if !["eeprom", "flash"].contains(&backend) {
            errors.push("[store] backend must be 'eeprom' or 'flash'".to_string());
        }
    }
    if let Some(attempts) = int(config, "store", "write_attempts") {
        if !(1..=255).contains(&attempts) {
            errors.push("[store] write_attempts must be 1-255".to_string());
        }
    }
}

/// Abort the build with a boxed error listing
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
