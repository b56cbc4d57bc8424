//! Simple TOML parser for lock configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `lock.toml`; arrays, tables-in-tables and floats are rejected.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - Hex integers (`0x0001`) and `_` digit separators
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown sections and keys are skipped so one file can serve both units.

use super::types::{LockConfig, Parity, StoreBackend};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Door,
    Lockout,
    Ui,
    Link,
    Store,
    Unknown,
}

/// Parse TOML configuration into LockConfig
///
/// Missing keys keep their defaults.
pub fn parse_config(input: &str) -> Result<LockConfig, ParseError> {
    let mut config = LockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let line = strip_comment(line);
    if !line.ends_with(']') || line.len() < 3 {
        return Err(ParseError::InvalidSection);
    }

    let section = match line[1..line.len() - 1].trim() {
        "door" => Section::Door,
        "lockout" => Section::Lockout,
        "ui" => Section::Ui,
        "link" => Section::Link,
        "store" => Section::Store,
        "" => return Err(ParseError::InvalidSection),
        _ => Section::Unknown,
    };
    Ok(section)
}

fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        // Only strip if the # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut digits = [0u8; 24];
    let mut len = 0;
    for byte in value.bytes().filter(|&b| b != b'_') {
        let slot = digits.get_mut(len).ok_or(ParseError::InvalidValue)?;
        *slot = byte;
        len += 1;
    }
    let cleaned = core::str::from_utf8(&digits[..len]).map_err(|_| ParseError::InvalidValue)?;

    let parsed = match cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse::<u64>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(parsed).map_err(|_| ParseError::InvalidValue)
}

fn parse_parity(value: &str) -> Result<Parity, ParseError> {
    match parse_string(value) {
        "none" => Ok(Parity::None),
        "even" => Ok(Parity::Even),
        "odd" => Ok(Parity::Odd),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_backend(value: &str) -> Result<StoreBackend, ParseError> {
    match parse_string(value) {
        "eeprom" => Ok(StoreBackend::Eeprom),
        "flash" => Ok(StoreBackend::Flash),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut LockConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Door => match key {
            "hold_tick" => config.door.hold_tick = parse_int(value)?,
            "close_tick" => config.door.close_tick = parse_int(value)?,
            "done_tick" => config.door.done_tick = parse_int(value)?,
            "tick_ms" => config.door.tick_ms = parse_int(value)?,
            "speed_percent" => config.door.speed_percent = parse_int(value)?,
            _ => {}
        },
        Section::Lockout => match key {
            "max_failures" => config.lockout.max_failures = parse_int(value)?,
            "alarm_dwell_ms" => config.lockout.alarm_dwell_ms = parse_int(value)?,
            _ => {}
        },
        Section::Ui => match key {
            "message_ms" => config.ui.message_ms = parse_int(value)?,
            "key_settle_ms" => config.ui.key_settle_ms = parse_int(value)?,
            "cursor_blink_ms" => config.ui.cursor_blink_ms = parse_int(value)?,
            _ => {}
        },
        Section::Link => match key {
            "baudrate" | "baud" => config.link.baudrate = parse_int(value)?,
            "parity" => config.link.parity = parse_parity(value)?,
            _ => {}
        },
        Section::Store => match key {
            "backend" => config.store.backend = parse_backend(value)?,
            "base_address" => config.store.base_address = parse_int(value)?,
            "write_attempts" => config.store.write_attempts = parse_int(value)?,
            _ => {}
        },
        Section::Root | Section::Unknown => {}
    }

    Ok(())
}
