use chrono::NaiveTime;

use super::StoreError;

pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a strict 24-hour `HH:MM` value.
///
/// Both fields must be two digits, so `"9:30"` and `"09:5"` are rejected even
/// though chrono alone would accept them.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, StoreError> {
    let invalid = || StoreError::InvalidTime(input.to_string());

    let bytes = input.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(input, TIME_FORMAT).map_err(|_| invalid())
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Serde adapter keeping `NaiveTime` as `"HH:MM"` on disk.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(de::Error::custom)
    }
}
