//! Normalizes track-list times into `HH:MM:SS`.

use chrono::{NaiveTime, Timelike};

use crate::Result;
use crate::error::Error;

const COMPONENTS: usize = 3;

/// Normalizes a `separator`-joined time of one to three components into
/// `HH:MM:SS`. The rightmost component is always seconds.
///
/// Components are range checked: minute 99, second 60, hour 24 or more than
/// three components are rejected instead of wrapped.
pub fn normalize_time(value: &str, separator: char) -> Result<String> {
    let trimmed = value.trim();
    let mut components: Vec<&str> = trimmed.split(separator).collect();
    if components.len() > COMPONENTS {
        return Err(Error::invalid_time(value));
    }
    while components.len() < COMPONENTS {
        components.insert(0, "00");
    }
    if components
        .iter()
        .any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(Error::invalid_time(value));
    }

    let joined = components.join(":");
    let time = NaiveTime::parse_from_str(&joined, "%H:%M:%S")
        .map_err(|_| Error::invalid_time(value))?;
    // The parser accepts second 60 as a leap second.
    if time.nanosecond() >= 1_000_000_000 {
        return Err(Error::invalid_time(value));
    }
    Ok(time.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_time;

    #[test]
    fn pads_missing_components() {
        assert_eq!(normalize_time("30", ':').unwrap(), "00:00:30");
        assert_eq!(normalize_time("5:30", ':').unwrap(), "00:05:30");
        assert_eq!(normalize_time("1:05:30", ':').unwrap(), "01:05:30");
        assert_eq!(normalize_time("0:00", ':').unwrap(), "00:00:00");
    }

    #[test]
    fn honours_custom_separator() {
        assert_eq!(normalize_time("4.45", '.').unwrap(), "00:04:45");
        assert_eq!(normalize_time("1-2-3", '-').unwrap(), "01:02:03");
        assert!(normalize_time("4:45", '.').is_err());
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(normalize_time("99:00", ':').is_err());
        assert!(normalize_time("24:00:00", ':').is_err());
        assert!(normalize_time("1:75", ':').is_err());
        assert!(normalize_time("1:60", ':').is_err());
        assert!(normalize_time("60", ':').is_err());
        assert!(normalize_time("23:59:60", ':').is_err());
        assert_eq!(normalize_time("23:59:59", ':').unwrap(), "23:59:59");
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(normalize_time("", ':').is_err());
        assert!(normalize_time("1::30", ':').is_err());
        assert!(normalize_time("1:2:3:4", ':').is_err());
        assert!(normalize_time("1:3a", ':').is_err());
        assert!(normalize_time("-1:30", ':').is_err());
        assert!(normalize_time("100:00:00", ':').is_err());
    }
}
