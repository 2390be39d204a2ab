use std::time::Duration;

use crate::error::ConfigError;

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse interval strings like "60s", "1.5m", "500ms", "2h". A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        value: s.to_string(),
        reason: reason.to_string(),
    };

    let (val_str, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| s.strip_suffix(suffix).map(|v| (v, *multiplier)))
        .unwrap_or((s, 1_000.0));

    let val: f64 = val_str.trim().parse().map_err(|_| invalid("not a number"))?;
    if !val.is_finite() || val < 0.0 {
        return Err(invalid("must be a finite, non-negative value"));
    }

    Duration::try_from_secs_f64(val * multiplier / 1_000.0).map_err(|_| invalid("out of range"))
}

/// Format a duration using the largest unit that divides it evenly.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis == 0 {
        "0s".to_string()
    } else if millis % 3_600_000 == 0 {
        format!("{}h", millis / 3_600_000)
    } else if millis % 60_000 == 0 {
        format!("{}m", millis / 60_000)
    } else if millis % 1_000 == 0 {
        format!("{}s", millis / 1_000)
    } else {
        format!("{}ms", millis)
    }
}
