use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse "HH:MM" into minutes since midnight. "24:00" is accepted as the
/// end-of-day boundary.
pub fn parse_hhmm(raw: &str) -> Result<u16> {
    let malformed = || Error::Validation(format!("malformed time of day: '{}'", raw));

    let (hours, minutes) = raw.trim().split_once(':').ok_or_else(malformed)?;
    let hours: u16 = hours.parse().map_err(|_| malformed())?;
    let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
    if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}
