use crate::errors::TimecodeError;

// @module: SRT timecode parsing

/// Parse an SRT timestamp into fractional seconds.
///
/// Accepts both millisecond separators: `H:MM:SS,mmm` and `H:MM:SS.mmm`.
/// The millisecond part is optional. The hour field has no fixed width.
pub fn parse_timecode(raw: &str) -> Result<f64, TimecodeError> {
    let normalized = raw.trim().replace(',', ".");

    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() != 3 {
        return Err(TimecodeError::Malformed(raw.to_string()));
    }

    let hours: u64 = parse_field(parts[0], raw)?;
    let minutes: u64 = parse_field(parts[1], raw)?;

    let (seconds, millis) = match parts[2].split_once('.') {
        Some((whole, fraction)) => (parse_field(whole, raw)?, parse_field(fraction, raw)?),
        None => (parse_field(parts[2], raw)?, 0),
    };

    if seconds >= 60 || millis >= 1000 {
        return Err(TimecodeError::Malformed(raw.to_string()));
    }

    Ok((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

fn parse_field(field: &str, raw: &str) -> Result<u64, TimecodeError> {
    field
        .trim()
        .parse()
        .map_err(|_| TimecodeError::Malformed(raw.to_string()))
}
