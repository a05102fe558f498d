use validator::ValidationError;

use crate::error::WheelError;

pub fn validate_entry(entry: &str) -> Result<(), ValidationError> {
    if entry.trim().is_empty() {
        return Err(ValidationError::new("empty_entry"));
    }
    Ok(())
}

pub fn validate_winner_count(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(count) if count >= 1 => Ok(()),
        _ => Err(ValidationError::new("invalid_winner_count")),
    }
}

/// Parses the winner-count control's value. Anything that is not a positive
/// integer is a configuration error and no draw may start.
pub fn parse_winner_count(raw: &str) -> Result<usize, WheelError> {
    let invalid = || WheelError::InvalidWinnerCount { raw: raw.to_string() };
    validate_winner_count(raw).map_err(|_| invalid())?;
    raw.trim().parse::<usize>().map_err(|_| invalid())
}
