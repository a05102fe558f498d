use thiserror::Error;
use validator::ValidationError;

use crate::constants::{DRAW_IN_PROGRESS_ERROR, EMPTY_ENTRIES_ERROR};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("{}", EMPTY_ENTRIES_ERROR)]
    EmptyEntries,

    #[error("number of winners must be a positive whole number, got {raw:?}")]
    InvalidWinnerCount { raw: String },

    #[error("invalid draw policy: {reason}")]
    InvalidPolicy { reason: String },

    #[error("{colors} colors supplied for {entries} entries")]
    ColorMismatch { entries: usize, colors: usize },

    #[error("{}", DRAW_IN_PROGRESS_ERROR)]
    DrawInProgress,

    #[error("validation failed: {0}")]
    Validation(ValidationError),
}

impl From<ValidationError> for WheelError {
    fn from(err: ValidationError) -> Self {
        WheelError::Validation(err)
    }
}

impl WheelError {
    /// Message shown to the user in the page's error banner.
    pub fn user_message(&self) -> String {
        match self {
            WheelError::InvalidWinnerCount { .. } => {
                crate::constants::INVALID_WINNER_COUNT_ERROR.to_string()
            }
            other => other.to_string(),
        }
    }
}
