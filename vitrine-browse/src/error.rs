use thiserror::Error;

use crate::carousel::types::{Direction, RowKey};

#[derive(Error, Debug)]
pub enum BrowseError {
    #[error("Shift already in flight; advance ignored")]
    ShiftInFlight,

    #[error("No more pages in direction {0:?}")]
    NoMorePages(Direction),

    #[error("No carousel registered for row {0:?}")]
    RowNotFound(RowKey),

    #[error("Core error: {0}")]
    Core(#[from] vitrine_core::CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BrowseError>;
