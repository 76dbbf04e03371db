use thiserror::Error;

use crate::model::PulseId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid config file: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown pulse reading: {0}")]
    UnknownPulse(PulseId),
}
