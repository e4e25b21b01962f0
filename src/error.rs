//! 服務錯誤

use thiserror::Error;
use tonic::Status;

#[derive(Error, Debug)]
pub enum FoodRushError {
    #[error("unknown session {0}")]
    UnknownSession(u64),
    #[error("no round in progress")]
    NoRound,
    #[error("invalid difficulty code: {0}")]
    InvalidDifficulty(i32),
    #[error("invalid screen code: {0}")]
    InvalidScreen(i32),
    #[error("session state lock poisoned")]
    LockPoisoned,
    #[error("failed to read config")]
    ConfigIo {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    ConfigParse {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid listen address")]
    InvalidAddr {
        #[from]
        source: std::net::AddrParseError,
    },
}

impl From<FoodRushError> for Status {
    fn from(err: FoodRushError) -> Self {
        match err {
            FoodRushError::UnknownSession(_) => Status::not_found(err.to_string()),
            FoodRushError::NoRound => Status::failed_precondition(err.to_string()),
            FoodRushError::InvalidDifficulty(_) | FoodRushError::InvalidScreen(_) => {
                Status::invalid_argument(err.to_string())
            }
            _ => Status::internal(err.to_string()),
        }
    }
}
