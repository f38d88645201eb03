use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("invalid status value: {0}")]
    InvalidStatus(String),
    #[error("invalid record key: {0:?}")]
    InvalidKey(String),
}
