use models::errors::ModelError;
use thiserror::Error;

pub const INVALID_MESSAGE_ID: &str = "Invalid message id.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("remote store error: {0}")]
    Remote(String),
    #[error("seed data error: {0}")]
    Seed(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::InvalidEmail(addr) => Self::InvalidEmail(addr),
            ModelError::InvalidStatus(_) => Self::Validation(format!(
                "Invalid status value. Allowed: {}",
                models::contact::MessageStatus::allowed_list()
            )),
            ModelError::InvalidKey(_) => Self::Validation(INVALID_MESSAGE_ID.into()),
        }
    }
}

impl ServiceError {
    pub fn remote(e: impl std::fmt::Display) -> Self { Self::Remote(e.to_string()) }
}
