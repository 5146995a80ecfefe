use crate::application::errors::ApplicationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum AdminError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<ApplicationError> for AdminError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::ValidationError(msg) => AdminError::BadRequest(msg),
            ApplicationError::NotFound(msg) => AdminError::NotFound(msg),
            ApplicationError::InternalError(msg) => AdminError::InternalServerError(msg),
            ApplicationError::ServiceError(msg) => AdminError::InternalServerError(msg),
        }
    }
}
