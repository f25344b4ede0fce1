//! Error types for unredact-client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Could not reach prediction service: {0}")]
    Transport(String),

    #[error("Prediction service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from prediction service: {0}")]
    MalformedResponse(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::MalformedResponse(error.to_string())
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}
