use std::time::Duration;

use thiserror::Error;
use unredact_client::ClientError;

/// Failure of one unredaction round trip.
///
/// Display strings are meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnredactionError {
    #[error("Could not reach the prediction service: {0}")]
    Transport(String),

    #[error("The prediction service sent an unreadable response: {0}")]
    MalformedResponse(String),

    #[error("Expected {expected} predicted words but received {received}")]
    ReconciliationMismatch { expected: usize, received: usize },

    #[error("The prediction service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("An unredaction request is already running for this document")]
    AlreadyInFlight,

    #[error("The document was edited while predictions were loading; results were discarded")]
    DocumentChanged,
}

impl From<ClientError> for UnredactionError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::MalformedResponse(message) => UnredactionError::MalformedResponse(message),
            other => UnredactionError::Transport(other.to_string()),
        }
    }
}
