use crate::form::FieldErrors;
use thiserror::Error;

/// Everything that can go wrong between the form and the allocation endpoint
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, timeout, or a reply that is not an allocation payload
    #[error("Network error: {message}")]
    Network { message: String },

    /// The endpoint answered with an explicit `{ error }` payload
    #[error("{message}")]
    Remote { message: String },

    /// The endpoint answered but did not confirm the submission
    #[error("Submission was not accepted")]
    Rejected,

    /// Client-side validation failed; nothing was sent
    #[error("Invalid form: {0}")]
    Validation(FieldErrors),

    #[error("A submission is already in progress")]
    SubmissionInProgress,
}

impl ClientError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn remote<S: Into<String>>(message: S) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network(format!("request timed out: {}", err))
        } else {
            Self::network(err.to_string())
        }
    }
}
