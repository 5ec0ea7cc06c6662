use answer_pool_client::ClientError;
use std::fmt;

/// Main error type for the answer-pool CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration-related errors
    Config(String),
    /// Form fields rejected before anything was sent
    Validation(String),
    /// The allocation endpoint refused the request
    Remote(String),
    /// The allocation endpoint could not be reached
    Communication(String),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Validation(msg) => write!(f, "Invalid input: {msg}"),
            CliError::Remote(msg) => write!(f, "Rejected: {msg}"),
            CliError::Communication(msg) => write!(f, "Communication error: {msg}"),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Validation(_) => 4,
            CliError::Remote(_) => 5,
            CliError::Communication(_) => 7,
            CliError::Other(_) => 1,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network { .. } => CliError::Communication(err.to_string()),
            ClientError::Validation(errors) => CliError::Validation(errors.to_string()),
            ClientError::Remote { .. } | ClientError::Rejected => CliError::Remote(err.to_string()),
            ClientError::SubmissionInProgress => CliError::Other(anyhow::anyhow!(err.to_string())),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Other(err.into())
    }
}
