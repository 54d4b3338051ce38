//! Error types for the homework watcher
//!
//! Each failure site of a poll cycle has its own error enum so the log line
//! says exactly which contract was violated. [`WatchError`] aggregates them.

/// Fatal startup problems. The poll loop never starts when one of these occurs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why a status API request failed
#[derive(Debug, thiserror::Error)]
pub enum FetchCause {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

/// A failed status API request, with enough context to diagnose it from the logs
#[derive(Debug, thiserror::Error)]
#[error("Status API request to {endpoint} (headers: {headers:?}) failed: {cause}")]
pub struct FetchError {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub cause: FetchCause,
}

/// The status API answered, but not with the documented shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("API response is not a JSON object")]
    NotAnObject,

    #[error("API response has no 'homeworks' key")]
    MissingHomeworks,

    #[error("API response 'homeworks' is not a list")]
    HomeworksNotAList,

    #[error("API response has no 'current_date' key")]
    MissingCurrentDate,

    #[error("API response 'current_date' is not an integer: {0}")]
    CurrentDateNotInteger(String),
}

/// A homework record that cannot be turned into a notification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("Homework record has no 'homework_name'")]
    MissingName,

    #[error("Homework record has no 'status'")]
    MissingStatus,

    #[error("Unrecognized homework status '{0}'")]
    UnrecognizedStatus(String),
}

/// Errors that can occur in the homework watcher
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("Message delivery failed: {0}")]
    Delivery(String),

    #[error("Poll cycle aborted: {0}")]
    Cycle(String),
}

/// Result type alias for watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;
