use std::path::PathBuf;
use thiserror::Error;

/// The one failure an API operation can produce.
///
/// Callers only ever see the operation's message ("Failed to fetch tickets").
/// The underlying cause stays reachable through `source()` for logs and tests.
#[derive(Error, Debug)]
#[error("{operation}")]
pub struct RequestFailed {
    pub operation: &'static str,
    #[source]
    pub cause: FailureCause,
}

#[derive(Error, Debug)]
pub enum FailureCause {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RequestFailed {
    pub fn new(operation: &'static str, cause: FailureCause) -> Self {
        Self { operation, cause }
    }

    /// HTTP status of the failed response, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self.cause {
            FailureCause::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error(transparent)]
    Request(#[from] RequestFailed),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(
        "No acting user. Pass --as-user, set HELPDESK_USER_ID or add user_id to ~/.config/helpdesk/config.toml"
    )]
    MissingUser,

    #[error("Invalid value for {field}: {value}")]
    InvalidInput { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;

pub type ApiResult<T> = std::result::Result<T, RequestFailed>;
