//! Error types for the API client
//!
//! Non-2xx responses are normalized into [`ApiError::Api`], whose display is
//! exactly the human-readable message derived from the backend's `detail`
//! field (or the operation's fallback message).

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Separator between rendered validation issues
const ISSUE_SEPARATOR: &str = " | ";

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure, propagated as reported by the HTTP client
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// A 2xx response whose body was not valid JSON, or a payload that could
    /// not be serialized
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend rejected the request
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: StatusCode,
        /// Normalized, human-readable message
        message: String,
        /// Decoded `detail` payload, when the error body carried one
        detail: Option<ErrorDetail>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller input that could not be turned into a request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Credential storage could not be read or written
    #[error("Credential storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status of a backend rejection
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if status.is_client_error())
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if status.is_server_error())
    }

    /// Check if the backend rejected the credential
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// The `detail` field of a backend error body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A plain message
    Message(String),
    /// Request validation failures
    ValidationErrors(Vec<ValidationIssue>),
}

impl ErrorDetail {
    /// Render the detail into a single message.
    ///
    /// Validation issues render as `"<last loc segment>: <msg>"` joined by `" | "`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::ValidationErrors(issues) => issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(ISSUE_SEPARATOR),
        }
    }
}

/// One validation failure reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationIssue {
    /// Location of the offending field, outermost first
    #[serde(default)]
    pub loc: Vec<LocSegment>,
    /// Failure message
    pub msg: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.loc.last() {
            Some(field) => write!(f, "{field}: {}", self.msg),
            None => f.write_str(&self.msg),
        }
    }
}

/// A segment of a validation location path
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    /// Named field
    Key(String),
    /// Sequence index
    Index(u64),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
}

/// Decode a `detail` payload from a raw error body.
///
/// Returns `None` when the body is not JSON, has no `detail`, or the detail
/// has neither of the known shapes.
#[must_use]
pub fn decode_detail(body: &[u8]) -> Option<ErrorDetail> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
}

/// Build the normalized failure for a non-2xx response.
pub fn normalize(status: StatusCode, body: &[u8], fallback: &str) -> ApiError {
    let detail = decode_detail(body);
    let message = detail
        .as_ref()
        .map(ErrorDetail::render)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    ApiError::Api {
        status,
        message,
        detail,
    }
}
