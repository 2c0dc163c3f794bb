// Shell error types
use thiserror::Error;

/// Errors surfaced by the session store, API client, storage and router.
///
/// Guards never produce an error; they always resolve to proceed or redirect.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Transport failure (connection refused, DNS, TLS, body decode)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("request rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Token cannot be carried in an HTTP header
    #[error("session token is not a valid header value")]
    InvalidToken,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Guards kept redirecting without settling on a route
    #[error("navigation to '{0}' exceeded the redirect limit")]
    RedirectLoop(String),
}

impl ShellError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ShellError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// HTTP status when the failure came from the server
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ShellError::Rejected { status, .. } => Some(*status),
            ShellError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Stable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ShellError::Network(_) => "NETWORK_ERROR",
            ShellError::Rejected { status: 401, .. } => "UNAUTHORIZED",
            ShellError::Rejected { status: 403, .. } => "FORBIDDEN",
            ShellError::Rejected { .. } => "REQUEST_REJECTED",
            ShellError::InvalidBaseUrl(_) => "INVALID_BASE_URL",
            ShellError::InvalidToken => "INVALID_TOKEN",
            ShellError::Io(_) => "STORAGE_IO",
            ShellError::Json(_) => "STORAGE_FORMAT",
            ShellError::RedirectLoop(_) => "REDIRECT_LOOP",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
