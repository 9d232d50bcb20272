use thiserror::Error;

/// Top-level client error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned HTTP {status} for {endpoint}: {detail}")]
    Status {
        endpoint: String,
        status: u16,
        detail: String,
    },

    #[error("Could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl AppError {
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Transport { endpoint: endpoint.into(), source }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport { .. })
    }

    pub fn is_status(&self) -> bool {
        matches!(self, AppError::Status { .. })
    }

    /// HTTP status code when the backend answered with a non-success status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Reasons a chat submission is refused before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("Message is empty")]
    Blank,

    #[error("Still waiting for the previous reply")]
    AwaitingReply,
}
