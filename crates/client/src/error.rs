use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single backend operation.
///
/// Nothing is retried; each error ends the operation that produced it and is
/// turned into a [`Notice`](crate::notice::Notice) at the screen boundary.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No connection to the backend at all (DNS, refused, timeout).
    #[error("Network Error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("realtime connection error: {0}")]
    Realtime(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("realtime connection is not open")]
    NotConnected,

    /// Rejected locally before anything was sent.
    #[error("{0}")]
    Invalid(String),
}

impl ClientError {
    /// Reason supplied by the server in the `detail` field, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e)
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Realtime(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
