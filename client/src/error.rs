use thiserror::Error;

/// Failure of a call to the content service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Non-success response or transport failure. `status` is `None` when no
    /// response was received or its body could not be decoded.
    #[error("{message}")]
    Request { status: Option<u16>, message: String },

    /// A request failure whose message says the post does not exist.
    #[error("{message}")]
    NotFound { status: Option<u16>, message: String },
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            Self::Request { message, .. } | Self::NotFound { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } | Self::NotFound { status, .. } => *status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Reclassifies a request failure as [`ClientError::NotFound`] when its
    /// message contains "not found" (case-sensitive). The wire format carries
    /// no error code, so the message is all there is to go on.
    pub(crate) fn classify_not_found(self) -> Self {
        match self {
            Self::Request { status, message } if message.contains("not found") => {
                Self::NotFound { status, message }
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Client-side form validation failure, raised before any request is sent.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Fields(#[from] validator::ValidationErrors),

    #[error("unknown city: {0}")]
    UnknownCity(String),
}
