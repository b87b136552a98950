//! API error types.
//!
//! Every failed call ends up as exactly one `ApiError` variant:
//! - `Network`: The request never produced an HTTP response
//! - `Auth`: 401 anywhere, or any 4xx from login/registration
//! - `Validation`: Other 4xx, usually with a server message
//! - `Server`: 5xx and anything else outside 2xx
//! - `Encode`/`Decode`: Body (de)serialization failures

use std::fmt;

/// Failure below HTTP: connection refused, DNS, TLS, broken body stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// Error details.
    pub details: String,
}

impl TransportError {
    /// Creates a transport error.
    #[must_use]
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.details)
    }
}

impl std::error::Error for TransportError {}

/// Members API errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response was received.
    Network {
        /// Error details.
        details: String,
    },
    /// Credentials rejected or session missing.
    Auth {
        /// HTTP status.
        status: u16,
        /// The server's `error` message.
        message: Option<String>,
    },
    /// Request rejected by server-side validation.
    Validation {
        /// HTTP status.
        status: u16,
        /// The server's `error` message.
        message: Option<String>,
    },
    /// Server-side failure.
    Server {
        /// HTTP status.
        status: u16,
        /// The server's `error` message.
        message: Option<String>,
    },
    /// Request body could not be serialized.
    Encode {
        /// Error details.
        details: String,
    },
    /// Success body did not have the expected shape.
    Decode {
        /// Error details.
        details: String,
    },
}

impl ApiError {
    /// Maps a non-2xx status and its `{error}` message to a variant.
    ///
    /// `credential_endpoint` marks login and registration, where every client
    /// error is a credential problem.
    #[must_use]
    pub fn from_status(status: u16, message: Option<String>, credential_endpoint: bool) -> Self {
        match status {
            401 => Self::Auth { status, message },
            400..=499 if credential_endpoint => Self::Auth { status, message },
            400..=499 => Self::Validation { status, message },
            _ => Self::Server { status, message },
        }
    }

    /// Returns the message the server sent, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Auth { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => {
                message.as_deref().filter(|m| !m.is_empty())
            }
            Self::Network { .. } | Self::Encode { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns the server message, or `fallback` when there is none.
    #[must_use]
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }

    /// Returns true if no HTTP response was received.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns true for a 401 or rejected credentials.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Network {
            details: err.details,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = |message: &Option<String>| {
            message
                .as_deref()
                .map(|m| format!(": {m}"))
                .unwrap_or_default()
        };
        match self {
            Self::Network { details } => write!(f, "network error: {details}"),
            Self::Auth { status, message } => {
                write!(f, "authentication failed ({status}){}", detail(message))
            }
            Self::Validation { status, message } => {
                write!(f, "request rejected ({status}){}", detail(message))
            }
            Self::Server { status, message } => {
                write!(f, "server error ({status}){}", detail(message))
            }
            Self::Encode { details } => write!(f, "failed to encode request: {details}"),
            Self::Decode { details } => write!(f, "unexpected response body: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}
