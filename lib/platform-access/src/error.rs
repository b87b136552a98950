//! Error types for the platform-access crate.
//!
//! Errors become rootcause report contexts at the API boundary:
//! - `AuthenticationError`: Client-side rejections before any identity call

use std::fmt;

/// Errors raised locally by the session holder and the auth forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Nobody is signed in.
    NotAuthenticated,
    /// A required input is empty.
    MissingField { field: String },
    /// New password and its confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::PasswordMismatch => write!(f, "New passwords do not match"),
        }
    }
}

impl std::error::Error for AuthenticationError {}
