//! Error types for the integration crate.
//!
//! Errors become rootcause report contexts at the API boundary:
//! - `FormError`: Client-side rejections from the integration dialog

use std::fmt;

/// Errors from the integration dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The dialog is closed.
    NotOpen,
    /// A submit is already in flight.
    SubmissionInFlight,
    /// A required input is empty.
    MissingField { field: String, label: String },
    /// The selected service renders no input with this key.
    UnknownField { service: String, field: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOpen => write!(f, "integration form is not open"),
            Self::SubmissionInFlight => {
                write!(f, "integration is already being saved")
            }
            Self::MissingField { label, .. } => write!(f, "{label} is required"),
            Self::UnknownField { service, field } => {
                if service.is_empty() {
                    write!(f, "select a service before setting '{field}'")
                } else {
                    write!(f, "service '{service}' has no field '{field}'")
                }
            }
        }
    }
}

impl std::error::Error for FormError {}
