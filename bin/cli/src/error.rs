//! CLI error types.

use peakwave_dashboard::DashboardError;
use peakwave_integration::FormError;
use std::fmt;
use std::path::PathBuf;

/// Why a command failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Configuration could not be loaded.
    Config { details: String },
    /// The session file could not be read or written.
    SessionFile { path: PathBuf, details: String },
    /// The HTTP transport could not be set up.
    Transport { details: String },
    /// No live session; the member must log in first.
    NotSignedIn,
    /// The session check itself failed (network, server error).
    SessionCheck { details: String },
    /// Command output could not be written.
    Output { details: String },
    /// An input was rejected before anything was sent.
    InvalidInput { details: String },
    /// A dashboard operation failed; its toast has already been shown.
    Operation(DashboardError),
}

impl CliError {
    /// Returns true if the member has already been told about this failure.
    #[must_use]
    pub fn already_reported(&self) -> bool {
        matches!(self, Self::Operation(_))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "failed to load configuration: {details}"),
            Self::SessionFile { path, details } => {
                write!(f, "session file {}: {details}", path.display())
            }
            Self::Transport { details } => write!(f, "failed to set up HTTP client: {details}"),
            Self::NotSignedIn => write!(f, "not signed in; run `peakwave login` first"),
            Self::SessionCheck { details } => write!(f, "could not check session: {details}"),
            Self::Output { details } => write!(f, "failed to write output: {details}"),
            Self::InvalidInput { details } => write!(f, "{details}"),
            Self::Operation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<DashboardError> for CliError {
    fn from(err: DashboardError) -> Self {
        Self::Operation(err)
    }
}

impl From<FormError> for CliError {
    fn from(err: FormError) -> Self {
        Self::InvalidInput {
            details: err.to_string(),
        }
    }
}
