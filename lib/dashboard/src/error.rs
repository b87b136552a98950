//! Dashboard error types.

use peakwave_api::ApiError;
use peakwave_core::IntegrationId;
use peakwave_integration::FormError;
use peakwave_platform_access::AuthenticationError;
use std::fmt;

/// Why a dashboard operation failed.
///
/// The user has already been told through the notifier by the time one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The members API call failed.
    Api(ApiError),
    /// The integration form rejected the action.
    Form(FormError),
    /// Local session or credential check failed.
    Authentication(AuthenticationError),
    /// No integration with this ID is loaded.
    UnknownIntegration { id: IntegrationId },
}

impl DashboardError {
    /// Returns the API error, if the failure came from the server.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::Form(err) => write!(f, "{err}"),
            Self::Authentication(err) => write!(f, "{err}"),
            Self::UnknownIntegration { id } => write!(f, "integration {id} not found"),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<ApiError> for DashboardError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<FormError> for DashboardError {
    fn from(err: FormError) -> Self {
        Self::Form(err)
    }
}

impl From<AuthenticationError> for DashboardError {
    fn from(err: AuthenticationError) -> Self {
        Self::Authentication(err)
    }
}
