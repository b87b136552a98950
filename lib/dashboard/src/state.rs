//! Application state owned by the dashboard controller.

use crate::view::View;
use peakwave_integration::{IntegrationForm, IntegrationRegistry, LogPage, LogQuery};
use peakwave_platform_access::SessionState;

/// Everything the member can see.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Signed-in member.
    pub session: SessionState,
    /// Integrations as last listed by the server.
    pub registry: IntegrationRegistry,
    /// Last loaded log page.
    pub logs: LogPage,
    /// Filter used for the last log load.
    pub log_query: LogQuery,
    /// Integration dialog.
    pub form: IntegrationForm,
    /// Current screen.
    pub view: View,
}

impl AppState {
    /// Drops all member data and returns to the sign-in screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
