//! The dashboard controller.

use crate::confirm::{Confirm, DELETE_PROMPT};
use crate::error::DashboardError;
use crate::loading::LoadingIndicator;
use crate::notify::{Notifier, Toast, ToastLevel};
use crate::state::AppState;
use crate::view::{Section, View};
use peakwave_api::{ApiClient, ApiError, TestOutcome, Transport};
use peakwave_core::IntegrationId;
use peakwave_integration::{
    FormMode, Integration, IntegrationForm, IntegrationRegistry, LogPage, LogQuery, TestSummary,
};
use peakwave_platform_access::{
    Credentials, PasswordChange, ProfileUpdate, Registration, SessionState, User,
};
use rootcause::prelude::Report;
use tracing::{debug, info, instrument, warn};

/// Drives the members area.
///
/// Each operation shows the loading indicator while it talks to the server
/// and reports its own outcome as one toast. On failure the state keeps its
/// previous value and the error is returned for inspection.
///
/// Create, update and delete are followed by a list refresh. The write's
/// result covers the write only; a failed refresh toasts on its own, so a
/// successful write can be followed by a "Failed to load integrations" toast.
pub struct Dashboard<T> {
    client: ApiClient<T>,
    state: AppState,
    notifier: Box<dyn Notifier>,
    loading: LoadingIndicator,
}

impl<T: Transport> Dashboard<T> {
    /// Creates a signed-out dashboard.
    #[must_use]
    pub fn new(client: ApiClient<T>, notifier: impl Notifier + 'static) -> Self {
        Self {
            client,
            state: AppState::default(),
            notifier: Box::new(notifier),
            loading: LoadingIndicator::new(),
        }
    }

    /// Returns the API client.
    #[must_use]
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Returns the whole application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the session holder.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.state.session
    }

    /// Returns the integrations last listed by the server.
    #[must_use]
    pub fn registry(&self) -> &IntegrationRegistry {
        &self.state.registry
    }

    /// Returns the last loaded log page.
    #[must_use]
    pub fn logs(&self) -> &LogPage {
        &self.state.logs
    }

    /// Returns the integration dialog.
    #[must_use]
    pub fn form(&self) -> &IntegrationForm {
        &self.state.form
    }

    /// Returns the integration dialog for editing its inputs.
    pub fn form_mut(&mut self) -> &mut IntegrationForm {
        &mut self.state.form
    }

    /// Returns the current screen.
    #[must_use]
    pub fn view(&self) -> View {
        self.state.view
    }

    /// Returns the loading indicator.
    #[must_use]
    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    fn toast(&self, level: ToastLevel, message: impl Into<String>) {
        let toast = Toast::new(level, message);
        debug!(level = %toast.level, message = %toast.message, "toast");
        self.notifier.notify(toast);
    }

    fn fail(&self, err: impl Into<DashboardError>, message: &str) -> Report<DashboardError> {
        self.toast(ToastLevel::Error, message);
        let err: DashboardError = err.into();
        err.into()
    }

    fn api_failure(&self, report: &Report<ApiError>, fallback: &str) -> Report<DashboardError> {
        let err = report.current_context().clone();
        let message = err.user_message(fallback).to_string();
        self.fail(err, &message)
    }

    // Session

    /// Asks the server who is signed in.
    ///
    /// On success the member lands on the dashboard section; otherwise on
    /// the sign-in form. A missing session is the normal signed-out case and
    /// shows no toast.
    ///
    /// # Errors
    ///
    /// Returns the API error when there is no live session.
    #[instrument(skip(self))]
    pub async fn check_session(&mut self) -> Result<User, Report<DashboardError>> {
        let result = {
            let _loading = self.loading.acquire("check_session");
            self.client.current_user().await
        };
        match result {
            Ok(user) => {
                self.enter(user.clone()).await;
                Ok(user)
            }
            Err(report) => {
                debug!(error = %report.current_context(), "no live session");
                self.state.view = View::Login;
                Err(DashboardError::Api(report.current_context().clone()).into())
            }
        }
    }

    async fn enter(&mut self, user: User) {
        self.state.session.sign_in(user);
        self.state.view = View::Main(Section::Dashboard);
        self.load_dashboard().await;
    }

    /// Signs in.
    ///
    /// # Errors
    ///
    /// Returns an error for empty inputs or rejected credentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<User, Report<DashboardError>> {
        if let Err(e) = credentials.validate() {
            let message = e.to_string();
            return Err(self.fail(e, &message));
        }
        let result = {
            let _loading = self.loading.acquire("login");
            self.client.login(credentials).await
        };
        match result {
            Ok(user) => {
                info!(user_id = %user.id(), "signed in");
                self.toast(ToastLevel::Success, "Login successful!");
                self.enter(user.clone()).await;
                Ok(user)
            }
            Err(report) if report.current_context().is_network() => {
                Err(self.fail(report.current_context().clone(), "Login failed. Please try again."))
            }
            Err(report) => Err(self.api_failure(&report, "Login failed")),
        }
    }

    /// Creates an account and signs in.
    ///
    /// # Errors
    ///
    /// Returns an error for empty inputs or a refused registration.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(
        &mut self,
        registration: &Registration,
    ) -> Result<User, Report<DashboardError>> {
        if let Err(e) = registration.validate() {
            let message = e.to_string();
            return Err(self.fail(e, &message));
        }
        let result = {
            let _loading = self.loading.acquire("register");
            self.client.register(registration).await
        };
        match result {
            Ok(user) => {
                info!(user_id = %user.id(), "registered");
                self.toast(ToastLevel::Success, "Registration successful!");
                self.enter(user.clone()).await;
                Ok(user)
            }
            Err(report) if report.current_context().is_network() => Err(self.fail(
                report.current_context().clone(),
                "Registration failed. Please try again.",
            )),
            Err(report) => Err(self.api_failure(&report, "Registration failed")),
        }
    }

    /// Signs out.
    ///
    /// Local state is cleared whatever the server answers; a failed server
    /// call is reported as a warning.
    ///
    /// # Errors
    ///
    /// Returns the API error if the server call failed.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), Report<DashboardError>> {
        let result = {
            let _loading = self.loading.acquire("logout");
            self.client.logout().await
        };
        self.state.reset();
        match result {
            Ok(()) => {
                info!("signed out");
                self.toast(ToastLevel::Success, "Logged out successfully");
                Ok(())
            }
            Err(report) => {
                let err = report.current_context().clone();
                warn!(error = %err, "server logout failed; local session cleared");
                self.toast(ToastLevel::Warning, "Logout failed");
                Err(DashboardError::Api(err).into())
            }
        }
    }

    /// Switches between the sign-in and registration forms.
    pub fn toggle_auth_view(&mut self) {
        self.state.view = self.state.view.toggled();
    }

    /// Updates the member's names.
    ///
    /// # Errors
    ///
    /// Returns an error when signed out or when the server refuses.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<User, Report<DashboardError>> {
        let user_id = match self.state.session.require() {
            Ok(user) => user.id(),
            Err(e) => return Err(self.fail(e, "Failed to update profile")),
        };
        let result = {
            let _loading = self.loading.acquire("update_profile");
            self.client.update_user(user_id, update).await
        };
        match result {
            Ok(Some(user)) => {
                self.state.session.sign_in(user.clone());
                self.toast(ToastLevel::Success, "Profile updated successfully!");
                Ok(user)
            }
            Ok(None) => match self.state.session.apply_profile(update).cloned() {
                Ok(user) => {
                    self.toast(ToastLevel::Success, "Profile updated successfully!");
                    Ok(user)
                }
                Err(e) => Err(self.fail(e, "Failed to update profile")),
            },
            Err(report) => Err(self.api_failure(&report, "Failed to update profile")),
        }
    }

    /// Changes the member's password.
    ///
    /// A confirmation that differs from the new password is rejected without
    /// calling the server.
    ///
    /// # Errors
    ///
    /// Returns an error for a mismatch, an empty input or a server refusal.
    #[instrument(skip_all)]
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), Report<DashboardError>> {
        let change = match PasswordChange::confirmed(current_password, new_password, confirm_password)
        {
            Ok(change) => change,
            Err(e) => {
                let message = e.to_string();
                return Err(self.fail(e, &message));
            }
        };
        let result = {
            let _loading = self.loading.acquire("change_password");
            self.client.change_password(&change).await
        };
        match result {
            Ok(()) => {
                self.toast(ToastLevel::Success, "Password changed successfully!");
                Ok(())
            }
            Err(report) => Err(self.api_failure(&report, "Failed to change password")),
        }
    }

    // Navigation

    /// Opens a section and loads what it shows.
    ///
    /// # Errors
    ///
    /// Returns an error when signed out or when loading fails.
    pub async fn show_section(&mut self, section: Section) -> Result<(), Report<DashboardError>> {
        if let Err(e) = self.state.session.require() {
            self.state.view = View::Login;
            let message = e.to_string();
            return Err(self.fail(e, &message));
        }
        self.state.view = View::Main(section);
        match section {
            Section::Dashboard => {
                self.load_dashboard().await;
                Ok(())
            }
            Section::Integrations => self.refresh().await,
            Section::Logs => {
                let query = self.state.log_query.clone();
                self.load_logs(query).await.map(|_| ())
            }
            Section::Profile => Ok(()),
        }
    }

    /// Refreshes the integration list for the dashboard metrics.
    ///
    /// Failures are logged only; the previous list stays in place.
    pub async fn load_dashboard(&mut self) {
        if let Err(report) = self.fetch_integrations().await {
            warn!(error = %report.current_context(), "failed to load dashboard data");
        }
    }

    // Integrations

    async fn fetch_integrations(&mut self) -> Result<(), Report<ApiError>> {
        let _loading = self.loading.acquire("refresh");
        let items = self.client.list_integrations().await?;
        debug!(count = items.len(), "integration list replaced");
        self.state.registry.replace(items);
        Ok(())
    }

    /// Reloads the integration list from the server.
    ///
    /// The list is replaced only when the full new list arrived.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous list is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), Report<DashboardError>> {
        self.fetch_integrations()
            .await
            .map_err(|report| self.api_failure(&report, "Failed to load integrations"))
    }

    async fn refresh_after_write(&mut self) {
        if let Err(report) = self.refresh().await {
            debug!(error = %report.current_context(), "list refresh after write failed");
        }
    }

    /// Fetches one integration fresh from the server.
    ///
    /// The loaded list is not touched.
    ///
    /// # Errors
    ///
    /// Returns the API error, e.g. a 404 for an unknown ID.
    #[instrument(skip(self), fields(integration_id = %id))]
    pub async fn load_integration(
        &mut self,
        id: IntegrationId,
    ) -> Result<Integration, Report<DashboardError>> {
        let result = {
            let _loading = self.loading.acquire("load_integration");
            self.client.get_integration(id).await
        };
        result.map_err(|report| self.api_failure(&report, "Failed to load integration"))
    }

    /// Opens an empty integration dialog.
    pub fn open_create(&mut self) {
        self.state.form.open_create();
    }

    /// Opens the integration dialog pre-filled with a loaded record.
    ///
    /// # Errors
    ///
    /// Returns an error if no such integration is loaded.
    pub fn open_edit(&mut self, id: IntegrationId) -> Result<(), Report<DashboardError>> {
        match self.state.registry.get(id) {
            Some(integration) => {
                self.state.form.open_edit(integration);
                Ok(())
            }
            None => {
                let err = DashboardError::UnknownIntegration { id };
                let message = err.to_string();
                Err(self.fail(err, &message))
            }
        }
    }

    /// Submits the integration dialog, then reloads the list.
    ///
    /// Returns the saved record when the server sends one back. Invalid input
    /// keeps the dialog open with the message shown and sends nothing. A
    /// submit while another is in flight is rejected.
    ///
    /// # Errors
    ///
    /// Returns the form error or the API error.
    #[instrument(skip(self))]
    pub async fn submit_form(&mut self) -> Result<Option<Integration>, Report<DashboardError>> {
        let submission = match self.state.form.begin_submit() {
            Ok(submission) => submission,
            Err(e) => {
                let message = e.to_string();
                return Err(self.fail(e, &message));
            }
        };
        let result = {
            let _loading = self.loading.acquire("submit_form");
            match submission.mode {
                FormMode::Create => self.client.create_integration(&submission.spec).await,
                FormMode::Edit(id) => self.client.update_integration(id, &submission.spec).await,
            }
        };
        match result {
            Ok(saved) => {
                self.state.form.finish_submit(Ok(()));
                let message = match submission.mode {
                    FormMode::Create => "Integration created successfully!",
                    FormMode::Edit(_) => "Integration updated successfully!",
                };
                self.toast(ToastLevel::Success, message);
                // The list on screen reflects the server, never a local patch.
                self.refresh_after_write().await;
                Ok(saved)
            }
            Err(report) => {
                let err = report.current_context().clone();
                let message = err.user_message("Failed to save integration").to_string();
                self.state.form.finish_submit(Err(message.clone()));
                Err(self.fail(err, &message))
            }
        }
    }

    /// Deletes an integration once the member confirms.
    ///
    /// Returns `false` when the member declined; nothing is sent then.
    ///
    /// # Errors
    ///
    /// Returns the API error if the delete failed.
    #[instrument(skip(self, confirm), fields(integration_id = %id))]
    pub async fn delete(
        &mut self,
        id: IntegrationId,
        confirm: &dyn Confirm,
    ) -> Result<bool, Report<DashboardError>> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!("delete declined");
            return Ok(false);
        }
        let result = {
            let _loading = self.loading.acquire("delete");
            self.client.delete_integration(id).await
        };
        match result {
            Ok(()) => {
                self.toast(ToastLevel::Success, "Integration deleted successfully!");
                self.refresh_after_write().await;
                Ok(true)
            }
            Err(report) => Err(self.api_failure(&report, "Failed to delete integration")),
        }
    }

    /// Tests one integration's credentials.
    ///
    /// # Errors
    ///
    /// Returns the API error if the provider rejected the credentials.
    #[instrument(skip(self), fields(integration_id = %id))]
    pub async fn test(&mut self, id: IntegrationId) -> Result<TestOutcome, Report<DashboardError>> {
        let result = {
            let _loading = self.loading.acquire("test");
            self.client.test_integration(id).await
        };
        match result {
            Ok(outcome) => {
                let message = outcome
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Integration test successful!".to_string());
                self.toast(ToastLevel::Success, message);
                Ok(outcome)
            }
            Err(report) => Err(self.api_failure(&report, "Integration test failed")),
        }
    }

    /// Tests every active integration, one after another in list order.
    ///
    /// A failing test never stops the run.
    ///
    /// # Errors
    ///
    /// Does not fail today; individual failures are counted in the summary.
    #[instrument(skip(self))]
    pub async fn test_all(&mut self) -> Result<TestSummary, Report<DashboardError>> {
        let targets: Vec<IntegrationId> = self
            .state
            .registry
            .active()
            .map(|integration| integration.id)
            .collect();
        if targets.is_empty() {
            self.toast(ToastLevel::Warning, "No active integrations to test");
            return Ok(TestSummary::default());
        }

        let mut summary = TestSummary::default();
        {
            let _loading = self.loading.acquire("test_all");
            for id in targets {
                let passed = match self.client.test_integration(id).await {
                    Ok(_) => true,
                    Err(report) => {
                        debug!(integration_id = %id, error = %report.current_context(), "test failed");
                        false
                    }
                };
                summary.record(passed);
            }
        }

        info!(
            passed = summary.success_count,
            failed = summary.fail_count,
            "tested active integrations"
        );
        if summary.all_passed() {
            self.toast(
                ToastLevel::Success,
                format!("All {} integrations tested successfully!", summary.success_count),
            );
        } else {
            self.toast(
                ToastLevel::Warning,
                format!("{} passed, {} failed", summary.success_count, summary.fail_count),
            );
        }
        Ok(summary)
    }

    // Logs

    /// Loads one page of webhook logs.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous page is kept.
    #[instrument(skip(self))]
    pub async fn load_logs(&mut self, query: LogQuery) -> Result<&LogPage, Report<DashboardError>> {
        let result = {
            let _loading = self.loading.acquire("load_logs");
            self.client.webhook_logs(&query).await
        };
        match result {
            Ok(page) => {
                self.state.logs = page;
                self.state.log_query = query;
                Ok(&self.state.logs)
            }
            Err(report) => Err(self.api_failure(&report, "Failed to load logs")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastLog;
    use async_trait::async_trait;
    use peakwave_api::testing::ScriptedTransport;
    use peakwave_api::{ApiRequest, ApiResponse, Method, TransportError};
    use peakwave_core::UserId;
    use peakwave_integration::{FormError, FormState};
    use peakwave_platform_access::AuthenticationError;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    fn dashboard() -> (Dashboard<ScriptedTransport>, ScriptedTransport, ToastLog) {
        let transport = ScriptedTransport::new();
        let toasts = ToastLog::new();
        let dashboard = Dashboard::new(ApiClient::new(transport.clone()), toasts.clone());
        (dashboard, transport, toasts)
    }

    fn user_json() -> Value {
        json!({"id": 1, "email": "sam@example.com", "first_name": "Sam", "last_name": "Ng"})
    }

    fn integration(id: i64, service: &str, active: bool) -> Value {
        json!({
            "id": id,
            "service_name": service,
            "display_name": format!("{service} {id}"),
            "webhook_url": "",
            "is_active": active,
            "config_data": {}
        })
    }

    fn error_of(report: &Report<DashboardError>) -> &DashboardError {
        report.current_context()
    }

    async fn signed_in() -> (Dashboard<ScriptedTransport>, ScriptedTransport, ToastLog) {
        let (mut dashboard, transport, toasts) = dashboard();
        transport
            .respond(200, json!({"message": "Login successful", "user": user_json()}))
            .respond(200, json!([]));
        dashboard
            .login(&Credentials::new("sam@example.com", "Secret123"))
            .await
            .expect("login");
        (dashboard, transport, toasts)
    }

    async fn with_integrations(
        items: Vec<Value>,
    ) -> (Dashboard<ScriptedTransport>, ScriptedTransport, ToastLog) {
        let (mut dashboard, transport, toasts) = signed_in().await;
        transport.respond(200, Value::Array(items));
        dashboard.refresh().await.expect("refresh");
        (dashboard, transport, toasts)
    }

    #[tokio::test]
    async fn login_enters_dashboard_and_loads_integrations() {
        let (mut dashboard, transport, toasts) = dashboard();
        transport
            .respond(200, json!({"message": "Login successful", "user": user_json()}))
            .respond(200, json!([integration(1, "twilio", true)]));

        let user = dashboard
            .login(&Credentials::new("sam@example.com", "Secret123"))
            .await
            .expect("login");

        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(dashboard.view(), View::Main(Section::Dashboard));
        assert_eq!(dashboard.registry().active_count(), 1);
        assert_eq!(toasts.toasts(), vec![Toast::new(ToastLevel::Success, "Login successful!")]);
        assert!(!dashboard.loading().is_active());
    }

    #[tokio::test]
    async fn login_rejection_shows_server_message() {
        let (mut dashboard, transport, toasts) = dashboard();
        transport.respond(401, json!({"error": "Invalid email or password"}));

        let err = dashboard
            .login(&Credentials::new("sam@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(error_of(&err).api().is_some_and(ApiError::is_auth));
        assert!(!dashboard.session().is_authenticated());
        assert_eq!(dashboard.view(), View::Login);
        assert_eq!(
            toasts.toasts(),
            vec![Toast::new(ToastLevel::Error, "Invalid email or password")]
        );
    }

    #[tokio::test]
    async fn login_network_failure_uses_retry_message() {
        let (mut dashboard, transport, toasts) = dashboard();
        transport.fail("connection refused");

        dashboard
            .login(&Credentials::new("sam@example.com", "pw"))
            .await
            .unwrap_err();

        assert_eq!(
            toasts.last().map(|t| t.message),
            Some("Login failed. Please try again.".to_string())
        );
        assert!(!dashboard.loading().is_active());
    }

    #[tokio::test]
    async fn login_with_empty_email_sends_nothing() {
        let (mut dashboard, transport, toasts) = dashboard();

        let err = dashboard
            .login(&Credentials::new("", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(
            error_of(&err),
            DashboardError::Authentication(AuthenticationError::MissingField { .. })
        ));
        assert_eq!(transport.request_count(), 0);
        assert_eq!(toasts.len(), 1);
    }

    #[tokio::test]
    async fn register_uses_registration_endpoint() {
        let (mut dashboard, transport, toasts) = dashboard();
        transport
            .respond(201, json!({"message": "User registered successfully", "user": user_json()}))
            .respond(200, json!([]));

        dashboard
            .register(&Registration {
                first_name: "Sam".to_string(),
                last_name: "Ng".to_string(),
                email: "sam@example.com".to_string(),
                password: "Secret123".to_string(),
            })
            .await
            .expect("register");

        assert_eq!(transport.requests()[0].path, "/api/auth/register");
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Success, "Registration successful!"))
        );
    }

    #[tokio::test]
    async fn check_session_without_cookie_shows_login_quietly() {
        let (mut dashboard, transport, toasts) = dashboard();
        transport.respond(401, json!({"error": "Authentication required"}));

        assert!(dashboard.check_session().await.is_err());
        assert_eq!(dashboard.view(), View::Login);
        assert!(toasts.is_empty());
        assert_eq!(transport.request_count(), 1);
    }

    /// Minimal stand-in for the members API that tracks one session cookie
    /// shared by every clone.
    #[derive(Clone, Default)]
    struct SessionServer {
        signed_in: Arc<Mutex<Option<Value>>>,
    }

    #[async_trait]
    impl peakwave_api::Transport for SessionServer {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let mut session = self.signed_in.lock().expect("lock");
            let response = match (request.method, request.path.as_str()) {
                (Method::Post, "/api/auth/login") => {
                    *session = Some(user_json());
                    ApiResponse::new(200, json!({"message": "ok", "user": user_json()}))
                }
                (Method::Get, "/api/auth/me") => match session.as_ref() {
                    Some(user) => ApiResponse::new(200, json!({"user": user})),
                    None => ApiResponse::new(401, json!({"error": "Authentication required"})),
                },
                (Method::Get, "/api/integrations") => ApiResponse::new(200, json!([])),
                _ => ApiResponse::new(404, json!({"error": "not found"})),
            };
            Ok(response)
        }
    }

    #[tokio::test]
    async fn session_survives_into_a_new_dashboard() {
        let server = SessionServer::default();
        let mut first = Dashboard::new(ApiClient::new(server.clone()), ToastLog::new());
        let user = first
            .login(&Credentials::new("sam@example.com", "Secret123"))
            .await
            .expect("login");

        let mut second = Dashboard::new(ApiClient::new(server), ToastLog::new());
        let restored = second.check_session().await.expect("session");

        assert_eq!(restored, user);
        assert_eq!(second.view(), View::Main(Section::Dashboard));
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_server_fails() {
        let (mut dashboard, transport, toasts) =
            with_integrations(vec![integration(1, "twilio", true)]).await;
        dashboard.open_create();
        transport.respond(500, json!({"error": "boom"}));

        let err = dashboard.logout().await.unwrap_err();

        assert!(matches!(error_of(&err), DashboardError::Api(ApiError::Server { .. })));
        assert!(!dashboard.session().is_authenticated());
        assert!(dashboard.registry().is_empty());
        assert!(!dashboard.form().is_open());
        assert_eq!(dashboard.view(), View::Login);
        assert_eq!(toasts.last(), Some(Toast::new(ToastLevel::Warning, "Logout failed")));
    }

    #[tokio::test]
    async fn logout_success() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        transport.respond(200, json!({"message": "Logout successful"}));

        dashboard.logout().await.expect("logout");

        assert!(!dashboard.session().is_authenticated());
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Success, "Logged out successfully"))
        );
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_list() {
        let (mut dashboard, transport, toasts) = with_integrations(vec![
            integration(1, "twilio", true),
            integration(2, "zapier", false),
        ])
        .await;
        transport.respond(500, json!({"error": "Failed to get integrations"}));

        let err = dashboard.refresh().await.unwrap_err();

        assert!(matches!(error_of(&err), DashboardError::Api(_)));
        assert_eq!(dashboard.registry().len(), 2);
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "Failed to get integrations"))
        );
    }

    #[tokio::test]
    async fn refresh_replaces_whole_list() {
        let (mut dashboard, transport, _) =
            with_integrations(vec![integration(1, "twilio", true)]).await;
        transport.respond(
            200,
            json!([integration(2, "make", true), integration(3, "zapier", true)]),
        );

        dashboard.refresh().await.expect("refresh");

        let ids: Vec<_> = dashboard.registry().all().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_all_runs_active_integrations_in_order() {
        let (mut dashboard, transport, toasts) = with_integrations(vec![
            integration(1, "twilio", true),
            integration(2, "zapier", false),
            integration(3, "gohighlevel", true),
            integration(4, "make", false),
            integration(5, "make", true),
        ])
        .await;
        let before = transport.request_count();
        transport
            .respond(200, json!({"status": "success", "message": "ok"}))
            .respond(400, json!({"error": "Invalid credentials"}))
            .fail("connection reset");

        let summary = dashboard.test_all().await.expect("summary");

        let tested: Vec<String> = transport.requests()[before..]
            .iter()
            .map(|r| r.path.clone())
            .collect();
        assert_eq!(
            tested,
            vec![
                "/api/integrations/1/test",
                "/api/integrations/3/test",
                "/api/integrations/5/test",
            ]
        );
        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.fail_count, 2);
        assert_eq!(summary.total(), 3);
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Warning, "1 passed, 2 failed"))
        );
        assert!(!dashboard.loading().is_active());
    }

    #[tokio::test]
    async fn test_all_success_message() {
        let (mut dashboard, transport, toasts) = with_integrations(vec![
            integration(1, "twilio", true),
            integration(2, "make", true),
        ])
        .await;
        transport
            .respond(200, json!({"status": "success"}))
            .respond(200, json!({"status": "success"}));

        let summary = dashboard.test_all().await.expect("summary");

        assert!(summary.all_passed());
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Success, "All 2 integrations tested successfully!"))
        );
    }

    #[tokio::test]
    async fn test_all_without_active_integrations_warns() {
        let (mut dashboard, transport, toasts) =
            with_integrations(vec![integration(1, "twilio", false)]).await;
        let before = transport.request_count();

        let summary = dashboard.test_all().await.expect("summary");

        assert_eq!(summary, TestSummary::default());
        assert_eq!(transport.request_count(), before);
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Warning, "No active integrations to test"))
        );
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let (mut dashboard, transport, _) =
            with_integrations(vec![integration(1, "twilio", true)]).await;
        let before = transport.request_count();
        let prompts = Mutex::new(Vec::new());
        let decline = |prompt: &str| {
            prompts.lock().expect("lock").push(prompt.to_string());
            false
        };

        let deleted = dashboard
            .delete(IntegrationId::new(1), &decline)
            .await
            .expect("declined");

        assert!(!deleted);
        assert_eq!(transport.request_count(), before);
        assert_eq!(dashboard.registry().len(), 1);
        assert_eq!(prompts.lock().expect("lock").as_slice(), [DELETE_PROMPT]);
    }

    #[tokio::test]
    async fn confirmed_delete_refreshes() {
        let (mut dashboard, transport, toasts) =
            with_integrations(vec![integration(1, "twilio", true)]).await;
        transport
            .respond(200, json!({"message": "Integration deleted successfully"}))
            .respond(200, json!([]));

        let deleted = dashboard
            .delete(IntegrationId::new(1), &|_: &str| true)
            .await
            .expect("deleted");

        assert!(deleted);
        assert!(dashboard.registry().is_empty());
        assert!(
            toasts
                .toasts()
                .contains(&Toast::new(ToastLevel::Success, "Integration deleted successfully!"))
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_list() {
        let (mut dashboard, transport, toasts) =
            with_integrations(vec![integration(1, "twilio", true)]).await;
        transport.respond(404, json!({"error": "Integration not found"}));

        dashboard
            .delete(IntegrationId::new(1), &|_: &str| true)
            .await
            .unwrap_err();

        assert_eq!(dashboard.registry().len(), 1);
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "Integration not found"))
        );
    }

    #[tokio::test]
    async fn twilio_without_auth_token_stays_open() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        let before = transport.request_count();
        dashboard.open_create();
        let form = dashboard.form_mut();
        form.select_service("twilio").expect("open");
        form.set_display_name("Support line").expect("open");
        form.set_field("account_sid", "AC123").expect("declared");

        let err = dashboard.submit_form().await.unwrap_err();

        assert!(matches!(
            error_of(&err),
            DashboardError::Form(FormError::MissingField { .. })
        ));
        assert!(dashboard.form().is_open());
        assert_eq!(dashboard.form().error(), Some("Auth Token is required"));
        assert_eq!(transport.request_count(), before);
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "Auth Token is required"))
        );
    }

    #[tokio::test]
    async fn create_submits_declared_fields_then_refreshes() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        let before = transport.request_count();
        dashboard.open_create();
        let form = dashboard.form_mut();
        form.select_service("gohighlevel").expect("open");
        form.set_display_name("CRM").expect("open");
        form.set_field("api_token", "tok").expect("declared");
        transport
            .respond(201, json!({"message": "Integration created successfully"}))
            .respond(200, json!([integration(8, "gohighlevel", true)]));

        let saved = dashboard.submit_form().await.expect("created");
        assert_eq!(saved, None);

        let requests = transport.requests();
        let create = &requests[before];
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.path, "/api/integrations");
        let body = create.body.clone().expect("body");
        assert_eq!(body["config_data"], json!({"api_token": "tok", "location_id": ""}));
        assert_eq!(requests[before + 1].path, "/api/integrations");
        assert!(!dashboard.form().is_open());
        assert_eq!(dashboard.registry().len(), 1);
        assert!(
            toasts
                .toasts()
                .contains(&Toast::new(ToastLevel::Success, "Integration created successfully!"))
        );
    }

    #[tokio::test]
    async fn update_returns_saved_record_and_reports_refresh_failure_separately() {
        let (mut dashboard, transport, toasts) =
            with_integrations(vec![integration(4, "make", true)]).await;
        dashboard.open_edit(IntegrationId::new(4)).expect("loaded");
        dashboard
            .form_mut()
            .set_display_name("Renamed")
            .expect("open");
        let mut saved = integration(4, "make", true);
        saved["display_name"] = json!("Renamed");
        transport
            .respond(
                200,
                json!({"message": "Integration updated successfully", "integration": saved}),
            )
            .respond(500, json!({"error": "database unavailable"}));

        let record = dashboard
            .submit_form()
            .await
            .expect("update itself succeeded")
            .expect("record returned");

        assert_eq!(record.display_name, "Renamed");
        assert!(!dashboard.form().is_open());
        assert_eq!(dashboard.registry().len(), 1);
        let tail: Vec<ToastLevel> = toasts.toasts().iter().rev().take(2).map(|t| t.level).collect();
        assert_eq!(tail, vec![ToastLevel::Error, ToastLevel::Success]);
    }

    #[tokio::test]
    async fn edit_failure_reopens_form_with_message() {
        let (mut dashboard, transport, _) =
            with_integrations(vec![integration(4, "make", true)]).await;
        dashboard.open_edit(IntegrationId::new(4)).expect("loaded");
        transport.respond(400, json!({"error": "Invalid webhook URL"}));

        dashboard.submit_form().await.unwrap_err();

        assert_eq!(dashboard.form().error(), Some("Invalid webhook URL"));
        assert!(matches!(dashboard.form().state(), FormState::Open { .. }));
        let request = transport.requests().pop().expect("request");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/api/integrations/4");
    }

    #[tokio::test]
    async fn second_submit_while_submitting_is_rejected() {
        let (mut dashboard, transport, _) = signed_in().await;
        let before = transport.request_count();
        dashboard.open_create();
        let form = dashboard.form_mut();
        form.select_service("zapier").expect("open");
        form.set_display_name("Zaps").expect("open");
        form.begin_submit().expect("first submit");

        let err = dashboard.submit_form().await.unwrap_err();

        assert!(matches!(
            error_of(&err),
            DashboardError::Form(FormError::SubmissionInFlight)
        ));
        assert!(dashboard.form().is_submitting());
        assert_eq!(transport.request_count(), before);
    }

    #[tokio::test]
    async fn open_edit_unknown_id() {
        let (mut dashboard, _, _) = signed_in().await;
        let err = dashboard.open_edit(IntegrationId::new(99)).unwrap_err();
        assert!(matches!(
            error_of(&err),
            DashboardError::UnknownIntegration { .. }
        ));
        assert!(!dashboard.form().is_open());
    }

    #[tokio::test]
    async fn loading_is_shown_during_call_and_released_after_failure() {
        let (mut dashboard, transport, _) = dashboard();
        let seen = Arc::new(AtomicBool::new(false));
        let loading = dashboard.loading().clone();
        let observed = Arc::clone(&seen);
        transport.observe(move |_| observed.store(loading.is_active(), Ordering::SeqCst));
        transport.fail("connection refused");

        dashboard.refresh().await.unwrap_err();

        assert!(seen.load(Ordering::SeqCst));
        assert!(!dashboard.loading().is_active());
    }

    #[tokio::test]
    async fn single_test_uses_server_message() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        transport.respond(
            200,
            json!({"status": "success", "message": "Twilio connection successful"}),
        );

        dashboard.test(IntegrationId::new(2)).await.expect("ok");

        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Success, "Twilio connection successful"))
        );

        transport.respond(400, json!({}));
        dashboard.test(IntegrationId::new(2)).await.unwrap_err();
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "Integration test failed"))
        );
    }

    #[tokio::test]
    async fn password_mismatch_sends_nothing() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        let before = transport.request_count();

        let err = dashboard
            .change_password("old", "NewPass1", "NewPass2")
            .await
            .unwrap_err();

        assert!(matches!(
            error_of(&err),
            DashboardError::Authentication(AuthenticationError::PasswordMismatch)
        ));
        assert_eq!(transport.request_count(), before);
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "New passwords do not match"))
        );
    }

    #[tokio::test]
    async fn profile_update_merges_names() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        transport.respond(200, json!({"message": "User updated successfully"}));

        let user = dashboard
            .update_profile(&ProfileUpdate {
                first_name: "Samuel".to_string(),
                last_name: "Ng".to_string(),
            })
            .await
            .expect("updated");

        assert_eq!(user.first_name(), "Samuel");
        assert_eq!(user.email(), "sam@example.com");
        assert_eq!(transport.requests().pop().map(|r| r.path), Some("/api/users/1".to_string()));
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Success, "Profile updated successfully!"))
        );
    }

    #[tokio::test]
    async fn profile_update_requires_session() {
        let (mut dashboard, transport, _) = dashboard();
        let err = dashboard
            .update_profile(&ProfileUpdate {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            error_of(&err),
            DashboardError::Authentication(AuthenticationError::NotAuthenticated)
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn logs_failure_keeps_previous_page() {
        let (mut dashboard, transport, toasts) = signed_in().await;
        transport.respond(
            200,
            json!({
                "logs": [{
                    "id": 1,
                    "service_name": "make",
                    "event_type": "scenario_completed",
                    "status": "failed",
                    "error_message": "Timeout",
                    "created_at": "2026-02-10T08:00:00"
                }],
                "total": 1,
                "pages": 1,
                "current_page": 1
            }),
        );
        dashboard
            .load_logs(LogQuery::for_service("make"))
            .await
            .expect("logs");
        transport.fail("connection reset");

        dashboard.load_logs(LogQuery::all()).await.unwrap_err();

        assert_eq!(dashboard.logs().logs.len(), 1);
        assert_eq!(dashboard.state().log_query, LogQuery::for_service("make"));
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "Failed to load logs"))
        );
    }

    #[tokio::test]
    async fn show_section_requires_session() {
        let (mut dashboard, transport, _) = dashboard();
        dashboard.show_section(Section::Logs).await.unwrap_err();
        assert_eq!(dashboard.view(), View::Login);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn show_integrations_section_refreshes() {
        let (mut dashboard, transport, _) = signed_in().await;
        transport.respond(200, json!([integration(1, "make", true)]));

        dashboard
            .show_section(Section::Integrations)
            .await
            .expect("shown");

        assert_eq!(dashboard.view(), View::Main(Section::Integrations));
        assert_eq!(dashboard.registry().len(), 1);
    }

    #[tokio::test]
    async fn load_integration_leaves_list_alone() {
        let (mut dashboard, transport, toasts) =
            with_integrations(vec![integration(1, "twilio", true)]).await;
        transport
            .respond(200, integration(2, "make", false))
            .respond(404, json!({"error": "Integration not found"}));

        let record = dashboard
            .load_integration(IntegrationId::new(2))
            .await
            .expect("record");
        assert_eq!(record.display_name, "make 2");
        assert_eq!(dashboard.registry().len(), 1);

        dashboard
            .load_integration(IntegrationId::new(3))
            .await
            .unwrap_err();
        assert_eq!(
            toasts.last(),
            Some(Toast::new(ToastLevel::Error, "Integration not found"))
        );
    }

    #[test]
    fn toggle_auth_view() {
        let (mut dashboard, _, _) = dashboard();
        dashboard.toggle_auth_view();
        assert_eq!(dashboard.view(), View::Register);
        dashboard.toggle_auth_view();
        assert_eq!(dashboard.view(), View::Login);
    }
}
