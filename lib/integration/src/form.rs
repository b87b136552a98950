//! Create/edit dialog for a single integration.
//!
//! The dialog moves through `Closed → Open → Submitting → Closed | Open`.
//! Service-specific inputs always come from [`crate::service::fields_for`],
//! so creating and editing can never disagree about which credentials a
//! service takes.

use crate::error::FormError;
use crate::record::{ConfigData, Integration, IntegrationSpec};
use crate::service::{FieldSpec, ServiceName, fields_for};
use peakwave_core::IntegrationId;
use tracing::debug;

/// Whether the dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New integration (POST).
    Create,
    /// Existing integration (PUT).
    Edit(IntegrationId),
}

impl FormMode {
    /// Returns the dialog title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add Integration",
            Self::Edit(_) => "Edit Integration",
        }
    }
}

/// Values currently entered in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationDraft {
    /// Selected service; empty until the member picks one.
    pub service: String,
    /// Display name input.
    pub display_name: String,
    /// Webhook URL input.
    pub webhook_url: String,
    /// Active toggle.
    pub is_active: bool,
    /// Values of the service-specific inputs.
    pub config: ConfigData,
}

impl Default for IntegrationDraft {
    fn default() -> Self {
        Self {
            service: String::new(),
            display_name: String::new(),
            webhook_url: String::new(),
            is_active: true,
            config: ConfigData::new(),
        }
    }
}

impl IntegrationDraft {
    /// Builds a draft pre-filled from a stored record.
    ///
    /// Only config keys the service's field set declares are carried over.
    #[must_use]
    pub fn from_record(integration: &Integration) -> Self {
        let service = integration.service_name.as_str().to_string();
        let config = fields_for(&service)
            .iter()
            .map(|field| {
                let value = integration
                    .config_data
                    .get(field.key)
                    .cloned()
                    .unwrap_or_default();
                (field.key.to_string(), value)
            })
            .collect();

        Self {
            service,
            display_name: integration.display_name.clone(),
            webhook_url: integration.webhook_url().unwrap_or_default().to_string(),
            is_active: integration.is_active,
            config,
        }
    }

    /// Returns the inputs the selected service renders.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(&self.service)
    }

    /// Checks the draft and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns the first violation: missing service, missing display name,
    /// or an empty required credential.
    pub fn to_spec(&self) -> Result<IntegrationSpec, FormError> {
        let service_name =
            ServiceName::from_wire(&self.service).ok_or_else(|| FormError::MissingField {
                field: "service_name".to_string(),
                label: "Service".to_string(),
            })?;

        if self.display_name.trim().is_empty() {
            return Err(FormError::MissingField {
                field: "display_name".to_string(),
                label: "Display Name".to_string(),
            });
        }

        let mut config_data = ConfigData::new();
        for field in service_name.fields() {
            let value = self.config.get(field.key).cloned().unwrap_or_default();
            if field.required && value.trim().is_empty() {
                return Err(FormError::MissingField {
                    field: field.key.to_string(),
                    label: field.label.to_string(),
                });
            }
            config_data.insert(field.key.to_string(), value);
        }

        Ok(IntegrationSpec {
            service_name,
            display_name: self.display_name.trim().to_string(),
            webhook_url: self.webhook_url.trim().to_string(),
            is_active: self.is_active,
            config_data,
        })
    }
}

/// Current state of the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// Dialog hidden.
    #[default]
    Closed,
    /// Dialog shown and editable.
    Open {
        /// Create or edit.
        mode: FormMode,
        /// Values as entered so far.
        draft: IntegrationDraft,
        /// Message from the last failed submit.
        error: Option<String>,
    },
    /// Request in flight; inputs are locked.
    Submitting {
        /// Create or edit.
        mode: FormMode,
        /// Values being sent; restored if the submit fails.
        draft: IntegrationDraft,
    },
}

/// A validated request the caller must send and then report back through
/// [`IntegrationForm::finish_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Create or update.
    pub mode: FormMode,
    /// Request body.
    pub spec: IntegrationSpec,
}

/// Controller for the integration dialog.
#[derive(Debug, Clone, Default)]
pub struct IntegrationForm {
    state: FormState,
}

impl IntegrationForm {
    /// Creates a closed dialog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns true unless the dialog is closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    /// Returns true while a submit is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting { .. })
    }

    /// Returns the mode of an open dialog.
    #[must_use]
    pub fn mode(&self) -> Option<FormMode> {
        match &self.state {
            FormState::Closed => None,
            FormState::Open { mode, .. } | FormState::Submitting { mode, .. } => Some(*mode),
        }
    }

    /// Returns the entered values of an open dialog.
    #[must_use]
    pub fn draft(&self) -> Option<&IntegrationDraft> {
        match &self.state {
            FormState::Closed => None,
            FormState::Open { draft, .. } | FormState::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Returns the error shown in the dialog, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Opens an empty dialog for a new integration.
    pub fn open_create(&mut self) {
        debug!("opening integration form for create");
        self.state = FormState::Open {
            mode: FormMode::Create,
            draft: IntegrationDraft::default(),
            error: None,
        };
    }

    /// Opens the dialog pre-filled from an existing record.
    pub fn open_edit(&mut self, integration: &Integration) {
        debug!(integration_id = %integration.id, "opening integration form for edit");
        self.state = FormState::Open {
            mode: FormMode::Edit(integration.id),
            draft: IntegrationDraft::from_record(integration),
            error: None,
        };
    }

    /// Hides the dialog, discarding entered values.
    pub fn close(&mut self) {
        self.state = FormState::Closed;
    }

    fn editable_draft(&mut self) -> Result<&mut IntegrationDraft, FormError> {
        match &mut self.state {
            FormState::Open { draft, .. } => Ok(draft),
            FormState::Submitting { .. } => Err(FormError::SubmissionInFlight),
            FormState::Closed => Err(FormError::NotOpen),
        }
    }

    /// Selects a service.
    ///
    /// Switching to a different service discards every service-specific
    /// value entered so far; the new field set starts empty.
    ///
    /// # Errors
    ///
    /// Fails if the dialog is closed or submitting.
    pub fn select_service(&mut self, service: &str) -> Result<(), FormError> {
        let service = service
            .parse::<ServiceName>()
            .map(|name| name.as_str().to_string())
            .unwrap_or_else(|_| service.trim().to_string());
        let draft = self.editable_draft()?;
        if draft.service != service {
            debug!(service = %service, "integration form service changed");
            draft.config = fields_for(&service)
                .iter()
                .map(|field| (field.key.to_string(), String::new()))
                .collect();
            draft.service = service;
        }
        Ok(())
    }

    /// Sets the display name.
    ///
    /// # Errors
    ///
    /// Fails if the dialog is closed or submitting.
    pub fn set_display_name(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.editable_draft()?.display_name = value.into();
        Ok(())
    }

    /// Sets the webhook URL.
    ///
    /// # Errors
    ///
    /// Fails if the dialog is closed or submitting.
    pub fn set_webhook_url(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.editable_draft()?.webhook_url = value.into();
        Ok(())
    }

    /// Sets the active toggle.
    ///
    /// # Errors
    ///
    /// Fails if the dialog is closed or submitting.
    pub fn set_active(&mut self, active: bool) -> Result<(), FormError> {
        self.editable_draft()?.is_active = active;
        Ok(())
    }

    /// Sets a service-specific input.
    ///
    /// # Errors
    ///
    /// Fails if the dialog is not editable or the selected service renders no
    /// input with this key.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        let draft = self.editable_draft()?;
        if !draft.fields().iter().any(|field| field.key == key) {
            return Err(FormError::UnknownField {
                service: draft.service.clone(),
                field: key.to_string(),
            });
        }
        draft.config.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Validates the draft and locks the dialog for submission.
    ///
    /// On validation failure the dialog stays open with the message shown.
    ///
    /// # Errors
    ///
    /// Fails if the dialog is closed, already submitting, or invalid.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        match std::mem::take(&mut self.state) {
            FormState::Open { mode, draft, .. } => match draft.to_spec() {
                Ok(spec) => {
                    debug!(service = %spec.service_name, "integration form submitting");
                    self.state = FormState::Submitting { mode, draft };
                    Ok(Submission { mode, spec })
                }
                Err(e) => {
                    self.state = FormState::Open {
                        mode,
                        draft,
                        error: Some(e.to_string()),
                    };
                    Err(e)
                }
            },
            other => {
                let err = if matches!(other, FormState::Submitting { .. }) {
                    FormError::SubmissionInFlight
                } else {
                    FormError::NotOpen
                };
                self.state = other;
                Err(err)
            }
        }
    }

    /// Records the outcome of the request started by [`Self::begin_submit`].
    ///
    /// Success closes the dialog; failure reopens it with the message and the
    /// entered values intact.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        let state = std::mem::take(&mut self.state);
        self.state = match (state, outcome) {
            (FormState::Submitting { .. }, Ok(())) => FormState::Closed,
            (FormState::Submitting { mode, draft }, Err(message)) => FormState::Open {
                mode,
                draft,
                error: Some(message),
            },
            (other, _) => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twilio_record() -> Integration {
        Integration {
            id: IntegrationId::new(11),
            service_name: ServiceName::Twilio,
            display_name: "Support line".to_string(),
            webhook_url: None,
            is_active: true,
            config_data: ConfigData::from([
                ("account_sid".to_string(), "AC123".to_string()),
                ("auth_token".to_string(), "secret".to_string()),
                ("legacy_key".to_string(), "stale".to_string()),
            ]),
            created_at: None,
            updated_at: None,
        }
    }

    fn open_twilio_form() -> IntegrationForm {
        let mut form = IntegrationForm::new();
        form.open_create();
        form.select_service("twilio").expect("select");
        form.set_display_name("SMS").expect("name");
        form
    }

    #[test]
    fn starts_closed() {
        let form = IntegrationForm::new();
        assert!(!form.is_open());
        assert_eq!(form.mode(), None);
        assert!(form.draft().is_none());
    }

    #[test]
    fn open_create_has_empty_draft() {
        let mut form = IntegrationForm::new();
        form.open_create();

        assert_eq!(form.mode(), Some(FormMode::Create));
        assert_eq!(form.mode().map(|m| m.title()), Some("Add Integration"));
        let draft = form.draft().expect("draft");
        assert!(draft.service.is_empty());
        assert!(draft.fields().is_empty());
        assert!(draft.is_active);
    }

    #[test]
    fn open_edit_loads_only_declared_config_keys() {
        let mut form = IntegrationForm::new();
        form.open_edit(&twilio_record());

        assert_eq!(form.mode(), Some(FormMode::Edit(IntegrationId::new(11))));
        let draft = form.draft().expect("draft");
        assert_eq!(draft.service, "twilio");
        assert_eq!(draft.config.get("account_sid").map(String::as_str), Some("AC123"));
        assert_eq!(draft.config.get("phone_number").map(String::as_str), Some(""));
        assert!(!draft.config.contains_key("legacy_key"));
    }

    #[test]
    fn changing_service_discards_service_values() {
        let mut form = open_twilio_form();
        form.set_field("account_sid", "AC1").expect("field");

        form.select_service("gohighlevel").expect("switch");
        let draft = form.draft().expect("draft");
        assert_eq!(
            draft.config.keys().map(String::as_str).collect::<Vec<_>>(),
            ["api_token", "location_id"]
        );
        assert!(draft.config.values().all(String::is_empty));

        form.select_service("twilio").expect("switch back");
        let draft = form.draft().expect("draft");
        assert_eq!(draft.config.get("account_sid").map(String::as_str), Some(""));
    }

    #[test]
    fn reselecting_same_service_keeps_values() {
        let mut form = open_twilio_form();
        form.set_field("auth_token", "tok").expect("field");
        form.select_service("Twilio").expect("same service");

        let draft = form.draft().expect("draft");
        assert_eq!(draft.config.get("auth_token").map(String::as_str), Some("tok"));
    }

    #[test]
    fn rejects_fields_the_service_does_not_render() {
        let mut form = open_twilio_form();
        let err = form.set_field("api_token", "x").unwrap_err();
        assert!(matches!(err, FormError::UnknownField { .. }));
    }

    #[test]
    fn missing_required_credential_keeps_form_open() {
        let mut form = open_twilio_form();
        form.set_field("account_sid", "AC1").expect("field");

        let err = form.begin_submit().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingField {
                field: "auth_token".to_string(),
                label: "Auth Token".to_string(),
            }
        );
        assert!(form.is_open());
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some("Auth Token is required"));
    }

    #[test]
    fn missing_service_or_name_is_rejected() {
        let mut form = IntegrationForm::new();
        form.open_create();
        assert!(matches!(
            form.begin_submit(),
            Err(FormError::MissingField { ref field, .. }) if field == "service_name"
        ));

        form.select_service("zapier").expect("select");
        assert!(matches!(
            form.begin_submit(),
            Err(FormError::MissingField { ref field, .. }) if field == "display_name"
        ));
    }

    #[test]
    fn valid_submit_builds_spec_with_declared_keys() {
        let mut form = open_twilio_form();
        form.set_field("account_sid", "AC1").expect("field");
        form.set_field("auth_token", "tok").expect("field");

        let submission = form.begin_submit().expect("submit");
        assert_eq!(submission.mode, FormMode::Create);
        assert_eq!(submission.spec.service_name, ServiceName::Twilio);
        assert_eq!(
            submission.spec.config_data.keys().map(String::as_str).collect::<Vec<_>>(),
            ["account_sid", "auth_token", "phone_number"]
        );
        assert_eq!(submission.spec.config_data["phone_number"], "");
        assert!(form.is_submitting());
    }

    #[test]
    fn webhook_services_submit_empty_config() {
        let mut form = IntegrationForm::new();
        form.open_create();
        form.select_service("make").expect("select");
        form.set_display_name("Scenarios").expect("name");
        form.set_webhook_url(" https://hook.make.com/abc ").expect("url");

        let submission = form.begin_submit().expect("submit");
        assert!(submission.spec.config_data.is_empty());
        assert_eq!(submission.spec.webhook_url, "https://hook.make.com/abc");
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut form = open_twilio_form();
        form.set_field("account_sid", "AC1").expect("field");
        form.set_field("auth_token", "tok").expect("field");
        form.begin_submit().expect("first submit");

        assert_eq!(form.begin_submit().unwrap_err(), FormError::SubmissionInFlight);
        assert_eq!(
            form.set_display_name("changed").unwrap_err(),
            FormError::SubmissionInFlight
        );
        assert!(form.is_submitting());
    }

    #[test]
    fn success_closes_the_form() {
        let mut form = open_twilio_form();
        form.set_field("account_sid", "AC1").expect("field");
        form.set_field("auth_token", "tok").expect("field");
        form.begin_submit().expect("submit");

        form.finish_submit(Ok(()));
        assert_eq!(form.state(), &FormState::Closed);
    }

    #[test]
    fn failure_reopens_with_message_and_values() {
        let mut form = open_twilio_form();
        form.set_field("account_sid", "AC1").expect("field");
        form.set_field("auth_token", "tok").expect("field");
        form.begin_submit().expect("submit");

        form.finish_submit(Err("Twilio integration already exists".to_string()));
        assert!(form.is_open());
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some("Twilio integration already exists"));
        assert_eq!(form.draft().map(|d| d.display_name.as_str()), Some("SMS"));
    }

    #[test]
    fn edits_require_an_open_form() {
        let mut form = IntegrationForm::new();
        assert_eq!(form.select_service("twilio").unwrap_err(), FormError::NotOpen);
        assert_eq!(form.begin_submit().unwrap_err(), FormError::NotOpen);

        form.finish_submit(Ok(()));
        assert!(!form.is_open());
    }
}
