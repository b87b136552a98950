//! Typed members API client.

use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Transport};
use peakwave_core::{IntegrationId, UserId};
use peakwave_integration::{Integration, IntegrationSpec, LogPage, LogQuery};
use peakwave_platform_access::{Credentials, PasswordChange, ProfileUpdate, Registration, User};
use rootcause::prelude::Report;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Result of a successful credential test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOutcome {
    /// Server confirmation, e.g. "Twilio connection successful".
    pub message: Option<String>,
    /// Account name reported by the provider.
    pub account_name: Option<String>,
}

/// Members API client.
///
/// Status codes are mapped onto [`ApiError`] here, never in the transport, so
/// every operation fails with exactly one variant.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(
        &self,
        request: ApiRequest,
        credential_endpoint: bool,
    ) -> Result<Value, Report<ApiError>> {
        let path = request.path.clone();
        let response = self.transport.send(request).await.map_err(ApiError::from)?;
        if !response.is_success() {
            let err =
                ApiError::from_status(response.status, response.error_message(), credential_endpoint);
            warn!(status = response.status, path = %path, error = %err, "request rejected");
            return Err(err.into());
        }
        Ok(response.body)
    }

    /// Returns the current member.
    ///
    /// # Errors
    ///
    /// Returns `Auth` when there is no live session.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, Report<ApiError>> {
        let body = self.call(ApiRequest::new(Method::Get, "/api/auth/me"), false).await?;
        let user: User = decode_field(body, "user")?;
        debug!(user_id = %user.id(), "session is live");
        Ok(user)
    }

    /// Starts a session.
    ///
    /// # Errors
    ///
    /// Returns `Auth` for rejected credentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, Report<ApiError>> {
        let request = ApiRequest::new(Method::Post, "/api/auth/login").with_body(encode(credentials)?);
        let body = self.call(request, true).await?;
        let user: User = decode_field(body, "user")?;
        debug!(user_id = %user.id(), "logged in");
        Ok(user)
    }

    /// Creates an account and starts a session.
    ///
    /// # Errors
    ///
    /// Returns `Auth` when the server refuses the registration.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<User, Report<ApiError>> {
        let request =
            ApiRequest::new(Method::Post, "/api/auth/register").with_body(encode(registration)?);
        let body = self.call(request, true).await?;
        let user: User = decode_field(body, "user")?;
        debug!(user_id = %user.id(), "registered");
        Ok(user)
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the server call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), Report<ApiError>> {
        self.call(ApiRequest::new(Method::Post, "/api/auth/logout"), false)
            .await?;
        Ok(())
    }

    /// Rotates the member's password.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the current password is wrong or the new
    /// one is too weak.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), Report<ApiError>> {
        let request =
            ApiRequest::new(Method::Post, "/api/auth/change-password").with_body(encode(change)?);
        self.call(request, false).await?;
        Ok(())
    }

    /// Updates the member's names.
    ///
    /// Returns the server's user record when the response carries one.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the update.
    #[instrument(skip(self, update), fields(user_id = %user_id))]
    pub async fn update_user(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, Report<ApiError>> {
        let request = ApiRequest::new(Method::Put, format!("/api/users/{user_id}"))
            .with_body(encode(update)?);
        let body = self.call(request, false).await?;
        Ok(body
            .get("user")
            .cloned()
            .and_then(|user| serde_json::from_value(user).ok()))
    }

    /// Lists the member's integrations in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list.
    #[instrument(skip(self))]
    pub async fn list_integrations(&self) -> Result<Vec<Integration>, Report<ApiError>> {
        let body = self
            .call(ApiRequest::new(Method::Get, "/api/integrations"), false)
            .await?;
        let items: Vec<Integration> = decode(body)?;
        debug!(count = items.len(), "listed integrations");
        Ok(items)
    }

    /// Fetches one integration.
    ///
    /// # Errors
    ///
    /// Returns `Validation` (404) when it does not exist.
    #[instrument(skip(self), fields(integration_id = %id))]
    pub async fn get_integration(&self, id: IntegrationId) -> Result<Integration, Report<ApiError>> {
        let body = self
            .call(
                ApiRequest::new(Method::Get, format!("/api/integrations/{id}")),
                false,
            )
            .await?;
        decode(unwrap_envelope(body, "integration"))
    }

    /// Creates an integration.
    ///
    /// Returns the stored record when the response includes it.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for duplicates or bad input.
    #[instrument(skip(self, spec), fields(service = %spec.service_name))]
    pub async fn create_integration(
        &self,
        spec: &IntegrationSpec,
    ) -> Result<Option<Integration>, Report<ApiError>> {
        let request = ApiRequest::new(Method::Post, "/api/integrations").with_body(encode(spec)?);
        let body = self.call(request, false).await?;
        let created: Option<Integration> = optional_field(&body, "integration");
        if let Some(integration) = &created {
            debug!(integration_id = %integration.id, "integration created");
        }
        Ok(created)
    }

    /// Replaces an integration's settings.
    ///
    /// # Errors
    ///
    /// Returns `Validation` (404) when it does not exist.
    #[instrument(skip(self, spec), fields(integration_id = %id))]
    pub async fn update_integration(
        &self,
        id: IntegrationId,
        spec: &IntegrationSpec,
    ) -> Result<Option<Integration>, Report<ApiError>> {
        let request = ApiRequest::new(Method::Put, format!("/api/integrations/{id}"))
            .with_body(encode(spec)?);
        let body = self.call(request, false).await?;
        Ok(optional_field(&body, "integration"))
    }

    /// Deletes an integration.
    ///
    /// # Errors
    ///
    /// Returns an error if the server refuses.
    #[instrument(skip(self), fields(integration_id = %id))]
    pub async fn delete_integration(&self, id: IntegrationId) -> Result<(), Report<ApiError>> {
        self.call(
            ApiRequest::new(Method::Delete, format!("/api/integrations/{id}")),
            false,
        )
        .await?;
        debug!("integration deleted");
        Ok(())
    }

    /// Checks an integration's credentials against its provider.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the provider rejects the credentials.
    #[instrument(skip(self), fields(integration_id = %id))]
    pub async fn test_integration(&self, id: IntegrationId) -> Result<TestOutcome, Report<ApiError>> {
        let body = self
            .call(
                ApiRequest::new(Method::Post, format!("/api/integrations/{id}/test")),
                false,
            )
            .await?;
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(TestOutcome {
            message: text("message"),
            account_name: text("account_name"),
        })
    }

    /// Fetches one page of webhook event logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    #[instrument(skip(self))]
    pub async fn webhook_logs(&self, query: &LogQuery) -> Result<LogPage, Report<ApiError>> {
        let request = ApiRequest::new(Method::Get, "/api/webhook-logs").with_query(query.to_pairs());
        let body = self.call(request, false).await?;
        let page: LogPage = decode(body)?;
        debug!(count = page.logs.len(), total = page.total, "loaded logs");
        Ok(page)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode {
        details: e.to_string(),
    })
}

fn decode<R: DeserializeOwned>(body: Value) -> Result<R, Report<ApiError>> {
    Ok(serde_json::from_value(body).map_err(|e| ApiError::Decode {
        details: e.to_string(),
    })?)
}

fn decode_field<R: DeserializeOwned>(mut body: Value, field: &str) -> Result<R, Report<ApiError>> {
    match body.get_mut(field).map(Value::take) {
        Some(value) => decode(value),
        None => Err(ApiError::Decode {
            details: format!("response has no `{field}`"),
        }
        .into()),
    }
}

fn optional_field<R: DeserializeOwned>(body: &Value, field: &str) -> Option<R> {
    body.get(field)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

fn unwrap_envelope(mut body: Value, field: &str) -> Value {
    match body.get_mut(field) {
        Some(inner) if inner.is_object() => inner.take(),
        _ => body,
    }
}
