//! Request bodies for the identity endpoints.
//!
//! Secrets never appear in `Debug` output, so these types can be logged
//! through tracing fields without leaking passwords.

use crate::error::AuthenticationError;
use serde::Serialize;
use std::fmt;

fn require(field: &'static str, value: &str) -> Result<(), AuthenticationError> {
    if value.trim().is_empty() {
        return Err(AuthenticationError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Login form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks that both inputs are filled in.
    ///
    /// # Errors
    ///
    /// Returns the first empty field.
    pub fn validate(&self) -> Result<(), AuthenticationError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Registration {
    /// Checks that email and password are filled in.
    ///
    /// Password strength is enforced by the server.
    ///
    /// # Errors
    ///
    /// Returns the first empty required field.
    pub fn validate(&self) -> Result<(), AuthenticationError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Profile form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Change-password request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    /// Password currently in use.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
}

impl PasswordChange {
    /// Builds the request from the three form inputs.
    ///
    /// # Errors
    ///
    /// Returns `PasswordMismatch` when the confirmation differs from the new
    /// password, or `MissingField` for an empty input.
    pub fn confirmed(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: &str,
    ) -> Result<Self, AuthenticationError> {
        let change = Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        };
        if change.new_password != confirm_password {
            return Err(AuthenticationError::PasswordMismatch);
        }
        require("current_password", &change.current_password)?;
        require("new_password", &change.new_password)?;
        Ok(change)
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current_password", &"<redacted>")
            .field("new_password", &"<redacted>")
            .finish()
    }
}
