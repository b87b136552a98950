//! Member account as served by the identity endpoints.
//!
//! The dashboard never creates users locally: a `User` always comes from a
//! login, registration or session-check response, and is only ever changed
//! by merging a successful profile update.

use crate::auth::ProfileUpdate;
use chrono::NaiveDateTime;
use peakwave_core::UserId;
use serde::{Deserialize, Serialize};

/// Represents the authenticated member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned member ID.
    id: UserId,
    /// Login email address.
    email: String,
    /// Given name.
    #[serde(default)]
    first_name: String,
    /// Family name.
    #[serde(default)]
    last_name: String,
    /// Whether the account is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    /// When the account was created.
    #[serde(
        default,
        deserialize_with = "peakwave_core::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<NaiveDateTime>,
    /// When the member last logged in.
    #[serde(
        default,
        deserialize_with = "peakwave_core::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    last_login: Option<NaiveDateTime>,
}

impl User {
    /// Creates a user with the identity fields only.
    #[must_use]
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_active: None,
            created_at: None,
            last_login: None,
        }
    }

    /// Returns the member ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns "First Last", falling back to the email when both are empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    /// Returns whether the account is enabled, if the server said so.
    #[must_use]
    pub fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    /// Returns when the member last logged in, if known.
    #[must_use]
    pub fn last_login(&self) -> Option<NaiveDateTime> {
        self.last_login
    }

    /// Merges submitted profile fields into this record.
    pub fn apply_profile(&mut self, update: &ProfileUpdate) {
        self.first_name.clone_from(&update.first_name);
        self.last_name.clone_from(&update.last_name);
    }
}
