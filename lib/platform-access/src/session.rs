//! Client-side record of who is signed in.
//!
//! The server tracks the session itself through a cookie; this holder only
//! mirrors the identity the server last reported so views can render it.

use crate::auth::ProfileUpdate;
use crate::error::AuthenticationError;
use crate::user::User;
use peakwave_core::UserId;
use tracing::debug;

/// The current member, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
}

impl SessionState {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current member.
    #[must_use]
    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns true if a member is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the current member or `NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Fails when nobody is signed in.
    pub fn require(&self) -> Result<&User, AuthenticationError> {
        self.user.as_ref().ok_or(AuthenticationError::NotAuthenticated)
    }

    /// Returns the current member's ID.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(User::id)
    }

    /// Replaces the member wholesale with a server-reported record.
    pub fn sign_in(&mut self, user: User) {
        debug!(user_id = %user.id(), "session user set");
        self.user = Some(user);
    }

    /// Forgets the member.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            debug!(user_id = %user.id(), "session user cleared");
        }
    }

    /// Merges a successful profile update into the current member.
    ///
    /// # Errors
    ///
    /// Fails when nobody is signed in.
    pub fn apply_profile(&mut self, update: &ProfileUpdate) -> Result<&User, AuthenticationError> {
        let user = self.user.as_mut().ok_or(AuthenticationError::NotAuthenticated)?;
        user.apply_profile(update);
        Ok(user)
    }
}
