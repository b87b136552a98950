//! Member identity and session state for the Peakwave dashboard.
//!
//! This crate provides:
//! - The `User` record reported by the identity endpoints
//! - Request bodies for login, registration, profile and password changes
//! - `SessionState`, the client-side holder of the signed-in member
//! - Client-side authentication error types
//!
//! # Example
//!
//! ```
//! use peakwave_core::UserId;
//! use peakwave_platform_access::{ProfileUpdate, SessionState, User};
//!
//! let mut session = SessionState::new();
//! session.sign_in(User::new(UserId::new(1), "ana@example.com", "Ana", "Silva"));
//!
//! session
//!     .apply_profile(&ProfileUpdate {
//!         first_name: "Ana".to_string(),
//!         last_name: "Souza".to_string(),
//!     })
//!     .expect("signed in");
//!
//! assert_eq!(session.current().map(|u| u.display_name()), Some("Ana Souza".to_string()));
//!
//! session.sign_out();
//! assert!(!session.is_authenticated());
//! ```

pub mod auth;
pub mod error;
pub mod session;
pub mod user;

pub use auth::{Credentials, PasswordChange, ProfileUpdate, Registration};
pub use error::AuthenticationError;
pub use session::SessionState;
pub use user::User;
