//! Members dashboard controller.
//!
//! [`Dashboard`] owns the application state ([`AppState`]) and drives every
//! user action against the members API: it holds the session, keeps the
//! integration list in sync with the server, runs credential tests, loads
//! webhook logs and reports each outcome through a [`Notifier`].
//!
//! # Example
//!
//! ```ignore
//! let client = ApiClient::new(HttpTransport::new(&ApiConfig::default())?);
//! let mut dashboard = Dashboard::new(client, ToastLog::new());
//! if dashboard.check_session().await.is_err() {
//!     dashboard.login(&Credentials::new(email, password)).await?;
//! }
//! let summary = dashboard.test_all().await?;
//! ```

mod confirm;
mod dashboard;
mod error;
mod loading;
mod notify;
mod state;
mod view;

pub use confirm::{Confirm, DELETE_PROMPT};
pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use loading::{LoadingGuard, LoadingIndicator};
pub use notify::{Notifier, Toast, ToastLevel, ToastLog};
pub use state::AppState;
pub use view::{Section, View};
