//! Integration domain for the Peakwave members dashboard.
//!
//! This crate provides:
//!
//! - **Service catalog**: One declarative table of per-service credential fields
//! - **Records**: Integrations as served by the API and the write payload
//! - **Form controller**: The create/edit dialog state machine
//! - **Registry**: The client-side mirror of the member's integrations
//! - **Logs**: Webhook activity entries and the list query

pub mod error;
pub mod form;
pub mod log;
pub mod record;
pub mod registry;
pub mod service;

pub use error::FormError;
pub use form::{FormMode, FormState, IntegrationDraft, IntegrationForm, Submission};
pub use log::{LogEntry, LogPage, LogQuery, LogStatus};
pub use record::{ConfigData, Integration, IntegrationSpec};
pub use registry::{IntegrationRegistry, TestSummary};
pub use service::{
    FieldSpec, InputKind, SERVICE_CATALOG, ServiceDescriptor, ServiceName, UnknownService,
    fields_for,
};
