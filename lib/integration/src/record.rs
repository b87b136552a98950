//! Integration records as served by the members API.

use crate::service::ServiceName;
use chrono::NaiveDateTime;
use peakwave_core::IntegrationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Service-specific credential values keyed by field key.
pub type ConfigData = BTreeMap<String, String>;

/// A stored integration owned by the current member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Server-assigned identifier.
    pub id: IntegrationId,
    /// Target service.
    pub service_name: ServiceName,
    /// Member-chosen label.
    pub display_name: String,
    /// Outbound webhook URL (Zapier and Make.com are driven by it).
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Whether the integration takes part in tests and event delivery.
    #[serde(default)]
    pub is_active: bool,
    /// Service credentials.
    #[serde(default)]
    pub config_data: ConfigData,
    /// When the record was created.
    #[serde(
        default,
        deserialize_with = "peakwave_core::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    /// When the record was last updated.
    #[serde(
        default,
        deserialize_with = "peakwave_core::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Integration {
    /// Returns the webhook URL, treating an empty string as unset.
    #[must_use]
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns the human-readable status label.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSpec {
    /// Target service.
    pub service_name: ServiceName,
    /// Member-chosen label.
    pub display_name: String,
    /// Outbound webhook URL; empty when unset.
    pub webhook_url: String,
    /// Active flag.
    pub is_active: bool,
    /// Exactly the keys of the service's field set.
    pub config_data: ConfigData,
}
