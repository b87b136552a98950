//! Webhook activity log entries.

use chrono::NaiveDateTime;
use peakwave_core::LogEntryId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome recorded for a webhook event.
///
/// Statuses the dashboard does not know are kept verbatim so they display
/// exactly as the server sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogStatus {
    /// Event processed.
    Success,
    /// Event processing failed.
    Failed,
    /// Any other status string.
    Other(String),
}

impl LogStatus {
    /// Returns the status as displayed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for LogStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "success" => Self::Success,
            "failed" => Self::Failed,
            _ => Self::Other(raw),
        }
    }
}

impl From<LogStatus> for String {
    fn from(status: LogStatus) -> Self {
        match status {
            LogStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One server-recorded webhook event. Never mutated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: Option<LogEntryId>,
    /// Service the event belongs to. Kept as a string: logs may predate
    /// or outlive the services the dashboard can configure.
    pub service_name: String,
    /// Event type reported by the service.
    pub event_type: String,
    /// Processing outcome.
    pub status: LogStatus,
    /// Failure detail.
    #[serde(default)]
    pub error_message: Option<String>,
    /// When the event was recorded. `None` when missing or unparseable.
    #[serde(
        default,
        deserialize_with = "peakwave_core::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl LogEntry {
    /// Returns the details column: the error message, or "Success".
    #[must_use]
    pub fn details(&self) -> &str {
        self.error_message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or("Success")
    }
}

/// One page of the log list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPage {
    /// Entries, newest first.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// Total matching entries.
    #[serde(default)]
    pub total: u64,
    /// Number of pages.
    #[serde(default)]
    pub pages: u64,
    /// Page returned.
    #[serde(default = "first_page")]
    pub current_page: u32,
}

fn first_page() -> u32 {
    1
}

/// Filter and paging for the log list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Only entries for this service; `None` or empty lists all.
    pub service: Option<String>,
    /// 1-based page; server default when unset.
    pub page: Option<u32>,
    /// Page size; server default when unset.
    pub per_page: Option<u32>,
}

impl LogQuery {
    /// Lists every service.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Filters on one service.
    #[must_use]
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            ..Self::default()
        }
    }

    /// Sets the page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Returns the query-string pairs. An empty service filter is omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(service) = self.service.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("service".to_string(), service.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        pairs
    }
}
