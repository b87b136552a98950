//! Supported third-party services and their form field sets.
//!
//! Every service-specific decision (which credential fields exist, which are
//! required, how the service is presented) lives in [`SERVICE_CATALOG`]. Both
//! the create and the edit path of the integration form derive their fields
//! from this one table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A third-party service an integration can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    /// Twilio SMS and voice.
    Twilio,
    /// GoHighLevel CRM.
    #[serde(rename = "gohighlevel")]
    GoHighLevel,
    /// Zapier webhooks.
    Zapier,
    /// Make.com webhooks.
    Make,
}

impl ServiceName {
    /// All services in catalog order.
    pub const ALL: [ServiceName; 4] = [Self::Twilio, Self::GoHighLevel, Self::Zapier, Self::Make];

    /// Returns the wire identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twilio => "twilio",
            Self::GoHighLevel => "gohighlevel",
            Self::Zapier => "zapier",
            Self::Make => "make",
        }
    }

    /// Matches an exact wire identifier.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.as_str() == value)
    }

    /// Returns the catalog entry for this service.
    #[must_use]
    pub fn descriptor(&self) -> &'static ServiceDescriptor {
        match self {
            Self::Twilio => &SERVICE_CATALOG[0],
            Self::GoHighLevel => &SERVICE_CATALOG[1],
            Self::Zapier => &SERVICE_CATALOG[2],
            Self::Make => &SERVICE_CATALOG[3],
        }
    }

    /// Returns the ordered credential fields for this service.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.descriptor().fields
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a supported service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownService {
    /// The rejected identifier.
    pub name: String,
}

impl fmt::Display for UnknownService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service: '{}'", self.name)
    }
}

impl std::error::Error for UnknownService {}

impl FromStr for ServiceName {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == normalized)
            .ok_or_else(|| UnknownService {
                name: s.to_string(),
            })
    }
}

/// How a credential field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Plain text.
    Text,
    /// Secret value, never echoed back.
    Password,
    /// Telephone number.
    Tel,
}

/// One service-specific input of the integration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key under which the value is stored in `config_data`.
    pub key: &'static str,
    /// Form label.
    pub label: &'static str,
    /// Input kind.
    pub input_kind: InputKind,
    /// Whether the form refuses to submit without a value.
    pub required: bool,
    /// Hint shown under the input.
    pub help: &'static str,
}

/// Everything the dashboard knows about one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Service identifier.
    pub name: ServiceName,
    /// Heading of the configuration block.
    pub title: &'static str,
    /// One-line description on integration cards.
    pub description: &'static str,
    /// Icon class used by the card renderer.
    pub icon: &'static str,
    /// Ordered credential fields.
    pub fields: &'static [FieldSpec],
    /// Whether the service is driven by the integration's webhook URL.
    pub uses_webhook_url: bool,
}

const TWILIO_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "account_sid",
        label: "Account SID",
        input_kind: InputKind::Text,
        required: true,
        help: "Your Twilio Account SID",
    },
    FieldSpec {
        key: "auth_token",
        label: "Auth Token",
        input_kind: InputKind::Password,
        required: true,
        help: "Your Twilio Auth Token",
    },
    FieldSpec {
        key: "phone_number",
        label: "Phone Number",
        input_kind: InputKind::Tel,
        required: false,
        help: "Your Twilio phone number (optional)",
    },
];

const GOHIGHLEVEL_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "api_token",
        label: "API Token",
        input_kind: InputKind::Password,
        required: true,
        help: "Your GoHighLevel Private Integration Token",
    },
    FieldSpec {
        key: "location_id",
        label: "Location ID",
        input_kind: InputKind::Text,
        required: false,
        help: "Your GoHighLevel Location ID (optional)",
    },
];

/// The declarative service table.
pub const SERVICE_CATALOG: [ServiceDescriptor; 4] = [
    ServiceDescriptor {
        name: ServiceName::Twilio,
        title: "Twilio Configuration",
        description: "SMS and voice call automation",
        icon: "fas fa-sms",
        fields: TWILIO_FIELDS,
        uses_webhook_url: false,
    },
    ServiceDescriptor {
        name: ServiceName::GoHighLevel,
        title: "GoHighLevel Configuration",
        description: "CRM and marketing automation",
        icon: "fas fa-chart-line",
        fields: GOHIGHLEVEL_FIELDS,
        uses_webhook_url: false,
    },
    ServiceDescriptor {
        name: ServiceName::Zapier,
        title: "Zapier Configuration",
        description: "Workflow automation platform",
        icon: "fas fa-bolt",
        fields: &[],
        uses_webhook_url: true,
    },
    ServiceDescriptor {
        name: ServiceName::Make,
        title: "Make.com Configuration",
        description: "Advanced automation scenarios",
        icon: "fas fa-cogs",
        fields: &[],
        uses_webhook_url: true,
    },
];

/// Returns the ordered field set for a raw service identifier.
///
/// Total over all strings: only the exact wire identifiers match, anything
/// else (including the empty string) yields no fields.
#[must_use]
pub fn fields_for(service: &str) -> &'static [FieldSpec] {
    ServiceName::from_wire(service)
        .map(|name| name.fields())
        .unwrap_or(&[])
}
