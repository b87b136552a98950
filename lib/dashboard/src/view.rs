//! Which screen the member is looking at.

use std::fmt;
use std::str::FromStr;

/// Sections of the signed-in area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Integrations,
    Logs,
    Profile,
}

impl Section {
    /// All sections in navigation order.
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Integrations,
        Section::Logs,
        Section::Profile,
    ];

    /// Returns the section identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Integrations => "integrations",
            Self::Logs => "logs",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Sign-in form.
    #[default]
    Login,
    /// Account creation form.
    Register,
    /// Signed-in area.
    Main(Section),
}

impl View {
    /// Switches between the sign-in and registration forms.
    ///
    /// The signed-in area is left as is.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
            main @ Self::Main(_) => main,
        }
    }

    /// Returns the section, if signed in.
    #[must_use]
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Main(section) => Some(*section),
            Self::Login | Self::Register => None,
        }
    }
}
