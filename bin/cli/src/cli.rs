//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};
use peakwave_core::IntegrationId;
use std::path::PathBuf;

/// Peakwave members area in the terminal.
#[derive(Parser, Debug)]
#[command(name = "peakwave", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Members API origin (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the signed-in member
    Whoami,
    /// Sign in
    Login {
        /// Login email
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Login email
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Given name
        #[arg(long, default_value = "")]
        first_name: String,
        /// Family name
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show or update the profile
    Profile {
        /// New given name
        #[arg(long)]
        first_name: Option<String>,
        /// New family name
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Change the password
    Password {
        /// Password currently in use
        #[arg(long)]
        current: String,
        /// Replacement password
        #[arg(long)]
        new: String,
        /// Replacement password again
        #[arg(long)]
        confirm: String,
    },
    /// Manage integrations
    #[command(subcommand)]
    Integrations(IntegrationsCommand),
    /// List supported services and their settings
    Services,
    /// Show webhook event logs
    Logs {
        /// Only this service
        #[arg(long)]
        service: Option<String>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Entries per page
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show the overview
    Dashboard,
}

impl Command {
    /// Returns true if the command needs a live session.
    #[must_use]
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Self::Login { .. } | Self::Register { .. } | Self::Logout | Self::Services
        )
    }
}

/// Integration commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum IntegrationsCommand {
    /// List integrations
    List,
    /// Show one integration
    Show {
        /// Integration ID
        id: IntegrationId,
    },
    /// Add an integration
    Add {
        /// Service: twilio, gohighlevel, zapier or make
        service: String,
        #[command(flatten)]
        settings: IntegrationSettings,
    },
    /// Change an integration
    Edit {
        /// Integration ID
        id: IntegrationId,
        /// Switch to another service (clears its credentials)
        #[arg(long)]
        service: Option<String>,
        #[command(flatten)]
        settings: IntegrationSettings,
    },
    /// Delete an integration
    Delete {
        /// Integration ID
        id: IntegrationId,
    },
    /// Test an integration's credentials
    Test {
        /// Integration ID
        id: IntegrationId,
    },
    /// Test every active integration
    TestAll,
}

/// Inputs of the integration form.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationSettings {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Webhook URL (Zapier and Make.com)
    #[arg(long)]
    pub webhook_url: Option<String>,
    /// Mark active or inactive
    #[arg(long)]
    pub active: Option<bool>,
    /// Service credential as key=value (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
