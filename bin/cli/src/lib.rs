//! Terminal front end for the Peakwave members area.
//!
//! Each invocation restores the saved session cookie, runs one command
//! through the dashboard controller and saves the cookie again.

mod cli;
mod commands;
mod config;
mod cookies;
mod error;
mod render;
mod terminal;

pub use cli::{Cli, Command, IntegrationSettings, IntegrationsCommand};
pub use commands::run;
pub use config::{CliConfig, SessionConfig};
pub use cookies::CookieFile;
pub use error::CliError;
pub use terminal::{StdinConfirm, TerminalNotifier};

use peakwave_api::{ApiClient, ApiConfig, HttpTransport};
use peakwave_dashboard::Dashboard;
use tracing::info;

/// Loads configuration, runs the parsed command and persists the session.
///
/// # Errors
///
/// Returns an error if setup fails or the command fails.
pub async fn execute(cli: Cli) -> peakwave_core::Result<(), CliError> {
    let mut config = CliConfig::load(cli.config.as_deref()).map_err(|e| CliError::Config {
        details: e.to_string(),
    })?;
    if let Some(base_url) = cli.base_url {
        config.api = ApiConfig::new(base_url);
    }
    info!(base_url = config.api.base_url(), "using members API");

    let transport = HttpTransport::new(&config.api).map_err(|e| CliError::Transport {
        details: e.details,
    })?;
    let cookie_file = CookieFile::new(&config.session.cookie_file);
    if let Some(header) = cookie_file.load()? {
        transport.restore_cookies(&header);
    }

    let mut dashboard = Dashboard::new(ApiClient::new(transport), TerminalNotifier);
    let logging_out = cli.command == Command::Logout;
    let confirm = StdinConfirm::new(cli.yes);
    let mut stdout = std::io::stdout().lock();
    let result = run(&mut dashboard, cli.command, &confirm, &mut stdout).await;

    if logging_out {
        cookie_file.clear()?;
    } else if let Some(header) = dashboard.client().transport().session_cookies() {
        cookie_file.save(&header)?;
    }
    result
}
