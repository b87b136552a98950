//! Command dispatch onto the dashboard controller.

use crate::cli::{Command, IntegrationSettings, IntegrationsCommand};
use crate::error::CliError;
use crate::render;
use peakwave_api::Transport;
use peakwave_dashboard::{Confirm, Dashboard, DashboardError, Section};
use peakwave_integration::{FormError, IntegrationForm, LogQuery};
use peakwave_platform_access::{Credentials, ProfileUpdate, Registration, User};
use rootcause::prelude::Report;
use std::io::Write;
use tracing::debug;

fn op<R>(result: Result<R, Report<DashboardError>>) -> Result<R, Report<CliError>> {
    result.map_err(|report| CliError::Operation(report.current_context().clone()).into())
}

fn emit(out: &mut dyn Write, text: &str) -> Result<(), Report<CliError>> {
    out.write_all(text.as_bytes()).map_err(|e| CliError::Output {
        details: e.to_string(),
    })?;
    Ok(())
}

async fn require_session<T: Transport>(
    dashboard: &mut Dashboard<T>,
) -> Result<User, Report<CliError>> {
    match dashboard.check_session().await {
        Ok(user) => Ok(user),
        Err(report) => match report.current_context().api() {
            Some(api) if api.is_auth() => Err(CliError::NotSignedIn.into()),
            _ => Err(CliError::SessionCheck {
                details: report.current_context().to_string(),
            }
            .into()),
        },
    }
}

fn fill_form(
    form: &mut IntegrationForm,
    service: Option<&str>,
    settings: &IntegrationSettings,
) -> Result<(), FormError> {
    if let Some(service) = service {
        form.select_service(service)?;
    }
    if let Some(name) = &settings.name {
        form.set_display_name(name.as_str())?;
    }
    if let Some(url) = &settings.webhook_url {
        form.set_webhook_url(url.as_str())?;
    }
    if let Some(active) = settings.active {
        form.set_active(active)?;
    }
    for (key, value) in &settings.fields {
        form.set_field(key, value.as_str())?;
    }
    Ok(())
}

async fn submit<T: Transport>(
    dashboard: &mut Dashboard<T>,
    service: Option<&str>,
    settings: &IntegrationSettings,
    out: &mut dyn Write,
) -> Result<(), Report<CliError>> {
    if let Err(e) = fill_form(dashboard.form_mut(), service, settings) {
        dashboard.form_mut().close();
        return Err(CliError::from(e).into());
    }
    if let Some(saved) = op(dashboard.submit_form().await)? {
        emit(out, &render::integration_detail(&saved))?;
    }
    Ok(())
}

/// Runs one command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if the member is not signed in (for commands that need
/// a session) or the operation fails.
pub async fn run<T: Transport>(
    dashboard: &mut Dashboard<T>,
    command: Command,
    confirm: &dyn Confirm,
    out: &mut dyn Write,
) -> Result<(), Report<CliError>> {
    debug!(?command, "running command");
    let user = if command.requires_session() {
        Some(require_session(dashboard).await?)
    } else {
        None
    };

    match command {
        Command::Whoami => {
            if let Some(user) = &user {
                emit(out, &render::profile(user))?;
            }
        }
        Command::Login { email, password } => {
            op(dashboard.login(&Credentials::new(email, password)).await)?;
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let registration = Registration {
                first_name,
                last_name,
                email,
                password,
            };
            op(dashboard.register(&registration).await)?;
        }
        Command::Logout => op(dashboard.logout().await)?,
        Command::Profile {
            first_name,
            last_name,
        } => {
            let Some(current) = user else {
                return Err(CliError::NotSignedIn.into());
            };
            if first_name.is_none() && last_name.is_none() {
                emit(out, &render::profile(&current))?;
            } else {
                let update = ProfileUpdate {
                    first_name: first_name.unwrap_or_else(|| current.first_name().to_string()),
                    last_name: last_name.unwrap_or_else(|| current.last_name().to_string()),
                };
                let updated = op(dashboard.update_profile(&update).await)?;
                emit(out, &render::profile(&updated))?;
            }
        }
        Command::Password {
            current,
            new,
            confirm: confirmation,
        } => {
            op(dashboard.change_password(&current, &new, &confirmation).await)?;
        }
        Command::Integrations(command) => {
            run_integrations(dashboard, command, confirm, out).await?;
        }
        Command::Services => emit(out, &render::services())?,
        Command::Logs {
            service,
            page,
            per_page,
        } => {
            let query = LogQuery {
                service,
                page,
                per_page,
            };
            let page = op(dashboard.load_logs(query).await)?;
            emit(out, &render::logs(page))?;
        }
        Command::Dashboard => {
            if let Some(user) = &user {
                emit(out, &render::dashboard(user, dashboard.registry()))?;
            }
        }
    }
    Ok(())
}

async fn run_integrations<T: Transport>(
    dashboard: &mut Dashboard<T>,
    command: IntegrationsCommand,
    confirm: &dyn Confirm,
    out: &mut dyn Write,
) -> Result<(), Report<CliError>> {
    match command {
        IntegrationsCommand::List => {
            op(dashboard.show_section(Section::Integrations).await)?;
            emit(out, &render::integrations(dashboard.registry().all()))?;
        }
        IntegrationsCommand::Show { id } => {
            let integration = op(dashboard.load_integration(id).await)?;
            emit(out, &render::integration_detail(&integration))?;
        }
        IntegrationsCommand::Add { service, settings } => {
            dashboard.open_create();
            submit(dashboard, Some(&service), &settings, out).await?;
        }
        IntegrationsCommand::Edit {
            id,
            service,
            settings,
        } => {
            op(dashboard.open_edit(id))?;
            submit(dashboard, service.as_deref(), &settings, out).await?;
        }
        IntegrationsCommand::Delete { id } => {
            if !op(dashboard.delete(id, confirm).await)? {
                emit(out, "Cancelled.\n")?;
            }
        }
        IntegrationsCommand::Test { id } => {
            let outcome = op(dashboard.test(id).await)?;
            if let Some(account) = outcome.account_name {
                emit(out, &format!("Account: {account}\n"))?;
            }
        }
        IntegrationsCommand::TestAll => {
            op(dashboard.test_all().await)?;
        }
    }
    Ok(())
}
