//! Plain-text rendering of dashboard data.

use peakwave_integration::{
    InputKind, Integration, IntegrationRegistry, LogPage, SERVICE_CATALOG, ServiceName,
};
use peakwave_platform_access::User;
use std::fmt::Write;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MASK: &str = "********";

fn title(service: ServiceName) -> &'static str {
    service
        .descriptor()
        .title
        .trim_end_matches(" Configuration")
}

/// Renders the integration list, one line per record.
#[must_use]
pub fn integrations(items: &[Integration]) -> String {
    if items.is_empty() {
        return "No integrations yet. Add one with `peakwave integrations add`.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<12} {:<28} {:<9} WEBHOOK",
        "ID", "SERVICE", "NAME", "STATUS"
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:<6} {:<12} {:<28} {:<9} {}",
            item.id,
            item.service_name,
            item.display_name,
            item.status_label(),
            item.webhook_url().unwrap_or("-")
        );
    }
    out
}

/// Renders one integration with its credentials, masking secrets.
#[must_use]
pub fn integration_detail(item: &Integration) -> String {
    let descriptor = item.service_name.descriptor();
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", item.display_name, item.id);
    let _ = writeln!(out, "  Service:  {} - {}", title(item.service_name), descriptor.description);
    let _ = writeln!(out, "  Status:   {}", item.status_label());
    let _ = writeln!(out, "  Webhook:  {}", item.webhook_url().unwrap_or("-"));
    for field in descriptor.fields {
        let value = item
            .config_data
            .get(field.key)
            .map(String::as_str)
            .filter(|v| !v.is_empty());
        let shown = match (value, field.input_kind) {
            (None, _) => "-",
            (Some(_), InputKind::Password) => MASK,
            (Some(v), _) => v,
        };
        let _ = writeln!(out, "  {}: {}", field.label, shown);
    }
    if let Some(updated) = item.updated_at.or(item.created_at) {
        let _ = writeln!(out, "  Updated:  {}", updated.format(TIME_FORMAT));
    }
    out
}

/// Renders the service catalog with each service's inputs.
#[must_use]
pub fn services() -> String {
    let mut out = String::new();
    for descriptor in &SERVICE_CATALOG {
        let _ = writeln!(
            out,
            "{:<12} {} - {}",
            descriptor.name,
            title(descriptor.name),
            descriptor.description
        );
        if descriptor.uses_webhook_url {
            let _ = writeln!(out, "    --webhook-url <url>  (required by the service)");
        }
        for field in descriptor.fields {
            let flag = if field.required { "required" } else { "optional" };
            let _ = writeln!(
                out,
                "    --field {}=<value>  {} ({flag})",
                field.key, field.help
            );
        }
    }
    out
}

/// Renders a log page as a table with a paging footer.
#[must_use]
pub fn logs(page: &LogPage) -> String {
    if page.logs.is_empty() {
        return "No webhook logs found.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<19} {:<12} {:<24} {:<8} DETAILS",
        "TIME", "SERVICE", "EVENT", "STATUS"
    );
    for entry in &page.logs {
        let _ = writeln!(
            out,
            "{:<19} {:<12} {:<24} {:<8} {}",
            entry
                .created_at
                .map_or_else(|| "-".to_string(), |at| at.format(TIME_FORMAT).to_string()),
            entry.service_name,
            entry.event_type,
            entry.status.as_str(),
            entry.details()
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} entries)",
        page.current_page,
        page.pages.max(1),
        page.total
    );
    out
}

/// Renders the member's profile.
#[must_use]
pub fn profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>", user.display_name(), user.email());
    let _ = writeln!(out, "  First name: {}", user.first_name());
    let _ = writeln!(out, "  Last name:  {}", user.last_name());
    if let Some(last_login) = user.last_login() {
        let _ = writeln!(out, "  Last login: {}", last_login.format(TIME_FORMAT));
    }
    out
}

/// Renders the overview: greeting, active count and per-service status.
#[must_use]
pub fn dashboard(user: &User, registry: &IntegrationRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to your Peakwave Members Area, {}", user.display_name());
    let _ = writeln!(out, "Active integrations: {}", registry.active_count());
    for descriptor in &SERVICE_CATALOG {
        let configured = registry
            .all()
            .iter()
            .filter(|item| item.service_name == descriptor.name);
        let (total, active) = configured.fold((0, 0), |(total, active), item| {
            (total + 1, active + usize::from(item.is_active))
        });
        let status = match (total, active) {
            (0, _) => "not connected".to_string(),
            (_, 0) => "inactive".to_string(),
            (_, n) => format!("{n} active"),
        };
        let _ = writeln!(out, "  {:<12} {status}", title(descriptor.name));
    }
    out
}
