//! Terminal implementations of the dashboard's notifier and confirm seams.

use peakwave_dashboard::{Confirm, Notifier, Toast, ToastLevel};
use std::io::{BufRead, Write};

/// Prints toasts: successes and info to stdout, warnings and errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

/// Formats a toast as one terminal line.
#[must_use]
pub fn format_toast(toast: &Toast) -> String {
    let marker = match toast.level {
        ToastLevel::Success => "ok",
        ToastLevel::Error => "error",
        ToastLevel::Warning => "warning",
        ToastLevel::Info => "info",
    };
    format!("[{marker}] {}", toast.message)
}

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        let line = format_toast(&toast);
        match toast.level {
            ToastLevel::Success | ToastLevel::Info => println!("{line}"),
            ToastLevel::Error | ToastLevel::Warning => eprintln!("{line}"),
        }
    }
}

/// Asks on stdin; only "y" or "yes" confirms.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    /// Creates a prompt; `assume_yes` answers every prompt with yes.
    #[must_use]
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// Returns true for an affirmative answer.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        if std::io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}
