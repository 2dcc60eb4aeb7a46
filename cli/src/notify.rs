//! User-facing notifications.
//!
//! The [`Notifier`] trait is the notification collaborator of the workspace
//! context. [`ConsoleNotifier`] prints to the terminal.

use crate::workspace::{FlashMessage, Severity};

/// Receives notifications raised by the sync operations.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn ok(&self, title: &str);
    fn warning(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
    fn info(&self, title: &str);
}

/// Dispatches backend flash messages to the channel matching their severity.
pub fn dispatch_flash_messages(notifier: &dyn Notifier, messages: &[FlashMessage]) {
    for FlashMessage {
        title,
        message,
        severity,
    } in messages
    {
        let headline = if title.is_empty() { message } else { title };
        match severity {
            Severity::Ok => notifier.ok(headline),
            Severity::Warning => notifier.warning(title, message),
            Severity::Error => notifier.error(title, message),
            Severity::Info => notifier.info(headline),
        }
    }
}

/// Prints notifications, problems to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn ok(&self, title: &str) {
        println!("✓ {title}");
    }

    fn warning(&self, title: &str, message: &str) {
        eprintln!("! {}", join(title, message));
    }

    fn error(&self, title: &str, message: &str) {
        eprintln!("✗ {}", join(title, message));
    }

    fn info(&self, title: &str) {
        println!("  {title}");
    }
}

fn join(title: &str, message: &str) -> String {
    match (title.is_empty(), message.is_empty()) {
        (false, false) => format!("{title}: {message}"),
        (true, _) => message.to_string(),
        (false, true) => title.to_string(),
    }
}
