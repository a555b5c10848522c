//! User-facing notices and system notifications.

use async_trait::async_trait;
use notify_rust::Notification;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};
use tokio::runtime::Handle;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber, debug, error};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::{APP_NAME, APP_NAME_PRETTY};

/// Shows notices to the user on behalf of the screen.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Modal notice. Returns once the user has dismissed it.
    async fn alert(&self, title: &str, message: &str);

    /// Transient status message. Does not wait for the user.
    fn status(&self, title: &str, message: &str);
}

/// Send a system notification with a summary and body.
pub fn notify(summary: &str, body: &str) {
    Notification::new()
        .appname(APP_NAME)
        .summary(&format!("{} - {}", APP_NAME_PRETTY, summary))
        .body(body)
        .show()
        .map_err(|e| error!("Failed to send notification: {}", e))
        .ok();
}

/// Notifier backed by native dialogs and desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    show_status: bool,
}

impl DesktopNotifier {
    pub fn new(show_status: bool) -> Self {
        Self { show_status }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn alert(&self, title: &str, message: &str) {
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    }

    fn status(&self, title: &str, message: &str) {
        if !self.show_status {
            debug!(title, message, "Status notifications disabled");
            return;
        }
        let (title, message) = (title.to_string(), message.to_string());
        run_blocking(move || notify(&title, &message));
    }
}

/// Run `f` on the runtime's blocking pool when called from inside a runtime,
/// so a slow notification daemon cannot stall the caller's task. Runs inline
/// otherwise.
fn run_blocking<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(f);
        }
        Err(_) => f(),
    }
}

/// Visitor to extract the message field from tracing events.
struct MessageVisitor {
    message: Option<String>,
}

impl MessageVisitor {
    fn new() -> Self {
        Self { message: None }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// Tracing layer that sends notifications for errors. Warnings stay in the
/// log only.
#[derive(Debug, Default)]
pub struct NotificationLayer {}

impl NotificationLayer {
    pub fn new() -> Self {
        Self {}
    }
}

fn should_notify(level: Level) -> Option<&'static str> {
    match level {
        Level::ERROR => Some("error"),
        _ => None,
    }
}

impl<S: Subscriber> Layer<S> for NotificationLayer {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        let level = *event.metadata().level();

        if let Some(summary) = should_notify(level) {
            let mut visitor = MessageVisitor::new();
            event.record(&mut visitor);

            if let Some(message) = visitor.message {
                run_blocking(move || notify(summary, &message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[tokio::test]
    async fn test_run_blocking_leaves_runtime_thread() {
        let caller = std::thread::current().id();
        let (sender, receiver) = tokio::sync::oneshot::channel();

        run_blocking(move || {
            sender.send(std::thread::current().id()).ok();
        });

        assert_ne!(receiver.await.unwrap(), caller);
    }

    #[test]
    fn test_run_blocking_inline_without_runtime() {
        let caller = std::thread::current().id();
        let ran_on = Arc::new(Mutex::new(None));
        let slot = ran_on.clone();

        run_blocking(move || {
            *slot.lock() = Some(std::thread::current().id());
        });

        assert_eq!(*ran_on.lock(), Some(caller));
    }

    #[test]
    fn test_only_errors_notify() {
        assert_eq!(should_notify(Level::ERROR), Some("error"));
        assert_eq!(should_notify(Level::WARN), None);
        assert_eq!(should_notify(Level::INFO), None);
        assert_eq!(should_notify(Level::DEBUG), None);
    }
}
