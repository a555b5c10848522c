//! Runs the toggle controller as the single owner of screen state.
//!
//! The UI thread never touches the controller. It sends commands through a
//! [`ScreenHandle`] and receives state snapshots through the observer given
//! to [`spawn_screen`]. Commands are handled one at a time in the order they
//! were sent, so a toggle issued while a permission prompt is open waits for
//! the prompt and is then applied on its own.

use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ScreenState;
use crate::controller::ToggleController;

#[derive(Debug, Error)]
pub enum ScreenError {
    /// The screen task is no longer running
    #[error("screen is closed")]
    Closed,
    #[error("screen task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    /// Queued commands did not finish in time, e.g. a dialog is still open
    #[error("screen did not close within {0:?}")]
    Timeout(Duration),
}

type Result<T> = std::result::Result<T, ScreenError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// The user activated the microphone control
    Toggle,
    /// Tear the screen down
    Close,
}

/// Handle used by the UI to drive the screen task.
pub struct ScreenHandle {
    commands: mpsc::UnboundedSender<ScreenCommand>,
    task: JoinHandle<ScreenState>,
}

impl ScreenHandle {
    /// Queue a toggle. Every call results in exactly one toggle attempt.
    pub fn toggle(&self) -> Result<()> {
        self.send(ScreenCommand::Toggle)
    }

    fn send(&self, command: ScreenCommand) -> Result<()> {
        self.commands.send(command).map_err(|_| ScreenError::Closed)
    }

    /// Close the screen after all queued commands and return its final state.
    pub async fn close(self) -> Result<ScreenState> {
        // The task may already be gone, the join below reports the outcome.
        self.send(ScreenCommand::Close).ok();
        Ok(self.task.await?)
    }

    /// Like [`close`](Self::close), but gives up after `limit`. The screen
    /// task keeps running until its runtime shuts down.
    pub async fn close_within(self, limit: Duration) -> Result<ScreenState> {
        tokio::time::timeout(limit, self.close())
            .await
            .map_err(|_| ScreenError::Timeout(limit))?
    }
}

/// Spawn the screen task on `runtime`. The permission is checked once before
/// any command is read, and `on_change` receives the state at start, after
/// that check and after every command.
pub fn spawn_screen<F>(runtime: &Handle, controller: ToggleController, on_change: F) -> ScreenHandle
where
    F: Fn(ScreenState) + Send + 'static,
{
    let (commands, receiver) = mpsc::unbounded_channel();
    let task = runtime.spawn(run_screen(controller, receiver, on_change));
    ScreenHandle { commands, task }
}

async fn run_screen<F>(
    mut controller: ToggleController,
    mut commands: mpsc::UnboundedReceiver<ScreenCommand>,
    on_change: F,
) -> ScreenState
where
    F: Fn(ScreenState) + Send + 'static,
{
    on_change(controller.state());

    controller.check_permission().await;
    on_change(controller.state());

    while let Some(command) = commands.recv().await {
        debug!(command = ?command, "Screen command");
        match command {
            ScreenCommand::Toggle => {
                controller.toggle().await;
                on_change(controller.state());
            }
            ScreenCommand::Close => break,
        }
    }

    let state = controller.state();
    info!(state = ?state, "Screen closed");
    state
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mictoggle_permission::RequestOutcome;
    use parking_lot::Mutex;

    use super::*;
    use crate::controller::tests::{FakeAuthority, Notice, RecordingNotifier};
    use crate::notify::Notifier;
    use crate::{PermissionState, RecordingState};

    fn start(
        authority: &FakeAuthority,
        notifier: &RecordingNotifier,
    ) -> (ScreenHandle, Arc<Mutex<Vec<ScreenState>>>) {
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = published.clone();
        let controller =
            ToggleController::new(Box::new(authority.clone()), Box::new(notifier.clone()));
        let handle = spawn_screen(&Handle::current(), controller, move |state| {
            sink.lock().push(state)
        });
        (handle, published)
    }

    #[tokio::test]
    async fn test_checks_once_before_commands() {
        let authority = FakeAuthority::new(Some(PermissionState::Granted), None);
        let notifier = RecordingNotifier::default();
        let (handle, published) = start(&authority, &notifier);

        handle.toggle().unwrap();
        let state = handle.close().await.unwrap();

        assert_eq!(authority.checks(), 1);
        assert_eq!(authority.requested(), 0);
        assert_eq!(
            state,
            ScreenState::new(RecordingState::On, PermissionState::Granted)
        );
        assert_eq!(
            *published.lock(),
            vec![
                ScreenState::default(),
                ScreenState::new(RecordingState::Off, PermissionState::Granted),
                ScreenState::new(RecordingState::On, PermissionState::Granted),
            ]
        );
    }

    #[tokio::test]
    async fn test_close_without_commands() {
        let authority = FakeAuthority::denying();
        let notifier = RecordingNotifier::default();
        let (handle, published) = start(&authority, &notifier);

        let state = handle.close().await.unwrap();
        assert_eq!(state, ScreenState::default());
        assert_eq!(authority.checks(), 1);
        assert_eq!(published.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_rapid_toggles_are_not_coalesced() {
        let authority = FakeAuthority::granting();
        let notifier = RecordingNotifier::default();
        let (handle, published) = start(&authority, &notifier);

        for _ in 0..4 {
            handle.toggle().unwrap();
        }
        let state = handle.close().await.unwrap();

        assert_eq!(
            state,
            ScreenState::new(RecordingState::Off, PermissionState::Granted)
        );
        assert_eq!(authority.requested(), 1);
        assert_eq!(published.lock().len(), 6);

        let statuses: Vec<_> = notifier
            .notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Status(_, message) => Some(message),
                Notice::Alert(..) => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                "Microphone turned ON",
                "Microphone turned OFF",
                "Microphone turned ON",
                "Microphone turned OFF",
            ]
        );
    }

    #[tokio::test]
    async fn test_denied_screen_stays_off() {
        let authority = FakeAuthority::denying().then(Some(RequestOutcome::NeverAskAgain));
        let notifier = RecordingNotifier::default();
        let (handle, _published) = start(&authority, &notifier);

        for _ in 0..3 {
            handle.toggle().unwrap();
        }
        let state = handle.close().await.unwrap();

        assert_eq!(state, ScreenState::default());
        assert!(
            notifier
                .notices()
                .iter()
                .all(|n| matches!(n, Notice::Alert(..)))
        );
    }

    /// Notifier whose alert is never dismissed.
    struct StuckNotifier;

    #[async_trait]
    impl Notifier for StuckNotifier {
        async fn alert(&self, _title: &str, _message: &str) {
            std::future::pending::<()>().await
        }

        fn status(&self, _title: &str, _message: &str) {}
    }

    #[tokio::test]
    async fn test_close_within_gives_up_on_open_dialog() {
        let authority = FakeAuthority::denying();
        let controller =
            ToggleController::new(Box::new(authority.clone()), Box::new(StuckNotifier));
        let handle = spawn_screen(&Handle::current(), controller, |_| {});

        handle.toggle().unwrap();
        let limit = Duration::from_millis(50);
        let result = handle.close_within(limit).await;

        assert!(matches!(result, Err(ScreenError::Timeout(d)) if d == limit));
        assert_eq!(authority.requested(), 1);
    }

    #[tokio::test]
    async fn test_close_within_returns_state() {
        let authority = FakeAuthority::granting();
        let notifier = RecordingNotifier::default();
        let (handle, _published) = start(&authority, &notifier);

        handle.toggle().unwrap();
        let state = handle.close_within(Duration::from_secs(5)).await.unwrap();
        assert_eq!(
            state,
            ScreenState::new(RecordingState::On, PermissionState::Granted)
        );
    }

    #[tokio::test]
    async fn test_toggle_after_close_fails() {
        let authority = FakeAuthority::denying();
        let notifier = RecordingNotifier::default();
        let (handle, _published) = start(&authority, &notifier);

        handle.send(ScreenCommand::Close).unwrap();
        // Wait for the task to drain and drop its receiver.
        while !handle.task.is_finished() {
            tokio::task::yield_now().await;
        }
        assert!(matches!(handle.toggle(), Err(ScreenError::Closed)));
    }
}
