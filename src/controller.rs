//! The toggle screen controller.
//!
//! Owns the screen's two flags and is the only thing that mutates them.
//! Recording can only be switched on while the microphone permission is
//! granted; when it is not, a toggle first goes through a permission request
//! and aborts without any state change if that request does not grant.

use mictoggle_permission::{Capability, PermissionAuthority, PermissionPrompt};
use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::{PermissionState, RecordingState, ScreenState};

const DENIED_TITLE: &str = "Permission Denied";
const DENIED_MESSAGE: &str = "Microphone permission is required to use this feature.";
const STATUS_TITLE: &str = "Microphone";

/// What a single toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Recording flipped to the contained state.
    Toggled(RecordingState),
    /// Permission was not granted, nothing changed.
    Blocked,
}

pub struct ToggleController {
    authority: Box<dyn PermissionAuthority>,
    notifier: Box<dyn Notifier>,
    state: ScreenState,
    checked: bool,
}

impl ToggleController {
    pub fn new(authority: Box<dyn PermissionAuthority>, notifier: Box<dyn Notifier>) -> Self {
        Self::with_state(authority, notifier, ScreenState::default())
    }

    /// Start from a given state instead of the initial one.
    pub fn with_state(
        authority: Box<dyn PermissionAuthority>,
        notifier: Box<dyn Notifier>,
        state: ScreenState,
    ) -> Self {
        Self {
            authority,
            notifier,
            state,
            checked: false,
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Query the microphone permission once per screen. Failures keep the
    /// previous value and are only logged. Later calls return the cached
    /// value without asking again.
    pub async fn check_permission(&mut self) -> PermissionState {
        if self.checked {
            debug!("Permission already checked for this screen");
            return self.state.permission;
        }
        self.checked = true;

        match self.authority.check(Capability::Microphone).await {
            Ok(permission) => {
                info!(
                    authority = self.authority.name(),
                    permission = %permission,
                    "Permission checked"
                );
                self.state.permission = permission;
            }
            Err(e) => {
                warn!(authority = self.authority.name(), error = %e, "Permission check failed");
            }
        }
        self.state.permission
    }

    /// Ask for the microphone. Returns whether it is granted afterwards.
    pub async fn request_permission(&mut self) -> bool {
        if self.state.permission.is_granted() {
            debug!("Permission already granted, not requesting");
            return true;
        }

        let prompt = PermissionPrompt::microphone();
        match self.authority.request(Capability::Microphone, &prompt).await {
            Ok(outcome) if outcome.is_granted() => {
                info!(authority = self.authority.name(), "Permission granted");
                self.state.permission = PermissionState::Granted;
                true
            }
            Ok(outcome) => {
                info!(authority = self.authority.name(), outcome = ?outcome, "Permission denied");
                self.notifier.alert(DENIED_TITLE, DENIED_MESSAGE).await;
                false
            }
            Err(e) => {
                warn!(authority = self.authority.name(), error = %e, "Permission request failed");
                false
            }
        }
    }

    /// Flip the microphone toggle, requesting permission first if needed.
    pub async fn toggle(&mut self) -> ToggleOutcome {
        if !self.state.permission.is_granted() && !self.request_permission().await {
            return ToggleOutcome::Blocked;
        }

        let recording = self.state.recording.toggled();
        self.state.recording = recording;
        info!(recording = %recording, "Microphone toggled");
        self.notifier
            .status(STATUS_TITLE, &format!("Microphone turned {}", recording));

        ToggleOutcome::Toggled(recording)
    }
}
