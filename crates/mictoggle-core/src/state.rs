//! Microphone toggle and permission state types.

use std::fmt;

/// Whether the microphone toggle is switched on. This is the app's own flag
/// and does not reflect any audio activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    On,
    #[default]
    Off,
}

impl RecordingState {
    pub fn is_on(&self) -> bool {
        matches!(self, RecordingState::On)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            RecordingState::On => RecordingState::Off,
            RecordingState::Off => RecordingState::On,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordingState::On => "ON",
            RecordingState::Off => "OFF",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Last observed microphone permission. Stays `NotGranted` until a check or a
/// request says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    Granted,
    #[default]
    NotGranted,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PermissionState::Granted => "Granted",
            PermissionState::NotGranted => "Not Granted",
        }
    }
}

impl From<bool> for PermissionState {
    fn from(granted: bool) -> Self {
        if granted {
            PermissionState::Granted
        } else {
            PermissionState::NotGranted
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the screen shows, as one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenState {
    pub recording: RecordingState,
    pub permission: PermissionState,
}

impl ScreenState {
    pub fn new(recording: RecordingState, permission: PermissionState) -> Self {
        Self {
            recording,
            permission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ScreenState::default();
        assert_eq!(state.recording, RecordingState::Off);
        assert_eq!(state.permission, PermissionState::NotGranted);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(RecordingState::Off.toggled(), RecordingState::On);
        assert_eq!(RecordingState::On.toggled(), RecordingState::Off);
        assert!(RecordingState::Off.toggled().is_on());
    }

    #[test]
    fn test_labels() {
        assert_eq!(RecordingState::On.to_string(), "ON");
        assert_eq!(RecordingState::Off.to_string(), "OFF");
        assert_eq!(PermissionState::Granted.to_string(), "Granted");
        assert_eq!(PermissionState::NotGranted.to_string(), "Not Granted");
    }

    #[test]
    fn test_permission_from_bool() {
        assert!(PermissionState::from(true).is_granted());
        assert!(!PermissionState::from(false).is_granted());
    }
}
