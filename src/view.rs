//! Presentation model for the toggle screen.

use crate::ScreenState;
use crate::color::{Color, GREEN, RED};

pub const TITLE: &str = "Microphone Toggle App";
pub const SUBTITLE: &str = "Tap the button below to turn your microphone on or off";
pub const STATUS_LABEL: &str = "Microphone Status:";
pub const PERMISSION_LABEL: &str = "Permission Status:";

/// Everything the screen displays for one [`ScreenState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub status_text: &'static str,
    pub status_color: Color,
    pub button_label: &'static str,
    pub permission_text: &'static str,
    pub permission_color: Color,
}

impl From<ScreenState> for ScreenView {
    fn from(state: ScreenState) -> Self {
        let on = state.recording.is_on();
        let granted = state.permission.is_granted();
        Self {
            status_text: state.recording.label(),
            status_color: if on { GREEN } else { RED },
            button_label: if on { "🎤 Turn OFF" } else { "🔇 Turn ON" },
            permission_text: state.permission.label(),
            permission_color: if granted { GREEN } else { RED },
        }
    }
}

impl ScreenView {
    pub fn status_line(&self) -> String {
        format!("{} {}", STATUS_LABEL, self.status_text)
    }

    pub fn permission_line(&self) -> String {
        format!("{} {}", PERMISSION_LABEL, self.permission_text)
    }
}
