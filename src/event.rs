//! Application events for the tao event loop.

use crate::ScreenState;

/// Events for the tao event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The screen published a new state
    StateChanged(ScreenState),
}
