//! Core types and configuration for mictoggle.
//!
//! This crate provides platform-agnostic types shared by the permission
//! backends and the tray application.

mod config;
mod state;

pub use config::{Config, ConfigManager, PermissionModel};
pub use state::{PermissionState, RecordingState, ScreenState};

/// Application name
pub const APP_NAME: &str = "mictoggle";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "Mic Toggle";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
