// Re-export from sub-crates
pub use mictoggle_core::{
    APP_NAME, APP_NAME_PRETTY, Config, ConfigManager, DEFAULT_LOG_LEVEL, PermissionModel,
    PermissionState, RecordingState, ScreenState,
};
pub use mictoggle_permission::{
    AlwaysGranted, Capability, DialogPrompter, PermissionAuthority, PermissionError,
    PermissionPrompt, PromptingAuthority, RequestOutcome, authority_for,
};

// App-specific modules
pub mod color;
pub mod config_ext;
pub mod controller;
pub mod event;
pub mod icon;
pub mod notify;
pub mod screen;
pub mod view;

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
