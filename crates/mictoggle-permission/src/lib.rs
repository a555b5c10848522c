//! Permission backend library for mictoggle.
//!
//! This crate provides a trait-based abstraction over the platform's
//! permission subsystem, with an always-granted implementation for platforms
//! that have no consent model and a prompting implementation for platforms
//! that ask the user first.

mod dialog;
mod granted;
mod prompting;

use std::fmt;

use async_trait::async_trait;
pub use dialog::DialogPrompter;
pub use granted::AlwaysGranted;
pub use mictoggle_core::{PermissionModel, PermissionState};
pub use prompting::{PromptAnswer, Prompter, PromptingAuthority};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while talking to the permission subsystem.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Permission query failed: {0}")]
    QueryFailed(String),

    #[error("Permission request failed: {0}")]
    RequestFailed(String),

    #[error("Permission prompt unavailable: {0}")]
    PromptUnavailable(String),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermissionError>;

/// A named platform permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Microphone,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Microphone => "microphone",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text shown to the user when a capability is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPrompt {
    pub title: String,
    pub message: String,
    pub button_positive: String,
    pub button_negative: String,
    pub button_neutral: String,
}

impl PermissionPrompt {
    /// The prompt used when asking for the microphone.
    pub fn microphone() -> Self {
        Self {
            title: "Microphone Permission".to_string(),
            message: "This app needs access to your microphone to record audio.".to_string(),
            button_positive: "OK".to_string(),
            button_negative: "Cancel".to_string(),
            button_neutral: "Ask Me Later".to_string(),
        }
    }
}

/// How a permission request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Granted,
    Denied,
    /// Denied, and the platform will no longer show the prompt.
    NeverAskAgain,
}

impl RequestOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, RequestOutcome::Granted)
    }
}

/// Trait for permission backends.
///
/// Implement this trait to add new platform permission models.
#[async_trait]
pub trait PermissionAuthority: Send + Sync {
    /// Query the current grant for a capability without side effects.
    async fn check(&self, capability: Capability) -> Result<PermissionState>;

    /// Ask for a capability. May show a native prompt and wait for the user.
    async fn request(
        &self,
        capability: Capability,
        prompt: &PermissionPrompt,
    ) -> Result<RequestOutcome>;

    /// Returns the name of this authority for logging/debugging.
    fn name(&self) -> &str;
}

/// Build the authority for the configured permission model.
///
/// `Auto` prompts on macOS, the desktop platform with a microphone consent
/// model, and grants implicitly everywhere else.
pub fn authority_for(model: PermissionModel) -> Box<dyn PermissionAuthority> {
    let resolved = resolve(model);
    debug!(configured = ?model, resolved = ?resolved, "Selecting permission authority");
    match resolved {
        PermissionModel::Prompting => Box::new(PromptingAuthority::new(DialogPrompter::new())),
        PermissionModel::AlwaysGranted | PermissionModel::Auto => Box::new(AlwaysGranted::new()),
    }
}

fn resolve(model: PermissionModel) -> PermissionModel {
    match model {
        PermissionModel::Auto if cfg!(target_os = "macos") => PermissionModel::Prompting,
        PermissionModel::Auto => PermissionModel::AlwaysGranted,
        other => other,
    }
}
