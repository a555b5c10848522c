//! Native dialog prompter.

use std::env;
use std::ffi::OsString;

use async_trait::async_trait;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use tracing::debug;

use crate::{PermissionError, PermissionPrompt, PromptAnswer, Prompter, Result};

/// Shows the permission prompt as a native message dialog with the prompt's
/// three buttons.
#[derive(Debug, Clone, Default)]
pub struct DialogPrompter {}

impl DialogPrompter {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Prompter for DialogPrompter {
    async fn ask(&self, prompt: &PermissionPrompt) -> Result<PromptAnswer> {
        if needs_display_server()
            && !display_available(env::var_os("DISPLAY"), env::var_os("WAYLAND_DISPLAY"))
        {
            return Err(PermissionError::PromptUnavailable(
                "no X11 or Wayland display".to_string(),
            ));
        }

        debug!(title = %prompt.title, "Showing permission dialog");

        let result = AsyncMessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&prompt.title)
            .set_description(&prompt.message)
            .set_buttons(MessageButtons::YesNoCancelCustom(
                prompt.button_positive.clone(),
                prompt.button_negative.clone(),
                prompt.button_neutral.clone(),
            ))
            .show()
            .await;

        Ok(answer_from(prompt, result))
    }
}

/// Dialogs on these platforms go through an X11 or Wayland display.
fn needs_display_server() -> bool {
    cfg!(all(unix, not(target_os = "macos")))
}

fn display_available(x11: Option<OsString>, wayland: Option<OsString>) -> bool {
    [x11, wayland]
        .into_iter()
        .flatten()
        .any(|value| !value.is_empty())
}

/// Map a dialog result back to the prompt button. Backends report custom
/// buttons either by label or as the stock button in the same slot.
fn answer_from(prompt: &PermissionPrompt, result: MessageDialogResult) -> PromptAnswer {
    match result {
        MessageDialogResult::Yes | MessageDialogResult::Ok => PromptAnswer::Positive,
        MessageDialogResult::No => PromptAnswer::Negative,
        MessageDialogResult::Cancel => PromptAnswer::Neutral,
        MessageDialogResult::Custom(label) if label == prompt.button_positive => {
            PromptAnswer::Positive
        }
        MessageDialogResult::Custom(label) if label == prompt.button_negative => {
            PromptAnswer::Negative
        }
        // Closing the dialog counts as "ask me later"
        MessageDialogResult::Custom(_) => PromptAnswer::Neutral,
    }
}
