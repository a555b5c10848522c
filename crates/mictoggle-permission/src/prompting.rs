//! Authority for platforms that ask the user before granting a capability.
//!
//! Decisions live for the process lifetime. After repeated explicit denials
//! the authority stops prompting and answers `NeverAskAgain`, the same way a
//! mobile platform hides the dialog once the user has refused it twice.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    Capability, PermissionAuthority, PermissionPrompt, PermissionState, RequestOutcome, Result,
};

/// Explicit denials after which the prompt is no longer shown.
const NEVER_ASK_AFTER_DENIALS: u8 = 2;

/// Which prompt button the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Positive,
    Negative,
    Neutral,
}

/// Something that can put a permission prompt in front of the user.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, prompt: &PermissionPrompt) -> Result<PromptAnswer>;
}

#[derive(Debug, Clone, Copy, Default)]
struct Decision {
    granted: bool,
    denials: u8,
}

/// Permission authority that prompts through a [`Prompter`].
pub struct PromptingAuthority<P> {
    prompter: P,
    decisions: Mutex<HashMap<Capability, Decision>>,
}

impl<P: Prompter> PromptingAuthority<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            decisions: Mutex::new(HashMap::new()),
        }
    }

    fn decision(&self, capability: Capability) -> Decision {
        self.decisions
            .lock()
            .get(&capability)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl<P: Prompter> PermissionAuthority for PromptingAuthority<P> {
    async fn check(&self, capability: Capability) -> Result<PermissionState> {
        Ok(self.decision(capability).granted.into())
    }

    async fn request(
        &self,
        capability: Capability,
        prompt: &PermissionPrompt,
    ) -> Result<RequestOutcome> {
        let decision = self.decision(capability);
        if decision.granted {
            debug!(%capability, "Already granted, not prompting");
            return Ok(RequestOutcome::Granted);
        }
        if decision.denials >= NEVER_ASK_AFTER_DENIALS {
            debug!(%capability, denials = decision.denials, "Prompt suppressed");
            return Ok(RequestOutcome::NeverAskAgain);
        }

        // The lock is not held while the prompt is open.
        let answer = self.prompter.ask(prompt).await?;
        info!(%capability, answer = ?answer, "Permission prompt answered");

        let mut decisions = self.decisions.lock();
        let decision = decisions.entry(capability).or_default();
        let outcome = match answer {
            PromptAnswer::Positive => {
                decision.granted = true;
                RequestOutcome::Granted
            }
            PromptAnswer::Negative => {
                decision.denials = decision.denials.saturating_add(1);
                RequestOutcome::Denied
            }
            PromptAnswer::Neutral => RequestOutcome::Denied,
        };
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "prompting"
    }
}
