//! Authority for platforms without a permission model.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    Capability, PermissionAuthority, PermissionPrompt, PermissionState, RequestOutcome, Result,
};

/// Grants every capability without asking. Nothing is verified against the
/// hardware.
#[derive(Debug, Clone, Default)]
pub struct AlwaysGranted {}

impl AlwaysGranted {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl PermissionAuthority for AlwaysGranted {
    async fn check(&self, capability: Capability) -> Result<PermissionState> {
        debug!(%capability, "No permission model, reporting granted");
        Ok(PermissionState::Granted)
    }

    async fn request(
        &self,
        capability: Capability,
        _prompt: &PermissionPrompt,
    ) -> Result<RequestOutcome> {
        debug!(%capability, "No permission model, granting without prompt");
        Ok(RequestOutcome::Granted)
    }

    fn name(&self) -> &str {
        "always-granted"
    }
}
