//! App-specific configuration extensions.
//!
//! This module provides hotkey support on top of the core Config.

use std::str::FromStr;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use tracing::warn;

use crate::Config;

/// Default hotkey: Meta+Shift+M
pub fn default_hotkey() -> HotKey {
    HotKey::new(Some(Modifiers::META | Modifiers::SHIFT), Code::KeyM)
}

/// Extension trait for Config to handle hotkeys.
pub trait ConfigExt {
    /// Get the hotkey, parsing from config or using default.
    fn hotkey(&self) -> HotKey;
}

impl ConfigExt for Config {
    fn hotkey(&self) -> HotKey {
        let Some(raw) = self.hotkey_str() else {
            return default_hotkey();
        };
        match HotKey::from_str(raw) {
            Ok(hotkey) => hotkey,
            Err(e) => {
                warn!(hotkey = raw, error = %e, "Invalid hotkey in config, using default");
                default_hotkey()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_unset() {
        assert_eq!(Config::default().hotkey(), default_hotkey());
    }

    #[test]
    fn test_parse_configured_hotkey() {
        let config = Config {
            hotkey: Some("shift+alt+KeyQ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.hotkey(),
            HotKey::new(Some(Modifiers::SHIFT | Modifiers::ALT), Code::KeyQ)
        );
    }

    #[test]
    fn test_invalid_hotkey_falls_back() {
        let config = Config {
            hotkey: Some("not a hotkey".to_string()),
            ..Default::default()
        };
        assert_eq!(config.hotkey(), default_hotkey());
    }
}
