//! Terminal configuration.
//!
//! Identity strings and timings for the simulated session. Loaded from an
//! optional TOML file; every field has a default so a missing or partial
//! file still yields a working config.

use serde::Deserialize;

use crate::error::Result;

/// Session identity and timing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// User name shown in the prompt and identity commands.
    pub username: String,
    /// Host name shown in the prompt and identity commands.
    pub hostname: String,
    /// OS name reported by `neofetch`.
    pub os_name: String,
    /// OS version reported by `neofetch` and `software`.
    pub os_version: String,
    /// Kernel string reported by `neofetch`.
    pub kernel: String,
    /// Architecture string reported by `neofetch`.
    pub architecture: String,
    /// Delay between boot milestones, in milliseconds.
    pub boot_step_ms: u64,
    /// Delay before the `software` update report, in milliseconds.
    pub software_delay_ms: u64,
    /// Delay before `reboot` restarts the session, in milliseconds.
    pub reboot_delay_ms: u64,
    /// Maximum retained history entries.
    pub max_history: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            username: "root".to_string(),
            hostname: "orbit".to_string(),
            os_name: "OrbitOS".to_string(),
            os_version: "3.5.1 - mobile".to_string(),
            kernel: "5.4.2-1070-gki".to_string(),
            architecture: "aarch64".to_string(),
            boot_step_ms: 200,
            software_delay_ms: 1500,
            reboot_delay_ms: 1500,
            max_history: 100,
        }
    }
}

impl TerminalConfig {
    /// Parse a config from TOML text. Missing fields fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The prompt string, e.g. `root@orbit:~$ `.
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$ ", self.username, self.hostname)
    }

    /// The `user@host` identity string.
    pub fn identity(&self) -> String {
        format!("{}@{}", self.username, self.hostname)
    }
}
