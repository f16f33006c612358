// Licensed under the Apache-2.0 license

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use trustm_util_host::{AuthenticationConfig, ObjectId, SessionConfig, WorkerConfig};

pub const DEFAULT_CONFIG_FILE: &str = "demo-config.toml";

/// Configuration of the demo application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub session: SessionSection,
    pub objects: ObjectsSection,
    pub startup: StartupSection,
    pub simulator: SimulatorSection,
    pub provisioning: ProvisioningSection,
    pub logging: LoggingSection,
}

/// Command envelope parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub max_polls: u32,
    pub poll_interval_ms: u64,
    pub restore_context: bool,
    pub hibernate_on_close: bool,
}

/// Data objects used for authentication and provisioning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectsSection {
    pub certificate_oid: u16,
    pub private_key_oid: u16,
}

/// Start-up gating of the chip task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupSection {
    /// Delay before the start timer releases the chip task
    pub release_delay_ms: u64,
    /// Longest time the chip task waits for the release
    pub semaphore_wait_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSection {
    pub response_latency_ms: u64,
    pub max_instances: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningSection {
    pub enabled: bool,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        let defaults = SessionConfig::default();
        Self {
            max_polls: defaults.max_polls,
            poll_interval_ms: defaults.poll_interval.as_millis() as u64,
            restore_context: defaults.restore_context,
            hibernate_on_close: defaults.hibernate_on_close,
        }
    }
}

impl Default for ObjectsSection {
    fn default() -> Self {
        let defaults = AuthenticationConfig::default();
        Self {
            certificate_oid: defaults.certificate_oid.value(),
            private_key_oid: defaults.private_key_oid.value(),
        }
    }
}

impl Default for StartupSection {
    fn default() -> Self {
        Self {
            release_delay_ms: 100,
            semaphore_wait_ms: 60_000,
        }
    }
}

impl Default for SimulatorSection {
    fn default() -> Self {
        let defaults = WorkerConfig::default();
        Self {
            response_latency_ms: defaults.response_latency.as_millis() as u64,
            max_instances: defaults.max_instances,
        }
    }
}

impl Default for ProvisioningSection {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("trustm-credentials"),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SessionSection {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_max_polls(self.max_polls)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_restore_context(self.restore_context)
            .with_hibernate_on_close(self.hibernate_on_close)
    }
}

impl ObjectsSection {
    pub fn authentication_config(&self) -> AuthenticationConfig {
        AuthenticationConfig {
            certificate_oid: ObjectId(self.certificate_oid),
            private_key_oid: ObjectId(self.private_key_oid),
        }
    }
}

impl SimulatorSection {
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig::new()
            .with_max_instances(self.max_instances)
            .with_response_latency(Duration::from_millis(self.response_latency_ms))
    }
}

impl LoggingSection {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse()
            .map_err(|_| anyhow!("Invalid log level: {}", self.level))
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: DemoConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Search the current directory and its parents for `demo-config.toml`
    pub fn load_default() -> Result<Self> {
        let mut current_dir = std::env::current_dir()?;

        loop {
            let config_path = current_dir.join(DEFAULT_CONFIG_FILE);
            if config_path.exists() {
                return Self::from_file(config_path);
            }

            let app_config = current_dir
                .join("trustm-util-host")
                .join("apps")
                .join("demo")
                .join(DEFAULT_CONFIG_FILE);
            if app_config.exists() {
                return Self::from_file(app_config);
            }

            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        std::fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
