use anyhow::{anyhow, Context};
use dialchat_api::ApiConfig;
use dialchat_logging::LogFormat;
use dialchat_sync::SyncConfig;
use dialchat_types::Identity;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3000"  # Set via DIALCHAT_API_URL env var
timeout_secs = 30

[sync]
poll_interval_ms = 3000
attachment_refetch_delay_ms = 500
change_detection = "count"  # or "content"

[[identities]]
label = "Test Number 1"
number = "+13613392529"

[[identities]]
label = "Test Number 2"
number = "+13613227495"

[view]
width = 80
tail = 20

[logging]
level = "info"  # trace, debug, info, warn, error
format = "pretty"  # or "json"
"#;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Terminal columns used to right-align own messages
    #[serde(default = "default_width")]
    pub width: usize,
    /// Number of most recent messages shown after each update
    #[serde(default = "default_tail")]
    pub tail: usize,
}

fn default_width() -> usize {
    80
}

fn default_tail() -> usize {
    20
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            tail: default_tail(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.dialchat/dialchat.toml
    fn global_config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".dialchat").join("dialchat.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::global_config_path()?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).with_context(|| {
                    format!("Failed to create config directory {}", config_dir.display())
                })?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            eprintln!("Created default config: {}", config_path.display());
            eprintln!("Edit this file or set DIALCHAT_API_URL to point at your chat server.");
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.dialchat/dialchat.toml (auto-created if missing)
    /// 2. Local override: ./dialchat.toml (optional)
    /// 3. Environment variables (DIALCHAT__SECTION__KEY)
    /// 4. Convenience variables DIALCHAT_API_URL and DIALCHAT_LOG_LEVEL
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;

        let mut config_builder = config::Config::builder()
            .add_source(config::File::from(global_config_path))
            .add_source(config::File::with_name("dialchat").required(false))
            .add_source(config::Environment::with_prefix("DIALCHAT").separator("__"));

        if let Ok(url) = env::var("DIALCHAT_API_URL") {
            config_builder = config_builder.set_override("api.base_url", url)?;
        }

        if let Ok(level) = env::var("DIALCHAT_LOG_LEVEL") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        Self::finish(config_builder)
    }

    /// Parse a TOML document on its own, without the other layers
    #[cfg(test)]
    pub fn parse(toml: &str) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.api.validate()?;
        if self.view.tail == 0 {
            return Err(anyhow!("view.tail must be at least 1"));
        }
        if self.identities.is_empty() {
            return Err(anyhow!("No identities configured; add at least one [[identities]] entry"));
        }
        for identity in &self.identities {
            identity
                .validate()
                .with_context(|| format!("Invalid identity '{}'", identity.label))?;
        }
        Ok(())
    }
}
