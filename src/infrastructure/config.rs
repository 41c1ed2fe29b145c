//! Configuration infrastructure
//!
//! Loading and management of the on-disk settings file.
//!
//! Configuration is a single user-editable tier: catalog defaults the
//! views start from plus the logging switches. The file is JSON under
//! the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// User-configurable settings (exposed in UI)
    pub user: UserConfig,
}

/// User-configurable settings that can be changed from the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Result rows requested per title search
    pub search_limit: u32,

    /// Chapter rows per feed page
    pub chapter_page_size: u32,

    /// Translation language the chapter feed opens with
    pub default_lang: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            search_limit: defaults::SEARCH_LIMIT,
            chapter_page_size: defaults::CHAPTER_PAGE_SIZE,
            default_lang: defaults::DEFAULT_LANG.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,

    /// Write log lines as JSON instead of the human format
    pub json_format: bool,

    /// Mirror log output to the console
    pub console_output: bool,

    /// Write log output to a file under the app data directory
    pub file_output: bool,

    /// Delete the previous log file on startup instead of rotating it
    pub keep_only_latest: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            keep_only_latest: defaults::LOG_KEEP_ONLY_LATEST,
        }
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("manga-desk");

        Ok(config_dir)
    }

    /// Create a new configuration manager pointing at the default paths
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        let config_path = config_dir.join("manga_desk_config.json");
        let data_dir = Self::get_app_data_dir()?;

        Ok(Self {
            config_path,
            data_dir,
        })
    }

    /// Initialize configuration system on first run
    pub async fn initialize_on_first_run(&self) -> Result<AppConfig> {
        let config_dir = self
            .config_path
            .parent()
            .context("Failed to get config directory")?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .await
                .context("Failed to create config directory")?;
            info!("✅ Created configuration directory: {:?}", config_dir);
        }

        let is_first_run = !self.config_path.exists();

        if is_first_run {
            info!("🎉 First run detected - initializing default configuration");

            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            self.create_data_directories().await?;

            info!("✅ Initial configuration setup completed");
            Ok(default_config)
        } else {
            self.load_config().await
        }
    }

    /// Create necessary data directories
    async fn create_data_directories(&self) -> Result<()> {
        let directories = [self.data_dir.join("logs"), self.data_dir.join("downloads")];

        for dir in &directories {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("Failed to create directory: {dir:?}"))?;
                info!("📁 Created directory: {:?}", dir);
            }
        }

        Ok(())
    }

    /// Get application data directory
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get user data directory")?
            .join("manga-desk");

        Ok(data_dir)
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Configuration file not found, creating default: {:?}",
                self.config_path
            );
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .context("Failed to read configuration file")?;

        match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => {
                info!("Loaded configuration from: {:?}", self.config_path);
                Ok(config)
            }
            Err(parse_error) => {
                tracing::warn!("⚠️  Configuration file unreadable: {}", parse_error);
                tracing::warn!("⚠️  Resetting to default configuration");

                // Keep the unreadable file around for inspection
                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(e) = fs::copy(&self.config_path, &backup_path).await {
                    tracing::warn!("Failed to back up corrupted config: {}", e);
                } else {
                    info!("Backed up corrupted config to: {:?}", backup_path);
                }

                let default_config = AppConfig::default();
                self.save_config(&default_config)
                    .await
                    .context("Failed to save default configuration")?;

                Ok(default_config)
            }
        }
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Update user configuration settings
    pub async fn update_user_config<F>(&self, updater: F) -> Result<AppConfig>
    where
        F: FnOnce(&mut UserConfig),
    {
        let mut config = self.load_config().await?;
        updater(&mut config.user);
        self.save_config(&config).await?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

/// Default values for every setting
pub mod defaults {
    /// Result rows per title search
    pub const SEARCH_LIMIT: u32 = 5;

    /// Chapter rows per feed page
    pub const CHAPTER_PAGE_SIZE: u32 = 10;

    /// Chapter feed language
    pub const DEFAULT_LANG: &str = "en";

    /// Log level filter
    pub const LOG_LEVEL: &str = "info";

    /// Human-readable log lines by default
    pub const LOG_JSON_FORMAT: bool = false;

    /// Console logging enabled
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// File logging enabled
    pub const LOG_FILE_OUTPUT: bool = true;

    /// Rotate (not delete) the previous log file
    pub const LOG_KEEP_ONLY_LATEST: bool = false;
}
