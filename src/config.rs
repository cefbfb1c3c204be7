use crate::error::{CropWatchError, Result};
use crate::logic::rules::AlertThresholds;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: AlertThresholds,
    /// Forecast days before this date are ignored
    #[serde(default)]
    pub window_start: Option<NaiveDate>,
}

impl Config {
    /// Load config from the override path or the standard locations.
    /// Falls back to built-in defaults when no file exists.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropWatchError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("no config file found, using default thresholds");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropWatchError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::info!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse YAML after `${VAR}` substitution and validate thresholds
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| CropWatchError::Config(format!("Failed to parse config: {}", e)))?;

        config.thresholds.validate()?;
        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("cropwatch").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/cropwatch/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropWatchError::Config("Cannot determine config directory".into()))?
            .join("cropwatch");
        Ok(config_dir.join("config.yaml"))
    }

    /// Write this config to `path`, refusing to clobber an existing file unless `force`.
    pub fn write(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(CropWatchError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CropWatchError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# CropWatch Configuration\n# Generated by `cropwatch init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CropWatchError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            match std::env::var(var_name) {
                Ok(value) => result = result.replace(placeholder, &value),
                Err(_) => tracing::warn!(var = var_name, "config references unset variable"),
            }
        }

        Ok(result)
    }
}
