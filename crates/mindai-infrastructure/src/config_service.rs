//! Loads `config.toml` and applies environment overrides.

use std::path::{Path, PathBuf};

use mindai_core::config::MindaiConfig;
use mindai_core::error::{MindaiError, Result};

use crate::paths::MindaiPaths;

pub const ENV_BASE_URL: &str = "MINDAI_BASE_URL";
pub const ENV_DATA_DIR: &str = "MINDAI_DATA_DIR";

/// Reads configuration from disk.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default `config.toml` location.
    pub fn new(paths: &MindaiPaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file (defaults when missing) and applies environment overrides.
    pub fn load(&self) -> Result<MindaiConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(&self) -> Result<MindaiConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(MindaiConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            MindaiError::config(format!(
                "Failed to read configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            MindaiError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn apply_overrides(config: &mut MindaiConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
        config.backend.base_url = base_url;
    }
    if let Some(data_dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
        config.storage.data_dir = Some(PathBuf::from(data_dir));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindai_core::config::DEFAULT_BASE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let config = service.load_file().unwrap();
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"https://api.mindai.test\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ConfigService::with_path(path).load_file().unwrap();
        assert_eq!(config.backend.base_url, "https://api.mindai.test");
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[backend\n").unwrap();

        let err = ConfigService::with_path(path).load_file().unwrap_err();
        assert!(matches!(err, MindaiError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MindaiConfig::default();
        apply_overrides(&mut config, |key| match key {
            ENV_BASE_URL => Some("http://staging:8080".to_string()),
            ENV_DATA_DIR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.backend.base_url, "http://staging:8080");
        assert_eq!(config.storage.data_dir, None);
    }
}
