use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No home directory found")]
    NoHomeDir,

    #[error("Failed to create config directory: {0}")]
    CreateConfigDir(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the CLI finds a running lessonbox server.
///
/// Sources, in order of precedence:
/// - CLI arguments and environment variables (by clap)
/// - Dot-env file (by dotenv)
/// - Settings file in the user's config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(skip)]
    settings_dir: Option<PathBuf>,
}

pub fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            settings_dir: None,
        }
    }
}

impl ClientSettings {
    pub fn new(settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: Some(settings_dir.into()),
            ..Default::default()
        }
    }

    /// Saved settings with `url` layered on top when given
    pub fn initialize(settings_dir: Option<PathBuf>, url: Option<String>) -> Self {
        let mut settings = match settings_dir {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        };
        if let Err(e) = settings.load() {
            tracing::debug!("No saved settings loaded: {}", e);
        }

        if let Some(url) = url.filter(|url| !url.is_empty()) {
            settings.api_url = url;
        }
        settings
    }

    pub fn settings_file_path(&self) -> ConfigResult<PathBuf> {
        let dir = match &self.settings_dir {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("com", "lessonbox", "lessonbox-cli")
                .ok_or(ConfigError::NoHomeDir)?
                .config_dir()
                .to_path_buf(),
        };
        ensure_dir(&dir)?;
        Ok(dir.join(SETTINGS_FILE))
    }

    pub fn load(&mut self) -> ConfigResult<()> {
        let path = self.settings_file_path()?;
        if path.exists() {
            let saved: Self = serde_json::from_str(&fs::read_to_string(&path)?)?;
            self.api_url = saved.api_url;
        }
        Ok(())
    }

    pub fn save(&self) -> ConfigResult<PathBuf> {
        let path = self.settings_file_path()?;
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

fn ensure_dir(dir: &Path) -> ConfigResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ConfigError::CreateConfigDir(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_url() -> String {
        "https://lessons.example.com".to_string()
    }

    #[test]
    fn test_settings_default() {
        let settings = ClientSettings::default();
        assert_eq!(settings.api_url, "http://localhost:3000");
    }

    #[test]
    fn test_settings_do_not_serialize_dir() {
        let settings = ClientSettings::new("/tmp/somewhere");
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json, serde_json::json!({ "api_url": "http://localhost:3000" }));
    }

    #[test]
    fn test_save_and_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut settings = ClientSettings::new(&nested);
        settings.api_url = test_url();
        let path = settings.save().unwrap();
        assert!(path.ends_with(SETTINGS_FILE));

        let loaded = ClientSettings::initialize(Some(nested.clone()), None);
        assert_eq!(loaded.api_url, test_url());

        // Explicit url wins over the saved one
        let overridden =
            ClientSettings::initialize(Some(nested), Some("http://127.0.0.1:9000".to_string()));
        assert_eq!(overridden.api_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_initialize_ignores_empty_url() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ClientSettings::initialize(Some(dir.path().into()), Some(String::new()));
        assert_eq!(settings.api_url, default_api_url());
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "not json").unwrap();

        let mut settings = ClientSettings::new(dir.path());
        assert!(matches!(settings.load(), Err(ConfigError::Json(_))));
    }
}
