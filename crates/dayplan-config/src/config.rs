/// Application configuration: load, save and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths::resolve_data_dir;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// How event times are rendered in plain-text output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `14:30`
    #[default]
    #[serde(rename = "24h")]
    H24,
    /// `2:30 PM`
    #[serde(rename = "12h")]
    H12,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Language codes offered for translation, in display order.
    pub target_languages: Vec<String>,
    pub time_format: TimeFormat,
    /// Whether every history change is written to the autosave file.
    pub autosave_enabled: bool,
    /// Autosave file. Empty = `autosave.json` in the data directory.
    pub autosave_path: String,
    /// Template loaded at startup when none is given on the command line. Empty = none.
    pub default_template: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            target_languages: vec!["en".to_string()],
            time_format: TimeFormat::H24,
            autosave_enabled: true,
            autosave_path: String::new(),
            default_template: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `dayplan.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("dayplan.json")))
            .unwrap_or_else(|| PathBuf::from("dayplan.json"))
    }

    /// Reads and sanitizes the config at `path`.
    ///
    /// A file that is not valid JSON is reported as `InvalidData`.
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("failed to parse config: {e}"),
            )
        })?;
        config.sanitize();
        Ok(config)
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                if let Err(e) = config.save(path) {
                    tracing::warn!("Failed to create default config at {}: {e}", path.display());
                }
                config
            }
            Err(e) => {
                // Don't overwrite a broken file
                tracing::warn!("Failed to load config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Effective autosave file.
    pub fn autosave_file(&self) -> PathBuf {
        if self.autosave_path.is_empty() {
            resolve_data_dir().join("autosave.json")
        } else {
            PathBuf::from(&self.autosave_path)
        }
    }

    /// Template to load at startup, if configured.
    pub fn default_template_path(&self) -> Option<PathBuf> {
        if self.default_template.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.default_template))
        }
    }

    /// Normalizes values and resets invalid fields.
    ///
    /// Language codes are trimmed, lower-cased and deduplicated keeping the
    /// first occurrence.
    pub fn sanitize(&mut self) {
        let level = self.log_level.trim().to_lowercase();
        self.log_level = if VALID_LOG_LEVELS.contains(&level.as_str()) {
            level
        } else {
            "info".to_string()
        };

        let mut languages: Vec<String> = Vec::with_capacity(self.target_languages.len());
        for code in &self.target_languages {
            let code = code.trim().to_lowercase();
            if !code.is_empty() && !languages.contains(&code) {
                languages.push(code);
            }
        }
        self.target_languages = languages;
    }
}
