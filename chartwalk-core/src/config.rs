use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Color scheme for the TUI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    HighContrast,
}

/// Root configuration file structure
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// External tool to invoke (name on PATH or absolute path)
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default)]
    pub theme: ThemeName,

    /// Redraw interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_binary() -> String {
    "helm".into()
}
fn default_tick_ms() -> u64 {
    100
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            theme: ThemeName::default(),
            tick_ms: default_tick_ms(),
            log_level: default_log_level(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Finds and loads the config for `dir`, falling back to defaults.
    ///
    /// `CHARTWALK_CONFIG` wins when set; a path named there must exist.
    pub fn discover(dir: &Path) -> Result<(Option<PathBuf>, Self), ConfigError> {
        if let Ok(env_path) = std::env::var("CHARTWALK_CONFIG") {
            let path = PathBuf::from(env_path);
            let config = Self::load(&path)?;
            return Ok((Some(path), config));
        }
        Self::discover_in(dir)
    }

    fn discover_in(dir: &Path) -> Result<(Option<PathBuf>, Self), ConfigError> {
        let names = [
            "chartwalk.yaml",
            "chartwalk.yml",
            ".chartwalk.yaml",
            ".chartwalk.yml",
        ];
        for name in names {
            let path = dir.join(name);
            if path.is_file() {
                let config = Self::load(&path)?;
                return Ok((Some(path), config));
            }
        }
        Ok((None, Self::default()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.binary.trim().is_empty() {
            return Err(ConfigError::Invalid("binary must not be empty".into()));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be greater than 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
binary: /usr/local/bin/helm
theme: high-contrast
tick_ms: 250
log_level: debug
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.binary, "/usr/local/bin/helm");
        assert_eq!(config.theme, ThemeName::HighContrast);
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("theme: dark\n").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::from_yaml("").unwrap().binary, "helm");
    }

    #[test]
    fn test_invalid_values() {
        let result = Config::from_yaml("tick_ms: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Config::from_yaml("binary: \"  \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Config::from_yaml("page_size: 20\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_discover_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (path, config) = Config::discover_in(dir.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config, Config::default());

        std::fs::write(dir.path().join(".chartwalk.yml"), "binary: helm3\n").unwrap();
        let (path, config) = Config::discover_in(dir.path()).unwrap();
        assert!(path.unwrap().ends_with(".chartwalk.yml"));
        assert_eq!(config.binary, "helm3");
    }
}
