use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {field} in config file at {config_path}: {message}")]
    ConfigValueError {
        config_path: PathBuf,
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the preview writes its log. `~` and `$VAR` are expanded on load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub sync: SyncSettings,
}

/// Scroll sync tunables as they appear under `[sync]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Whether sync starts enabled.
    pub enabled: bool,
    /// Lines subtracted from the visible source line before lookup, and added
    /// back in the other direction. Negative values are allowed.
    pub line_offset: i64,
    /// Quiet period before the reentrancy guard drops.
    pub debounce_ms: u64,
    /// Used when the source view cannot report its line height.
    pub fallback_line_height: f64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            line_offset: 3,
            debounce_ms: 50,
            fallback_line_height: 20.0,
        }
    }
}

impl SyncSettings {
    /// Checks the ranges serde cannot express. Returns the offending field.
    fn validate(&self) -> Result<(), (&'static str, String)> {
        let height = self.fallback_line_height;
        if !height.is_finite() || height <= 0.0 {
            return Err((
                "sync.fallback_line_height",
                format!("expected a positive number, got {height}"),
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .sync
            .validate()
            .map_err(|(field, message)| ConfigError::ConfigValueError {
                config_path: config_path.to_path_buf(),
                field,
                message,
            })?;

        config.log_file = config
            .log_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Like [`load`](Self::load), falling back to defaults when there is no file.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-liveview");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-liveview/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.sync.enabled);
        assert_eq!(config.sync.line_offset, 3);
        assert_eq!(config.sync.debounce_ms, 50);
        assert_eq!(config.sync.fallback_line_height, 20.0);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sync_table_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[sync]
line_offset = -2
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(
            config.sync,
            SyncSettings {
                enabled: false,
                line_offset: -2,
                ..SyncSettings::default()
            }
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[sync]\nline_offset = \"three\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_non_positive_fallback_line_height_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        for value in ["0.0", "-4.5", "nan"] {
            std::fs::write(
                &config_file,
                format!("[sync]\nfallback_line_height = {value}\n"),
            )
            .unwrap();

            let err = Config::load_from_path(&config_file).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::ConfigValueError {
                        field: "sync.fallback_line_height",
                        ..
                    }
                ),
                "{value}: {err}"
            );
        }

        std::fs::write(&config_file, "[sync]\nfallback_line_height = 18.5\n").unwrap();
        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.sync.fallback_line_height, 18.5);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            log_file: Some(PathBuf::from("/tmp/liveview.log")),
            sync: SyncSettings {
                line_offset: 5,
                debounce_ms: 80,
                ..SyncSettings::default()
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_log_file_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("LIVEVIEW_TEST_LOG_DIR", "/var/tmp/liveview");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "log_file = \"$LIVEVIEW_TEST_LOG_DIR/debug.log\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/var/tmp/liveview/debug.log"))
        );

        unsafe {
            env::remove_var("LIVEVIEW_TEST_LOG_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/logs/liveview.log")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("logs/liveview.log"));
    }

    #[test]
    fn test_unknown_variable_keeps_path_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "log_file = \"$LIVEVIEW_SURELY_UNSET_VAR/x.log\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("$LIVEVIEW_SURELY_UNSET_VAR/x.log"))
        );
    }
}
