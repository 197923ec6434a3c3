use mdlive_engine::PreviewOptions;
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
}

/// Preview settings a host reads at startup. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hide syntax markers outside the selection.
    pub hiding_enabled: bool,
    /// How far around the selection a style toggle looks, in marker lengths.
    pub toggle_window_factor: usize,
    /// Characters of a link definition URL shown before truncating.
    pub link_preview_max: usize,
    /// Renumber ordered lists after edits that touch them.
    pub renumber_after_edit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(PreviewOptions::default())
    }
}

impl From<PreviewOptions> for Config {
    fn from(options: PreviewOptions) -> Self {
        Self {
            hiding_enabled: options.hiding_enabled,
            toggle_window_factor: options.toggle_window_factor,
            link_preview_max: options.link_preview_max,
            renumber_after_edit: options.renumber_after_edit,
        }
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

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config at `path` (shell variables and `~` expanded), or the default location
    /// when no path is given. A missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let config_path = Self::expand_path(path).unwrap_or_else(|| path.to_path_buf());
                Self::load_from_path(&config_path)?
            }
            None => Self::load()?,
        };
        Ok(config.unwrap_or_default())
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
        let config_dir = shellexpand::tilde("~/.config/mdlive");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            hiding_enabled: self.hiding_enabled,
            // a zero window would never find an enclosing span
            toggle_window_factor: self.toggle_window_factor.max(1),
            link_preview_max: self.link_preview_max,
            renumber_after_edit: self.renumber_after_edit,
        }
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
        assert!(path_str.ends_with(".config/mdlive/config.toml"));
    }

    #[test]
    fn test_defaults_match_engine() {
        assert_eq!(Config::default().preview_options(), PreviewOptions::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("hiding_enabled = false\n").unwrap();

        assert!(!config.hiding_enabled);
        assert_eq!(config.toggle_window_factor, 50);
        assert_eq!(config.link_preview_max, 40);
        assert!(config.renumber_after_edit);
    }

    #[test]
    fn test_zero_window_is_raised_to_one() {
        let config = Config {
            toggle_window_factor: 0,
            ..Config::default()
        };
        assert_eq!(config.preview_options().toggle_window_factor, 1);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let config = Config::load_or_default(Some(&missing)).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            hiding_enabled: false,
            toggle_window_factor: 8,
            link_preview_max: 12,
            renumber_after_edit: false,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "hiding_enabled = \"sometimes\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_or_default_expands_env_var() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("mdlive.toml"), "link_preview_max = 5\n").unwrap();
        unsafe {
            env::set_var("MDLIVE_TEST_CONFIG_DIR", temp_dir.path());
        }

        let config =
            Config::load_or_default(Some(Path::new("$MDLIVE_TEST_CONFIG_DIR/mdlive.toml"))).unwrap();
        assert_eq!(config.link_preview_max, 5);

        unsafe {
            env::remove_var("MDLIVE_TEST_CONFIG_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }
}
