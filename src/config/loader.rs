use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".gcp-permission-mappings";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// `$HOME/.gcp-permission-mappings/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        UserDirs::new()
            .map(|u| u.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))
    }

    /// Load config from `explicit`, or from the default location.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    /// Environment overrides are applied before validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::read_from(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::read_from(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "no config file; using defaults");
                    Self {
                        config_path: path,
                        ..Self::default()
                    }
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }
}
