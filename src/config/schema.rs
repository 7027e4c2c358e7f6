use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use strum::{Display, EnumString};
use url::Url;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Path the config was read from; never read from the file itself
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub live: LiveConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SourcesConfig {
    /// Scrape the GCP documentation instead of using bundled data
    #[serde(default)]
    pub live: bool,
    /// Directory holding the bundled JSON files; embedded data when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    #[serde(default = "default_role_index_url")]
    pub role_index_url: String,
    #[serde(default = "default_custom_roles_url")]
    pub custom_roles_url: String,
    #[serde(default = "default_deny_support_url")]
    pub deny_support_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_role_index_url() -> String {
    "https://cloud.google.com/iam/json/role-permission-filter.json".into()
}

fn default_custom_roles_url() -> String {
    "https://cloud.google.com/iam/docs/custom-roles-permissions-support".into()
}

fn default_deny_support_url() -> String {
    "https://cloud.google.com/iam/docs/deny-permissions-support".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("gcp-permission-mappings/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            role_index_url: default_role_index_url(),
            custom_roles_url: default_custom_roles_url(),
            deny_support_url: default_deny_support_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl LiveConfig {
    /// Point every endpoint at `base`, keeping the documented paths.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            role_index_url: format!("{base}/iam/json/role-permission-filter.json"),
            custom_roles_url: format!("{base}/iam/docs/custom-roles-permissions-support"),
            deny_support_url: format!("{base}/iam/docs/deny-permissions-support"),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "live.timeout_secs must be greater than 0".into(),
            ));
        }
        for (field, value) in [
            ("live.role_index_url", &self.role_index_url),
            ("live.custom_roles_url", &self.custom_roles_url),
            ("live.deny_support_url", &self.deny_support_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| ConfigError::Validation(format!("{field}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "{field}: unsupported scheme '{}'",
                    url.scheme()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.live.validate()
    }
}
