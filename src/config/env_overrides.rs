use super::{Config, OutputFormat};
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(live) = std::env::var("GCP_PERMISSIONS_LIVE")
            && let Some(live) = parse_bool(&live)
        {
            self.sources.live = live;
        }

        if let Ok(dir) = std::env::var("GCP_PERMISSIONS_DATA_DIR")
            && !dir.is_empty()
        {
            self.sources.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(timeout_str) = std::env::var("GCP_PERMISSIONS_TIMEOUT_SECS")
            && let Ok(timeout) = timeout_str.parse::<u64>()
            && timeout > 0
        {
            self.live.timeout_secs = timeout;
        }

        if let Ok(format) = std::env::var("GCP_PERMISSIONS_FORMAT")
            && let Ok(format) = format.parse::<OutputFormat>()
        {
            self.output.format = format;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
