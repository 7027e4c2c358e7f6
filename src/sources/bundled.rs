//! Permission data shipped with the crate, or read from a directory holding
//! files of the same shape.

use super::{PermissionSource, SourceFuture, clean_names};
use crate::error::SourceError;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub const ALLOWABLE_FILE: &str = "allowable_permissions.json";
pub const DENIABLE_FILE: &str = "deniable_permissions.json";
pub const MAPPINGS_FILE: &str = "non_standard_mappings.json";

const EMBEDDED_ALLOWABLE: &str = include_str!("../../resources/allowable_permissions.json");
const EMBEDDED_DENIABLE: &str = include_str!("../../resources/deniable_permissions.json");
const EMBEDDED_MAPPINGS: &str = include_str!("../../resources/non_standard_mappings.json");

/// Static permission data.
///
/// Permission files map a service name to its permission names; the service
/// key is informational only. The mapping file maps V2 names to V1 names.
#[derive(Debug, Clone, Default)]
pub struct BundledSource {
    data_dir: Option<PathBuf>,
}

impl BundledSource {
    /// Data compiled into the binary.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    /// Data read from `dir` at load time.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
        }
    }

    async fn read(
        &self,
        file: &'static str,
        embedded: &'static str,
    ) -> Result<Cow<'static, str>, SourceError> {
        let Some(dir) = &self.data_dir else {
            return Ok(Cow::Borrowed(embedded));
        };
        let path = dir.join(file);
        tracing::debug!(path = %path.display(), "reading permission data");
        tokio::fs::read_to_string(&path)
            .await
            .map(Cow::Owned)
            .map_err(|e| SourceError::unavailable(path.display().to_string(), e))
    }
}

fn parse_grouped(file: &str, raw: &str) -> Result<BTreeSet<String>, SourceError> {
    let grouped: BTreeMap<String, Vec<String>> =
        serde_json::from_str(raw).map_err(|e| SourceError::unavailable(file, e))?;
    Ok(clean_names(grouped.into_values().flatten()))
}

fn parse_mappings(file: &str, raw: &str) -> Result<BTreeMap<String, String>, SourceError> {
    serde_json::from_str(raw).map_err(|e| SourceError::unavailable(file, e))
}

impl PermissionSource for BundledSource {
    fn name(&self) -> &str {
        if self.data_dir.is_some() { "data-dir" } else { "bundled" }
    }

    fn allowable_permissions(&self) -> SourceFuture<'_, BTreeSet<String>> {
        Box::pin(async move {
            let raw = self.read(ALLOWABLE_FILE, EMBEDDED_ALLOWABLE).await?;
            parse_grouped(ALLOWABLE_FILE, &raw)
        })
    }

    fn deniable_permissions(&self) -> SourceFuture<'_, BTreeSet<String>> {
        Box::pin(async move {
            let raw = self.read(DENIABLE_FILE, EMBEDDED_DENIABLE).await?;
            parse_grouped(DENIABLE_FILE, &raw)
        })
    }

    fn non_standard_mappings(&self) -> SourceFuture<'_, BTreeMap<String, String>> {
        Box::pin(async move {
            let raw = self.read(MAPPINGS_FILE, EMBEDDED_MAPPINGS).await?;
            parse_mappings(MAPPINGS_FILE, &raw)
        })
    }
}
