use crate::config::Config;
use crate::error::Result;
use crate::permission::PermissionSet;
use crate::sources::{BundledSource, LiveSource, PermissionSource};

/// Build a permission set from the bundled data, or from the live
/// documentation when `live` is set.
pub async fn load_permission_set(live: bool, config: &Config) -> Result<PermissionSet> {
    if live {
        let source = LiveSource::new(&config.live)?;
        load_from_source(&source).await
    } else {
        let source = match &config.sources.data_dir {
            Some(dir) => BundledSource::from_dir(dir),
            None => BundledSource::embedded(),
        };
        load_from_source(&source).await
    }
}

/// Run the load pipeline against any source.
///
/// Allowable names are added first, then deniable names, and only then are
/// the non-standard mappings resolved, since resolution looks up entries
/// both passes created. A malformed name aborts the load.
pub async fn load_from_source(source: &dyn PermissionSource) -> Result<PermissionSet> {
    let allowable = source.allowable_permissions().await?;
    let deniable = source.deniable_permissions().await?;
    let mappings = source.non_standard_mappings().await?;

    let mut set = PermissionSet::new();

    for name in &allowable {
        set.add_permission(name, false)?;
    }
    tracing::debug!(
        source = source.name(),
        count = allowable.len(),
        "loaded allowable permissions"
    );

    for name in &deniable {
        set.add_permission(name, true)?;
    }
    tracing::debug!(
        source = source.name(),
        count = deniable.len(),
        "loaded deniable permissions"
    );

    let mut fused = 0_usize;
    for (v2, v1) in &mappings {
        if set.dedupe_non_standard_mapping(v1, v2)? {
            fused += 1;
        }
    }
    tracing::debug!(
        source = source.name(),
        mappings = mappings.len(),
        fused,
        "resolved non-standard mappings"
    );

    tracing::info!(
        source = source.name(),
        permissions = set.len(),
        "permission set loaded"
    );
    Ok(set)
}
