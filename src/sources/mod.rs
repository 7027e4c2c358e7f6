pub mod bundled;
pub mod live;

pub use bundled::BundledSource;
pub use live::LiveSource;

use crate::error::SourceError;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`PermissionSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Supplies the raw permission names and non-standard mappings a
/// [`PermissionSet`](crate::permission::PermissionSet) is built from.
///
/// Implementations only acquire strings; they never parse permission names.
pub trait PermissionSource: Send + Sync {
    fn name(&self) -> &str;

    /// Permission names usable in allow policies.
    fn allowable_permissions(&self) -> SourceFuture<'_, BTreeSet<String>>;

    /// Permission names usable in deny policies.
    fn deniable_permissions(&self) -> SourceFuture<'_, BTreeSet<String>>;

    /// V2 name -> V1 name for permissions whose V1 spelling cannot be derived.
    fn non_standard_mappings(&self) -> SourceFuture<'_, BTreeMap<String, String>>;
}

/// Trim fetched names and drop blanks.
pub(crate) fn clean_names<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
