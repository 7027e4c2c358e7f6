use super::identity::GcpPermission;
use super::key::PermissionKey;
use crate::error::ParseError;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fmt;

/// Advisory finding from [`PermissionSet::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFinding {
    /// Deny policies only accept V2 names, yet no V2 name was observed.
    DenyWithoutV2(PermissionKey),
    /// A V1 rendering is recorded on a permission with no V1 support.
    OverrideWithoutV1(PermissionKey),
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DenyWithoutV2(key) => write!(f, "{key}: deny support without a V2 name"),
            Self::OverrideWithoutV1(key) => write!(f, "{key}: V1 override without V1 support"),
        }
    }
}

/// Deduplicated set of GCP permissions. Adding another spelling of a
/// permission already present merges into the existing entry.
///
/// Enumeration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    permissions: IndexMap<PermissionKey, GcpPermission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// All permissions, in insertion order.
    pub fn permissions(&self) -> impl Iterator<Item = &GcpPermission> {
        self.permissions.values()
    }

    /// All permissions ordered by `(service, action)`.
    pub fn sorted(&self) -> Vec<&GcpPermission> {
        let mut sorted: Vec<&GcpPermission> = self.permissions.values().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Add a permission by name, merging into an existing entry with the same
    /// key. The existing entry survives and is updated in place.
    pub fn add_permission(&mut self, name: &str, deny_support: bool) -> Result<(), ParseError> {
        let permission = GcpPermission::parse(name, deny_support)?;
        match self.permissions.entry(permission.key().clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().combine(&permission),
            Entry::Vacant(slot) => {
                slot.insert(permission);
            }
        }
        Ok(())
    }

    /// Fuse the V1 and V2 entries of a permission whose V1 name cannot be
    /// derived from its V2 name. Must run after all names are loaded.
    ///
    /// The V2 entry survives and records the V1 entry's V1 rendering as its
    /// override; the V1 entry is removed. A V1 entry never seen in V1 syntax
    /// has no rendering, so the survivor keeps its mechanical V1 name. Returns `false` without touching the set when
    /// either side is absent or both names already share a key.
    pub fn dedupe_non_standard_mapping(&mut self, v1: &str, v2: &str) -> Result<bool, ParseError> {
        let v1_key = GcpPermission::parse(v1, false)?.key().clone();
        let v2_key = GcpPermission::parse(v2, false)?.key().clone();

        if v1_key == v2_key {
            tracing::debug!(v1, v2, "mapping is mechanical; nothing to fuse");
            return Ok(false);
        }
        if !self.permissions.contains_key(&v2_key) {
            tracing::debug!(v1, v2, "mapping skipped; V2 permission not loaded");
            return Ok(false);
        }
        let Some(v1_entry) = self.permissions.shift_remove(&v1_key) else {
            tracing::debug!(v1, v2, "mapping skipped; V1 permission not loaded");
            return Ok(false);
        };

        if let Some(v2_entry) = self.permissions.get_mut(&v2_key) {
            v2_entry.adopt_v1_name(v1_entry.as_v1());
        }
        Ok(true)
    }

    /// Whether `name` resolves to a permission, either by key or by a
    /// recorded V1 override.
    pub fn contains(&self, name: &str) -> Result<bool, ParseError> {
        self.get(name).map(|found| found.is_some())
    }

    /// Look up a permission by key first, then by a V1 override equal to
    /// `name`. The override scan runs even if `name` does not parse; the
    /// parse error is only returned when the scan finds nothing.
    pub fn get(&self, name: &str) -> Result<Option<&GcpPermission>, ParseError> {
        let parsed = GcpPermission::parse(name, false);
        if let Ok(probe) = &parsed
            && let Some(found) = self.permissions.get(probe.key())
        {
            return Ok(Some(found));
        }

        if let Some(found) = self.find_by_v1_override(name) {
            return Ok(Some(found));
        }
        parsed.map(|_| None)
    }

    fn find_by_v1_override(&self, name: &str) -> Option<&GcpPermission> {
        self.permissions
            .values()
            .find(|perm| perm.v1_override() == Some(name))
    }

    /// Consistency checks that never fail a load.
    pub fn audit(&self) -> Vec<AuditFinding> {
        let mut findings = Vec::new();
        for perm in self.permissions.values() {
            if perm.deny_support() && !perm.has_v2() {
                findings.push(AuditFinding::DenyWithoutV2(perm.key().clone()));
            }
            if perm.v1_override().is_some() && !perm.has_v1() {
                findings.push(AuditFinding::OverrideWithoutV1(perm.key().clone()));
            }
        }
        findings
    }
}
