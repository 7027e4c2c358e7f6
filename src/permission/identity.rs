use super::key::PermissionKey;
use crate::error::{ParseError, ParseErrorKind};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use strum::{Display, EnumString};

/// Marker separating the service domain from the action in V2 names.
pub const V2_MARKER: &str = ".googleapis.com/";

/// Surface syntax a permission name is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Syntax {
    /// `service.action`
    V1,
    /// `service.googleapis.com/action`
    V2,
}

impl Syntax {
    pub fn of(permission: &str) -> Self {
        if GcpPermission::is_v2_name(permission) {
            Self::V2
        } else {
            Self::V1
        }
    }
}

/// One logical GCP permission, which may be known under its V1 name, its V2
/// name, or both.
///
/// Equality, hashing and ordering only look at the `(service, action)` key;
/// the support flags are merged state, not identity.
#[derive(Debug, Clone)]
pub struct GcpPermission {
    key: PermissionKey,
    has_v1: bool,
    has_v2: bool,
    deny_support: bool,
    v1_override: Option<String>,
}

impl GcpPermission {
    pub fn is_v2_name(permission: &str) -> bool {
        permission.contains(V2_MARKER)
    }

    /// Mechanically derive the V1 spelling of a V2 name. Non-standard
    /// mappings are not consulted.
    pub fn v2_to_v1(permission: &str) -> Result<String, ParseError> {
        if !Self::is_v2_name(permission) {
            return Err(ParseError::new(ParseErrorKind::NotV2, permission));
        }
        Ok(permission.replace(V2_MARKER, "."))
    }

    /// Parse a raw permission name in either syntax.
    ///
    /// V2 names split at the last marker, V1 names at the first `.`; the
    /// action keeps any further separators verbatim.
    pub fn parse(permission: &str, deny_support: bool) -> Result<Self, ParseError> {
        let syntax = Syntax::of(permission);
        let (service, action) = match syntax {
            Syntax::V2 => permission.rsplit_once(V2_MARKER),
            Syntax::V1 => permission.split_once('.'),
        }
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingDelimiter, permission))?;

        if service.is_empty() || action.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptySegment, permission));
        }

        Ok(Self {
            key: PermissionKey::new(service, action),
            has_v1: syntax == Syntax::V1,
            has_v2: syntax == Syntax::V2,
            deny_support,
            v1_override: None,
        })
    }

    pub fn key(&self) -> &PermissionKey {
        &self.key
    }

    pub fn service(&self) -> &str {
        self.key.service()
    }

    pub fn action(&self) -> &str {
        self.key.action()
    }

    pub fn has_v1(&self) -> bool {
        self.has_v1
    }

    pub fn has_v2(&self) -> bool {
        self.has_v2
    }

    pub fn deny_support(&self) -> bool {
        self.deny_support
    }

    pub fn v1_override(&self) -> Option<&str> {
        self.v1_override.as_deref()
    }

    /// Absorb another observation of the same permission.
    ///
    /// Flags are OR-ed; an override already present is kept.
    pub fn combine(&mut self, other: &Self) {
        debug_assert_eq!(self.key, other.key, "combine across different keys");
        self.has_v1 |= other.has_v1;
        self.has_v2 |= other.has_v2;
        self.deny_support |= other.deny_support;
        if self.v1_override.is_none() {
            self.v1_override.clone_from(&other.v1_override);
        }
    }

    /// Mark V1 support, recording a V1 spelling that cannot be derived from
    /// the key. `None` leaves V1 rendered mechanically.
    pub(crate) fn adopt_v1_name(&mut self, v1: Option<String>) {
        self.v1_override = v1;
        self.has_v1 = true;
    }

    pub fn as_v1(&self) -> Option<String> {
        if !self.has_v1 {
            return None;
        }
        Some(
            self.v1_override
                .clone()
                .unwrap_or_else(|| format!("{}.{}", self.service(), self.action())),
        )
    }

    pub fn as_v2(&self) -> Option<String> {
        self.has_v2
            .then(|| format!("{}{V2_MARKER}{}", self.service(), self.action()))
    }

    pub fn render(&self, syntax: Syntax) -> Option<String> {
        match syntax {
            Syntax::V1 => self.as_v1(),
            Syntax::V2 => self.as_v2(),
        }
    }
}

impl PartialEq for GcpPermission {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for GcpPermission {}

impl Hash for GcpPermission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for GcpPermission {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GcpPermission {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
