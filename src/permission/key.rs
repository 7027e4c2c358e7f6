use std::fmt;

/// Identity of one logical permission, independent of the syntax it was
/// observed under.
///
/// Ordering is lexicographic on `service`, then `action`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionKey {
    service: String,
    action: String,
}

impl PermissionKey {
    pub(crate) fn new(service: &str, action: &str) -> Self {
        Self {
            service: service.to_string(),
            action: action.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.service, self.action)
    }
}
