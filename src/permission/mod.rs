pub mod identity;
pub mod key;
pub mod set;

pub use identity::{GcpPermission, Syntax, V2_MARKER};
pub use key::PermissionKey;
pub use set::{AuditFinding, PermissionSet};
