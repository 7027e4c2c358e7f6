#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod permission;
pub mod report;
pub mod sources;

pub use config::Config;
pub use error::{ConfigError, MappingError, ParseError, ParseErrorKind, Result, SourceError};
pub use loader::{load_from_source, load_permission_set};
pub use permission::{AuditFinding, GcpPermission, PermissionKey, PermissionSet, Syntax};
pub use sources::{BundledSource, LiveSource, PermissionSource};
