use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the permission catalog.
///
/// Parsing and data-supply failures keep their own variants so library callers
/// can tell a malformed catalog entry apart from an unreachable source. The
/// binary edge continues to use `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum MappingError {
    // ── Permission names ────────────────────────────────────────────────
    #[error("parse: {0}")]
    Parse(#[from] ParseError),

    // ── Data supply (bundled / live) ────────────────────────────────────
    #[error("source: {0}")]
    Source(#[from] SourceError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Parse errors ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Neither the V2 marker nor a `.` separator is present.
    MissingDelimiter,
    /// A delimiter was found but the service or action side is empty.
    EmptySegment,
    /// A V2 name was required but the marker is absent.
    NotV2,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} `{input}`", describe(.kind))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub input: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

fn describe(kind: &ParseErrorKind) -> &'static str {
    match kind {
        ParseErrorKind::MissingDelimiter => "not a V1 or V2 permission name:",
        ParseErrorKind::EmptySegment => "permission name has an empty service or action:",
        ParseErrorKind::NotV2 => "not a V2 GCP permission:",
    }
}

// ─── Source errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{resource} unavailable: {reason}")]
    Unavailable { resource: String, reason: String },

    #[error("mapping found for {permission}, but {reason}")]
    Extraction { permission: String, reason: String },
}

impl SourceError {
    pub(crate) fn unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MappingError>;
