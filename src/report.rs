use crate::config::OutputFormat;
use crate::permission::{GcpPermission, PermissionSet};
use serde::Serialize;
use std::fmt::Write as _;

/// Flattened, serializable view of one permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    pub service: String,
    pub action: String,
    pub v1: Option<String>,
    pub v2: Option<String>,
    pub deny_support: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v1_override: Option<String>,
}

impl From<&GcpPermission> for PermissionRecord {
    fn from(perm: &GcpPermission) -> Self {
        Self {
            service: perm.service().to_string(),
            action: perm.action().to_string(),
            v1: perm.as_v1(),
            v2: perm.as_v2(),
            deny_support: perm.deny_support(),
            v1_override: perm.v1_override().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetSummary {
    pub total: usize,
    pub v1: usize,
    pub v2: usize,
    pub both: usize,
    pub deny_support: usize,
    pub overrides: usize,
}

impl SetSummary {
    pub fn of(set: &PermissionSet) -> Self {
        set.permissions().fold(Self::default(), |mut summary, perm| {
            summary.total += 1;
            summary.v1 += usize::from(perm.has_v1());
            summary.v2 += usize::from(perm.has_v2());
            summary.both += usize::from(perm.has_v1() && perm.has_v2());
            summary.deny_support += usize::from(perm.deny_support());
            summary.overrides += usize::from(perm.v1_override().is_some());
            summary
        })
    }
}

fn flag(value: bool, label: &str) -> &str {
    if value { label } else { "-" }
}

fn text_line(record: &PermissionRecord) -> String {
    format!(
        "{:<60} {:<70} {}",
        record.v1.as_deref().unwrap_or("-"),
        record.v2.as_deref().unwrap_or("-"),
        flag(record.deny_support, "deny"),
    )
}

pub fn render_records(
    records: &[PermissionRecord],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Text => Ok(records.iter().map(text_line).collect::<Vec<_>>().join("\n")),
    }
}

pub fn render_record(record: &PermissionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "service:      {}", record.service)?;
            writeln!(out, "action:       {}", record.action)?;
            writeln!(out, "v1:           {}", record.v1.as_deref().unwrap_or("-"))?;
            writeln!(out, "v2:           {}", record.v2.as_deref().unwrap_or("-"))?;
            write!(out, "deny support: {}", flag(record.deny_support, "yes"))?;
            if let Some(v1_override) = &record.v1_override {
                write!(out, "\nnon-standard: {v1_override}")?;
            }
            Ok(out)
        }
    }
}

pub fn render_summary(summary: &SetSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => Ok(format!(
            "total:        {}\nv1:           {}\nv2:           {}\nboth:         {}\n\
             deny support: {}\nnon-standard: {}",
            summary.total,
            summary.v1,
            summary.v2,
            summary.both,
            summary.deny_support,
            summary.overrides
        )),
    }
}
