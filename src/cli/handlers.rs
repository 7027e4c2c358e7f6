use super::types::CommandResult;
use super::{Cli, Commands};
use crate::config::{Config, OutputFormat};
use crate::loader::load_permission_set;
use crate::permission::{GcpPermission, PermissionSet, Syntax};
use crate::report::{PermissionRecord, SetSummary, render_record, render_records, render_summary};
use anyhow::{Context, Result};

async fn load(cli: &Cli, config: &Config) -> Result<PermissionSet> {
    let live = cli.live || config.sources.live;
    let origin = if live { "live" } else { "bundled" };
    load_permission_set(live, config)
        .await
        .with_context(|| format!("failed to load {origin} permission data"))
}

/// Run one CLI command against `config`. Flags on `cli` take precedence.
pub async fn dispatch(cli: &Cli, config: &Config) -> Result<CommandResult> {
    let format = cli.format.unwrap_or(config.output.format);

    match &cli.command {
        Commands::Convert { name } => Ok(CommandResult::ok(GcpPermission::v2_to_v1(name)?)),
        Commands::List {
            service,
            deny_only,
            syntax,
            sorted,
        } => {
            let set = load(cli, config).await?;
            handle_list(&set, service.as_deref(), *deny_only, *syntax, *sorted, format)
        }
        Commands::Lookup { name } => handle_lookup(&load(cli, config).await?, name, format),
        Commands::Stats => {
            let summary = SetSummary::of(&load(cli, config).await?);
            Ok(CommandResult::ok(render_summary(&summary, format)?))
        }
        Commands::Audit => handle_audit(&load(cli, config).await?, format),
    }
}

fn handle_list(
    set: &PermissionSet,
    service: Option<&str>,
    deny_only: bool,
    syntax: Option<Syntax>,
    sorted: bool,
    format: OutputFormat,
) -> Result<CommandResult> {
    let ordered: Vec<&GcpPermission> = if sorted {
        set.sorted()
    } else {
        set.permissions().collect()
    };
    let selected = ordered
        .into_iter()
        .filter(|perm| service.is_none_or(|s| perm.service() == s))
        .filter(|perm| !deny_only || perm.deny_support());

    let text = if let Some(syntax) = syntax {
        let names: Vec<String> = selected.filter_map(|perm| perm.render(syntax)).collect();
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&names)?,
            OutputFormat::Text => names.join("\n"),
        }
    } else {
        let records: Vec<PermissionRecord> = selected.map(PermissionRecord::from).collect();
        render_records(&records, format)?
    };
    Ok(CommandResult::ok(text))
}

fn handle_lookup(set: &PermissionSet, name: &str, format: OutputFormat) -> Result<CommandResult> {
    match set.get(name)? {
        Some(perm) => Ok(CommandResult::ok(render_record(
            &PermissionRecord::from(perm),
            format,
        )?)),
        None => Ok(CommandResult::failed(format!("permission not found: {name}"))),
    }
}

fn handle_audit(set: &PermissionSet, format: OutputFormat) -> Result<CommandResult> {
    let findings: Vec<String> = set.audit().iter().map(ToString::to_string).collect();
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&findings)?,
        OutputFormat::Text if findings.is_empty() => "no findings".to_string(),
        OutputFormat::Text => findings.join("\n"),
    };
    if findings.is_empty() {
        Ok(CommandResult::ok(text))
    } else {
        tracing::warn!(count = findings.len(), "audit found inconsistencies");
        Ok(CommandResult::failed(text))
    }
}
