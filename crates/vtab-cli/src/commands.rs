use std::path::Path as FsPath;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use vtab_diff::{diff_report, DiffEntry};
use vtab_expand::{Expander, Generation};
use vtab_merge::{diff_columns, merge_columns, ColumnDiffMode, RowWithDiff};
use vtab_path::{Path, PathElement};
use vtab_types::ChangeKind;

use crate::cli::*;
use crate::resolver::DirResolver;
use crate::settings::Settings;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    match cli.command {
        Command::Path(PathCommand::Parse { path }) => cmd_path_parse(&path, cli.format),
        Command::Path(PathCommand::Get { path, file }) => cmd_path_get(&path, &file, cli.format),
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Merge(args) => cmd_merge(args, &settings, cli.format),
        Command::Expand(args) => cmd_expand(args, settings, cli.format).await,
    }
}

fn read_json(file: &FsPath) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", file.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn column_id(file: &FsPath) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

fn paint(kind: ChangeKind) -> colored::ColoredString {
    match kind {
        ChangeKind::Unchanged => kind.as_str().dimmed(),
        ChangeKind::Added => kind.as_str().green(),
        ChangeKind::Deleted => kind.as_str().red(),
        ChangeKind::Changed => kind.as_str().yellow(),
    }
}

fn display_path(path: &Path) -> String {
    if path.is_empty() {
        "(root)".into()
    } else {
        path.to_string()
    }
}

fn cmd_path_parse(text: &str, format: OutputFormat) -> anyhow::Result<()> {
    let path = Path::parse(text)?;
    if let OutputFormat::Json = format {
        return print_json(&path.elements());
    }
    if path.is_empty() {
        println!("{}", "(root)".dimmed());
    }
    for element in path.elements() {
        match element {
            PathElement::Key(key) => println!("  {} {:?}", "key".cyan(), key),
            PathElement::Index(index) => println!("  {} {}", "index".magenta(), index),
        }
    }
    Ok(())
}

fn cmd_path_get(text: &str, file: &FsPath, format: OutputFormat) -> anyhow::Result<()> {
    let path = Path::parse(text)?;
    let document = read_json(file)?;
    match (path.apply(&document), format) {
        (Some(value), OutputFormat::Json) => print_json(value),
        (Some(value), OutputFormat::Text) => {
            println!("{value}");
            Ok(())
        }
        (None, _) => {
            println!("{}", "undefined".dimmed());
            Ok(())
        }
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let left = read_json(&args.left)?;
    let right = read_json(&args.right)?;
    let report = diff_report(&left, &right);
    let entries: Vec<&DiffEntry<'_>> = if args.all {
        report.entries.iter().collect()
    } else {
        report.changes().collect()
    };

    if let OutputFormat::Json = format {
        return print_json(&entries);
    }
    if report.is_unchanged() {
        println!("No changes.");
        return Ok(());
    }
    for entry in entries {
        let detail = match (&entry.left, &entry.right) {
            (Some(l), Some(r)) => format!("{} → {}", compact(l), compact(r)),
            (None, Some(r)) => format!("+ {}", compact(r)),
            (Some(l), None) => format!("- {}", compact(l)),
            (None, None) => String::new(),
        };
        println!("{:>9}  {}  {}", paint(entry.change_kind), display_path(&entry.path).bold(), detail);
    }
    println!(
        "\n{} added, {} deleted, {} changed",
        report.additions().to_string().green(),
        report.deletions().to_string().red(),
        report.modifications().to_string().yellow(),
    );
    Ok(())
}

fn cmd_merge(args: MergeArgs, settings: &Settings, format: OutputFormat) -> anyhow::Result<()> {
    let columns: Vec<String> = args.files.iter().map(|f| column_id(f)).collect();
    let documents = args
        .files
        .iter()
        .map(|f| read_json(f))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let rows = merge_columns(&columns, &documents, &settings.merge)?;
    let mode = if args.baseline {
        ColumnDiffMode::VsBaseline
    } else {
        ColumnDiffMode::VsPrevious
    };
    let diffed: Vec<RowWithDiff<'_>> = diff_columns(&columns, &rows, mode, &settings.refs)
        .into_iter()
        .filter(|r| !args.changed_only || r.row_change_kind.is_change())
        .collect();

    if let OutputFormat::Json = format {
        return print_json(&diffed);
    }
    println!("{}  {}", "columns:".bold(), columns.join(", "));
    for row in &diffed {
        let marker = if row.row.is_code { " (code)".cyan().to_string() } else { String::new() };
        println!("{:>9}  {}{}", paint(row.row_change_kind), row.row.key.bold(), marker);
        for column in &columns {
            let cell = row
                .row
                .value(column)
                .map(compact)
                .unwrap_or_else(|| "—".dimmed().to_string());
            println!("           {:<12} {:>9}  {}", column, paint(row.change_kind(column)), cell);
        }
        for reference in &row.expandable_refs {
            println!("           {} {}", "expandable:".blue(), reference);
        }
    }
    Ok(())
}

async fn cmd_expand(args: ExpandArgs, settings: Settings, format: OutputFormat) -> anyhow::Result<()> {
    let documents = args
        .files
        .iter()
        .map(|f| read_json(f))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let resolver = DirResolver::new(args.refs_dir, settings.refs.clone());
    let expander = Expander::new(Arc::new(resolver), Arc::new(settings.refs), settings.expand);
    let outcome = expander
        .expand(&documents, &args.requested, &Generation::new())
        .await?;

    if let OutputFormat::Json = format {
        return print_json(&outcome);
    }
    for (file, document) in args.files.iter().zip(&outcome.documents) {
        println!("{}", file.display().to_string().bold());
        println!("{}", serde_json::to_string_pretty(document)?);
    }
    let status = if outcome.complete {
        "fixpoint".green()
    } else {
        "pass cap reached".yellow()
    };
    println!(
        "\n{} after {} passes, {} resolver calls, {} resolved",
        status,
        outcome.passes,
        outcome.resolver_calls,
        outcome.resolved.len(),
    );
    for failure in &outcome.failures {
        println!("  {} {}", "unresolved:".red(), failure);
    }
    Ok(())
}

/// One-line rendering of a cell, truncated for wide containers.
fn compact(value: &Value) -> String {
    const LIMIT: usize = 60;
    let text = value.to_string();
    if text.chars().count() <= LIMIT {
        text
    } else {
        let cut: String = text.chars().take(LIMIT).collect();
        format!("{cut}…")
    }
}
