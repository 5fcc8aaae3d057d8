use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use diffm_diff::{compare, FileComparison, FileDiffer};
use diffm_tree::reconcile_config;
use serde::Serialize;

use crate::cli::*;
use crate::config;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(&cli.config, cli.format, args),
        Command::Files(args) => cmd_files(&cli.config, cli.format, args),
        Command::Show(args) => cmd_show(&cli.config, cli.format, args),
    }
}

fn cmd_compare(config_path: &Path, format: OutputFormat, args: CompareArgs) -> anyhow::Result<()> {
    let config = config::resolve(config_path, &args.overrides)?;
    let result = compare(&config).context("comparison failed")?;
    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => {
            render::print_result(&result, args.summary);
            Ok(())
        }
    }
}

fn cmd_files(config_path: &Path, format: OutputFormat, args: FilesArgs) -> anyhow::Result<()> {
    let config = config::resolve(config_path, &args.overrides)?;
    let reconciliation = reconcile_config(&config).context("failed to reconcile trees")?;
    match format {
        OutputFormat::Json => print_json(&reconciliation),
        OutputFormat::Text => {
            render::print_reconciliation(&reconciliation);
            Ok(())
        }
    }
}

fn cmd_show(config_path: &Path, format: OutputFormat, args: ShowArgs) -> anyhow::Result<()> {
    let config = config::resolve(config_path, &args.overrides)?;
    let reconciliation = reconcile_config(&config).context("failed to reconcile trees")?;
    let Some(entry) = reconciliation
        .universe()
        .into_iter()
        .find(|entry| entry.file.matches_path(&args.path))
    else {
        println!("{} {} is not present in either tree", "✗".red().bold(), args.path.bold());
        return Ok(());
    };

    let differ = FileDiffer::from_config(&config)?;
    let deltas = differ
        .diff(&entry.file, entry.side)
        .with_context(|| format!("failed to compare {}", entry.file))?;
    let comparison = FileComparison {
        file: entry.file,
        side: entry.side,
        deltas,
    };
    match format {
        OutputFormat::Json => print_json(&comparison),
        OutputFormat::Text => {
            render::print_comparison(&comparison);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
