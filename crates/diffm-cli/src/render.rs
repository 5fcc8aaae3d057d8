//! Terminal rendering of comparison results.

use colored::{ColoredString, Colorize};
use diffm_diff::{ComparisonResult, FileComparison};
use diffm_tree::Reconciliation;
use diffm_types::{AnnotatedLine, Delta, LogicalFile, StyleKind};

const MAX_PANE_WIDTH: usize = 80;

pub fn print_result(result: &ComparisonResult, summary: bool) {
    if result.is_empty() && result.failures.is_empty() {
        println!("{} No differences.", "✓".green().bold());
        return;
    }
    for comparison in &result.files {
        if summary {
            println!("{}", summary_line(comparison));
        } else {
            print_comparison(comparison);
        }
    }
    if !result.failures.is_empty() {
        println!("\n{}", "Skipped:".red().bold());
        for failure in &result.failures {
            println!("  {} {}", failure.file.to_string().bold(), failure.message.dimmed());
        }
    }
}

pub fn summary_line(comparison: &FileComparison) -> String {
    format!(
        "{} {} {} {}",
        comparison.file.to_string().bold(),
        format!("({})", comparison.side).dimmed(),
        format!("+{}", comparison.added_lines()).green(),
        format!("-{}", comparison.removed_lines()).red(),
    )
}

pub fn print_comparison(comparison: &FileComparison) {
    println!("{} {}", "==".cyan(), summary_line(comparison));
    if !comparison.has_changes() {
        println!("  identical");
        return;
    }
    for delta in comparison.changes() {
        print_delta(delta);
    }
    println!();
}

fn print_delta(delta: &Delta) {
    let width = pane_width(delta);
    println!(
        "{:<width$}   {}",
        chunk_header(delta.source.position, delta.source.size(), delta),
        chunk_header(delta.target.position, delta.target.size(), delta),
    );
    for (old, new) in delta.old_lines.iter().zip(&delta.new_lines) {
        let padding = width.saturating_sub(old.text.chars().count());
        println!("{}{} {} {}", styled(old), " ".repeat(padding), "│".dimmed(), styled(new));
    }
}

fn chunk_header(position: usize, size: usize, delta: &Delta) -> String {
    format!("@ {position} {size} {}", delta.kind)
}

fn pane_width(delta: &Delta) -> usize {
    delta
        .old_lines
        .iter()
        .map(|line| line.text.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(20, MAX_PANE_WIDTH)
}

/// The line with its ranges highlighted: removed on red, added on green.
pub fn styled(line: &AnnotatedLine) -> String {
    line.segments()
        .map(|(segment, style)| paint(segment, style).to_string())
        .collect()
}

fn paint(segment: &str, style: Option<StyleKind>) -> ColoredString {
    match style {
        Some(StyleKind::Removed) => segment.black().on_red(),
        Some(StyleKind::Added) => segment.black().on_green(),
        None => segment.normal(),
    }
}

pub fn print_reconciliation(reconciliation: &Reconciliation) {
    print_group("Common", &reconciliation.common, |s| s.normal());
    print_group("Only in old", &reconciliation.only_old, |s| s.red());
    print_group("Only in new", &reconciliation.only_new, |s| s.green());
}

fn print_group(title: &str, files: &[LogicalFile], paint: impl Fn(&str) -> ColoredString) {
    println!("{} ({})", title.bold(), files.len());
    for file in files {
        println!("  {}", paint(&file.to_string()));
    }
}
