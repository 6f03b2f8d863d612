//! CLI output formatting.
//!
//! `build` prints a single summary line. `check` prints the full picture:
//!
//! ```text
//! Renames
//!     photo 2.jpg → photo-2.jpg
//! Skipped
//!     mug 2.png (mug.png and mug-2.png taken)
//!
//! Images
//! 001 Blue Vase
//!     Source: blue-vase.jpg
//! 002 Photo
//!     Source: photo.jpg
//!
//! index.html is out of date (2 images, replace between markers)
//! ```
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers write them to stdout. Diagnostics (failed renames,
//! missing images) go through `tracing` on stderr instead.

use crate::inject::Injection;
use crate::normalize::NormalizeReport;
use crate::run::RunReport;
use crate::types::ImageEntry;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn describe_injection(injection: Injection) -> String {
    match injection {
        Injection::Replaced => "replace between markers".to_string(),
        Injection::InsertedBefore(tag) => format!("insert before {tag}"),
        Injection::Appended => "append to end".to_string(),
    }
}

/// The one-line build summary.
pub fn format_summary(count: usize, document: &Path) -> String {
    format!("Injected {} image(s) into {}", count, document_name(document))
}

/// Renames performed, collisions skipped and renames that failed.
///
/// Returns no lines when the pass changed nothing.
pub fn format_normalize_output(report: &NormalizeReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.renamed.is_empty() {
        lines.push("Renames".to_string());
        for r in &report.renamed {
            lines.push(format!("{}{} → {}", indent(1), r.from, r.to));
        }
    }
    if !report.skipped.is_empty() {
        lines.push("Skipped".to_string());
        for s in &report.skipped {
            lines.push(format!(
                "{}{} ({} and {} taken)",
                indent(1),
                s.from,
                s.candidate,
                s.alternate
            ));
        }
    }
    if !report.failed.is_empty() {
        lines.push("Failed".to_string());
        for f in &report.failed {
            lines.push(format!("{}{} → {}: {}", indent(1), f.from, f.to, f.error));
        }
    }
    lines
}

/// The listing as it will appear in the grid.
pub fn format_images(images: &[ImageEntry]) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    if images.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, image) in images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), image.title()));
        lines.push(format!("{}Source: {}", indent(1), image.filename));
    }
    lines
}

/// Full report for the `check` command.
pub fn format_check_output(report: &RunReport) -> Vec<String> {
    let mut lines = format_normalize_output(&report.normalize);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.extend(format_images(&report.images));
    lines.push(String::new());
    let status = if report.document_changed {
        "is out of date"
    } else {
        "is up to date"
    };
    lines.push(format!(
        "{} {} ({} images, {})",
        document_name(&report.document_path),
        status,
        report.images.len(),
        describe_injection(report.injection)
    ));
    lines
}

pub fn print_build_output(report: &RunReport) {
    println!(
        "{}",
        format_summary(report.images.len(), &report.document_path)
    );
}

pub fn print_check_output(report: &RunReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
