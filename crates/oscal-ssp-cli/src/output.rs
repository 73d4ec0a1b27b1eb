//! Output formatting and display utilities
//!
//! Provides colored, formatted output for the CLI

use colored::Colorize;

use oscal_ssp::compliance::vocabulary::{CONTROL_ORIGINATIONS, IMPLEMENTATION_STATUSES};
use oscal_ssp::compliance::{BaselineLevel, ValidationResult};
use oscal_ssp::render::StatusSummary;
use oscal_ssp::{Fingerprint, SspDocument};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", msg.bold().underline());
}

/// Print a subheader
pub fn subheader(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print a JSON report
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print validation results
pub fn print_validation_result(result: &ValidationResult) {
    header("Validation");

    if result.is_valid && result.warnings.is_empty() {
        success("Document structure is valid");
        return;
    }

    if result.is_valid {
        success(&format!("Valid with {} warning(s)", result.warnings.len()));
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            "✗".red().bold(),
            result.errors.len(),
            result.warnings.len()
        );
    }

    if !result.errors.is_empty() {
        subheader("Errors:");
        for issue in &result.errors {
            println!("  {} {}", "✗".red(), issue.to_string().red());
        }
    }

    if !result.warnings.is_empty() {
        subheader("Warnings:");
        for issue in &result.warnings {
            println!("  {} {}", "⚠".yellow(), issue.to_string().yellow());
        }
    }

    println!();
}

/// Print an extracted document in human-readable form
pub fn print_document(document: &SspDocument, baseline: BaselineLevel) {
    match &document.metadata {
        Some(metadata) => {
            header(&display_or(&metadata.title, "(untitled SSP)"));
            if !metadata.version.is_empty() {
                println!("Version: {}", metadata.version);
            }
            if !metadata.oscal_version.is_empty() {
                println!("OSCAL Version: {}", metadata.oscal_version);
            }
            match metadata.last_modified {
                Some(ts) => println!("Last Modified: {}", ts.to_rfc3339()),
                None if !metadata.last_modified_raw.is_empty() => println!(
                    "Last Modified: {} {}",
                    metadata.last_modified_raw,
                    "(unparsed)".dimmed()
                ),
                None => {}
            }
        }
        None => {
            header("(no metadata)");
        }
    }

    subheader("System:");
    match &document.system_characteristics {
        Some(system) => {
            println!("  Name: {}", display_or(&system.system_name, "-"));
            println!("  ID: {}", display_or(&system.system_id, "-"));
            println!(
                "  Sensitivity: {}",
                display_or(&system.security_sensitivity_level, "-")
            );
        }
        None => println!("  {}", "(no system-characteristics)".dimmed()),
    }
    println!("  Baseline: {}", baseline.name().bold());

    let summary = StatusSummary::of(document);
    subheader(&format!("Controls ({}):", summary.total));
    for count in summary.by_status.iter().filter(|c| c.count > 0) {
        println!("  {:<28} {}", count.status.to_string(), count.count);
    }
    if summary.unspecified > 0 {
        println!("  {:<28} {}", "unspecified".dimmed(), summary.unspecified);
    }
    if summary.shared_responsibility > 0 {
        println!(
            "  {:<28} {}",
            "multiple responsible roles", summary.shared_responsibility
        );
    }

    if !document.controls.is_empty() {
        println!();
        for control in &document.controls {
            let status = control
                .implementation_status()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            let roles: Vec<&str> = control
                .responsible_roles
                .iter()
                .map(|r| r.name.as_str())
                .collect();
            println!(
                "  {} {:<12} {:<28} {}",
                format!("#{}", control.ordinal_index).dimmed(),
                control.control_id.cyan(),
                status,
                roles.join(", ").dimmed()
            );
        }
    }

    println!();
}

/// Print one fingerprint per line
pub fn print_fingerprints(fingerprints: &[Fingerprint], with_shape: bool) {
    for fp in fingerprints {
        if with_shape {
            println!("{}  {}", fp.xpath, fp.shape.dimmed());
        } else {
            println!("{}", fp.xpath);
        }
    }
}

/// Print both vocabulary tables
pub fn print_vocabulary() {
    header("implementation-status");
    for (value, ordinal) in IMPLEMENTATION_STATUSES {
        println!("  {}  {}", ordinal.to_string().dimmed(), value);
    }

    header("control-origination");
    for (value, ordinal) in CONTROL_ORIGINATIONS {
        println!("  {}  {}", ordinal.to_string().dimmed(), value);
    }
    println!();
}

/// First `max` characters of `text` on one line, with an ellipsis if cut
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}…", cut)
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("ac-1", 10), "ac-1");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("  The\n   system\tlogs ", 40), "The system logs");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("abcdefghij", 4), "abcd…");
    }

    #[test]
    fn test_display_or() {
        assert_eq!(display_or("", "-"), "-");
        assert_eq!(display_or("x", "-"), "x");
    }
}
