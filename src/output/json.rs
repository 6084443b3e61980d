//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Per-major outcomes with rendered variants

use crate::domain::{MajorOutcome, RunReport, SkippedVariant};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    dry_run: bool,
    should_update: bool,
    summary: JsonSummary,
    /// Omitted in quiet mode
    #[serde(skip_serializing_if = "Vec::is_empty")]
    outcomes: Vec<&'a MajorOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped_variants: Vec<&'a SkippedVariant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<&'a str>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    updated_versions: Vec<String>,
    updates: usize,
    deferred: usize,
    files_changed: usize,
}

impl JsonSummary {
    fn from_report(report: &RunReport) -> Self {
        Self {
            updated_versions: report
                .updated_versions()
                .iter()
                .map(|v| v.to_string())
                .collect(),
            updates: report.updates().count(),
            deferred: report
                .outcomes
                .iter()
                .filter(|o| matches!(o, MajorOutcome::Deferred { .. }))
                .count(),
            files_changed: report.files_changed(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let outcomes = match self.verbosity {
            Verbosity::Quiet => Vec::new(),
            Verbosity::Normal => report
                .outcomes
                .iter()
                .filter(|o| !matches!(o, MajorOutcome::UpToDate { .. }))
                .collect(),
            Verbosity::Verbose => report.outcomes.iter().collect(),
        };

        let output = JsonOutput {
            dry_run: report.dry_run,
            should_update: report.should_update,
            summary: JsonSummary::from_report(report),
            outcomes,
            skipped_variants: report.skipped_variants.iter().collect(),
            errors: report.errors.iter().map(String::as_str).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&JsonSummary::from_report(report))
            .map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
