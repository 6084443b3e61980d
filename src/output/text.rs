//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One line per updated, deferred, refreshed or skipped major with colors
//! - Up-to-date majors and skipped variants in verbose mode
//! - Summary with totals

use crate::domain::{MajorOutcome, RenderedVariant, RunReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn dry_run_prefix(&self, report: &RunReport) -> String {
        if report.dry_run {
            format!("{} ", self.paint("(dry-run)", |s| s.cyan()))
        } else {
            String::new()
        }
    }

    fn variant_list(&self, variants: &[RenderedVariant]) -> String {
        variants
            .iter()
            .map(|v| {
                if v.changed {
                    v.name.clone()
                } else {
                    format!("{} (unchanged)", v.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn format_outcome(&self, outcome: &MajorOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let arrow = if self.color { "→".dimmed().to_string() } else { "->".to_string() };

        match outcome {
            MajorOutcome::Updated {
                major,
                scope,
                from,
                to,
                expedited,
                variants,
                deferred,
            } => {
                let mut tags = vec![scope.to_string()];
                if *expedited {
                    tags.push(self.paint("security", |s| s.red().bold()));
                }
                writeln!(
                    writer,
                    "  {:>4}  {} {} {} [{}]",
                    major,
                    self.paint(&from.to_string(), |s| s.dimmed()),
                    arrow,
                    self.paint(&to.to_string(), |s| s.bright_white().bold()),
                    tags.join(", ")
                )?;
                if !variants.is_empty() {
                    writeln!(writer, "        {}", self.variant_list(variants))?;
                }
                if let Some(reason) = deferred {
                    let note = format!("alternate variants held back: {}", reason);
                    writeln!(writer, "        {}", self.paint(&note, |s| s.yellow()))?;
                }
            }
            MajorOutcome::Deferred { major, target, reason } => {
                let line = format!("{} deferred ({})", target, reason);
                writeln!(writer, "  {:>4}  {}", major, self.paint(&line, |s| s.yellow()))?;
            }
            MajorOutcome::Refreshed { major, variants } => {
                writeln!(
                    writer,
                    "  {:>4}  {} {}",
                    major,
                    self.paint("refreshed", |s| s.cyan()),
                    self.variant_list(variants)
                )?;
            }
            MajorOutcome::UpToDate { major } => {
                if self.verbosity == Verbosity::Verbose {
                    writeln!(writer, "  {:>4}  {}", major, self.paint("up to date", |s| s.dimmed()))?;
                }
            }
            MajorOutcome::Skipped { major, reason } => {
                let line = format!("skipped ({})", reason);
                writeln!(writer, "  {:>4}  {}", major, self.paint(&line, |s| s.dimmed()))?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only name the updated versions
        if self.verbosity == Verbosity::Quiet {
            for version in report.updated_versions() {
                writeln!(writer, "{}{}", self.dry_run_prefix(report), version)?;
            }
            return Ok(());
        }

        for outcome in &report.outcomes {
            self.format_outcome(outcome, writer)?;
        }

        if self.verbosity == Verbosity::Verbose && !report.skipped_variants.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "  {}", self.paint("Skipped variants:", |s| s.dimmed()))?;
            for skipped in &report.skipped_variants {
                writeln!(
                    writer,
                    "  {:>4}  {} ({})",
                    skipped.major, skipped.variant, skipped.reason
                )?;
            }
        }

        if report.has_errors() {
            writeln!(writer)?;
            writeln!(writer, "{}:", self.paint("Errors", |s| s.red().bold()))?;
            for error in &report.errors {
                let mark = if self.color { "✗".red().to_string() } else { "-".to_string() };
                writeln!(writer, "  {} {}", mark, error)?;
            }
        }

        writeln!(writer)?;
        self.format_summary(report, writer)
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(report);
        let updated = report.updated_versions().len();
        let deferred = report
            .outcomes
            .iter()
            .filter(|o| matches!(o, MajorOutcome::Deferred { .. }))
            .count();
        let files = report.files_changed();

        if updated == 0 && deferred == 0 && files == 0 {
            writeln!(
                writer,
                "{}{}",
                prefix,
                self.paint("All definitions are up to date", |s| s.green())
            )?;
            return Ok(());
        }

        let verb = if report.dry_run { "would change" } else { "changed" };
        writeln!(
            writer,
            "{}{} major(s) updated, {} deferred, {} file(s) {}",
            prefix,
            self.paint(&updated.to_string(), |s| s.green()),
            self.paint(&deferred.to_string(), |s| s.yellow()),
            files,
            verb
        )
    }
}
