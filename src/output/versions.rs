//! Comma-joined list of updated versions, one line, for CI consumption

use crate::domain::RunReport;
use crate::output::OutputFormatter;
use std::io::Write;

pub struct VersionListFormatter;

impl OutputFormatter for VersionListFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let versions: Vec<String> = report
            .updated_versions()
            .iter()
            .map(|v| v.to_string())
            .collect();
        writeln!(writer, "{}", versions.join(","))
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        self.format(report, writer)
    }
}
