//! Progress display for a resolution run
//!
//! One spinner per stage names the catalogs being fetched; a bar counts
//! rendered variants and shows the `major/variant` being written.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const RENDER_TEMPLATE: &str = "{spinner:.cyan} Rendering {msg} [{bar:30.cyan/blue}] {pos}/{len}";

/// Spinner label for a concurrent fetch from the named sources
pub fn fetch_label(sources: &[&str]) -> String {
    match sources {
        [] => "Fetching...".to_string(),
        [only] => format!("Fetching {}...", only),
        [init @ .., last] => format!("Fetching {} and {}...", init.join(", "), last),
    }
}

/// Progress reporter drawn on stderr
pub struct Progress {
    /// Off for quiet, JSON and version-list output
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Spinner while the definition tree is read
    pub fn scanning(&mut self) {
        self.spin("Scanning definitions...".to_string());
    }

    /// Spinner while the named catalogs are fetched together
    pub fn fetching(&mut self, sources: &[&str]) {
        self.spin(fetch_label(sources));
    }

    /// Bar over the `total` variants about to be rendered
    pub fn rendering(&mut self, total: usize) {
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::with_template(RENDER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░");
        let bar = ProgressBar::new(total as u64).with_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Name the variant being rendered
    pub fn variant(&self, major: u64, variant: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{}/{}", major, variant));
        }
    }

    /// Count one variant as handled, written or skipped
    pub fn variant_done(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Clear the current spinner or bar
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn spin(&mut self, message: String) {
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        let spinner = ProgressBar::new_spinner().with_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }
}
