//! Interactive console reporter with colors and nested group indentation.

use super::Reporter;
use crate::models::{CommandResult, HealthIndicator, SourceLocation};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tracing::warn;

pub struct ConsoleReporter<W: Write> {
    out: W,
    /// Nesting depth: incremented on group open, decremented on close.
    indent: usize,
    bar: Option<ProgressBar>,
    verbose: bool,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: 0,
            bar: None,
            verbose: false,
        }
    }

    /// Render debug events; they are suppressed by default.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn write_line(&mut self, line: &str) {
        let padding = if line.is_empty() {
            String::new()
        } else {
            "  ".repeat(self.indent)
        };
        if let Err(e) = writeln!(self.out, "{padding}{line}") {
            warn!("failed to write console output: {e}");
        }
    }

    fn leveled(&mut self, prefix: console::StyledObject<&str>, message: &str, location: Option<&SourceLocation>) {
        let suffix = location
            .and_then(|loc| loc.file.as_ref().map(|f| (f, loc.line)))
            .map(|(file, line)| match line {
                Some(line) => format!(" {}", style(format!("[{file}:{line}]")).dim()),
                None => format!(" {}", style(format!("[{file}]")).dim()),
            })
            .unwrap_or_default();
        self.write_line(&format!("{prefix} {message}{suffix}"));
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn write_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.leveled(style("Error:").red().bold(), message, location);
    }

    fn write_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.leveled(style("Warning:").yellow().bold(), message, location);
    }

    fn write_info(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.leveled(style("Info:").blue().bold(), message, location);
    }

    fn write_debug(&mut self, message: &str) {
        if self.verbose {
            self.leveled(style("Debug:").dim(), message, None);
        }
    }

    fn open_group(&mut self, title: &str, _key: Option<&str>) {
        self.write_line(&format!("{}", style(title).bold()));
        self.indent += 1;
    }

    fn close_group(&mut self, _key: Option<&str>) {
        self.indent = self.indent.saturating_sub(1);
        self.write_line("");
    }

    fn set_progress(&mut self, total: usize, current: usize, message: Option<&str>) {
        let bar = self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template("{bar:30} {pos}/{len} files {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        });
        bar.set_length(total as u64);
        bar.set_position(current as u64);
        if let Some(message) = message {
            bar.set_message(message.to_string());
        }
    }

    fn set_result(&mut self, result: &CommandResult) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        let aggregate = &result.aggregate;
        let pct = format!("{}%", aggregate.documented_percentage_display());
        let pct = match result.health {
            HealthIndicator::Error => style(pct).red().bold(),
            HealthIndicator::Warning => style(pct).yellow().bold(),
            HealthIndicator::Success => style(pct).green().bold(),
        };

        self.write_line("");
        self.write_line(&format!(
            "{} {pct} ({}/{})",
            style("Documented API:").bold(),
            aggregate.documented(),
            aggregate.total
        ));
        self.write_line(&format!("{} {}", result.health_glyph(), result.message));
        self.write_line(&format!("{}", style(result.badge_url()).dim()));
    }

    fn close(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
