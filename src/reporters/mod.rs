//! Output reporters for analysis results and log events
//!
//! One reporter per run, selected once at startup:
//! - `console` - immediate colorized terminal lines with nested groups
//! - `github` - GitHub Actions workflow commands (`::error ...::`)
//! - `azure` - Azure Pipelines logging commands (`##vso[...]`)
//! - `json` - buffered, emitted as a single JSON document on close

mod azure;
mod console;
mod github;
mod json;

pub use azure::AzureReporter;
pub use console::ConsoleReporter;
pub use github::{CiEnv, GithubReporter, ProcessEnv};
pub use json::JsonReporter;

use crate::models::{CommandResult, SourceLocation};

/// The event stream every backend must render: leveled messages with
/// optional source locations, nested groups, progress, and the terminal
/// result. Implementations only perform I/O; none mutate analysis state.
pub trait Reporter {
    fn write_error(&mut self, message: &str, location: Option<&SourceLocation>);
    fn write_warning(&mut self, message: &str, location: Option<&SourceLocation>);
    fn write_info(&mut self, message: &str, location: Option<&SourceLocation>);
    fn write_debug(&mut self, message: &str);

    fn open_group(&mut self, title: &str, key: Option<&str>);
    fn close_group(&mut self, key: Option<&str>);

    fn set_progress(&mut self, total: usize, current: usize, message: Option<&str>);

    /// Record the terminal result of a successful run. Called exactly once.
    fn set_result(&mut self, result: &CommandResult);

    /// Record a fatal failure before exit.
    fn set_failed(&mut self, message: &str) {
        self.write_error(message, None);
    }

    /// Finalize any buffered output. Invoked on every exit path.
    fn close(&mut self) {}
}

/// Which reporter backend a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterKind {
    #[default]
    Console,
    Github,
    Azure,
    Json,
}

impl std::fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReporterKind::Console => write!(f, "console"),
            ReporterKind::Github => write!(f, "github"),
            ReporterKind::Azure => write!(f, "azure"),
            ReporterKind::Json => write!(f, "json"),
        }
    }
}

/// Construct the process-wide reporter for the selected backend, writing to
/// standard output. `verbose` only affects the console backend; the CI and
/// JSON backends always carry debug events.
pub fn create(kind: ReporterKind, verbose: bool) -> Box<dyn Reporter> {
    match kind {
        ReporterKind::Console => Box::new(ConsoleReporter::stdout().with_verbose(verbose)),
        ReporterKind::Github => Box::new(GithubReporter::new(std::io::stdout(), ProcessEnv)),
        ReporterKind::Azure => Box::new(AzureReporter::new(std::io::stdout())),
        ReporterKind::Json => Box::new(JsonReporter::new(std::io::stdout())),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{AggregateResult, HealthIndicator};

    /// A representative result: 7 of 10 members documented, warning band.
    pub(crate) fn test_result() -> CommandResult {
        CommandResult::new(
            AggregateResult {
                total: 10,
                undocumented: 3,
            },
            HealthIndicator::Warning,
            "Documentation coverage is below the acceptable threshold.".to_string(),
        )
    }

    pub(crate) fn test_location() -> SourceLocation {
        SourceLocation {
            file: Some("src/Widget.cs".to_string()),
            line: Some(12),
            col: Some(5),
            end_line: Some(12),
            end_column: Some(20),
            code: Some("DOC001".to_string()),
        }
    }

    #[test]
    fn kind_display() {
        assert_eq!(ReporterKind::Console.to_string(), "console");
        assert_eq!(ReporterKind::Github.to_string(), "github");
        assert_eq!(ReporterKind::Azure.to_string(), "azure");
        assert_eq!(ReporterKind::Json.to_string(), "json");
    }
}
