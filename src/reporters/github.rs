//! GitHub Actions reporter
//!
//! Renders every event as a single-line workflow command:
//! `::<verb> key1=val1,key2=val2::<message>`. The terminal result is
//! persisted as `key=value` lines appended to the file named by
//! `GITHUB_OUTPUT` (or legacy `::set-output` commands when unset), and a
//! markdown summary is appended to the `GITHUB_STEP_SUMMARY` file.
//!
//! Reference: https://docs.github.com/actions/reference/workflow-commands-for-github-actions

use super::Reporter;
use crate::models::{CommandResult, SourceLocation};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::warn;

/// Process-environment access for CI integration points. Isolated behind a
/// capability so tests can substitute an in-memory environment.
pub trait CiEnv {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl CiEnv for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

pub struct GithubReporter<W: Write, E: CiEnv> {
    out: W,
    env: E,
}

impl<W: Write, E: CiEnv> GithubReporter<W, E> {
    pub fn new(out: W, env: E) -> Self {
        Self { out, env }
    }

    /// Emit one workflow command. Attribute keys are emitted only when the
    /// corresponding value is present, in fixed order
    /// `file,line,col,endLine,endColumn,title`.
    fn command(&mut self, verb: &str, message: &str, location: Option<&SourceLocation>) {
        let mut args = Vec::new();
        if let Some(loc) = location {
            if let Some(file) = &loc.file {
                args.push(format!("file={file}"));
            }
            if let Some(line) = loc.line {
                args.push(format!("line={line}"));
            }
            if let Some(col) = loc.col {
                args.push(format!("col={col}"));
            }
            if let Some(end_line) = loc.end_line {
                args.push(format!("endLine={end_line}"));
            }
            if let Some(end_column) = loc.end_column {
                args.push(format!("endColumn={end_column}"));
            }
            if let Some(code) = &loc.code {
                args.push(format!("title={code}"));
            }
        }

        let line = if args.is_empty() {
            format!("::{verb}::{message}")
        } else {
            format!("::{verb} {}::{message}", args.join(","))
        };
        self.write_line(&line);
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!("failed to write workflow command: {e}");
        }
    }

    fn append_file(path: &str, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    }
}

impl<W: Write, E: CiEnv> Reporter for GithubReporter<W, E> {
    fn write_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.command("error", message, location);
    }

    fn write_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.command("warning", message, location);
    }

    fn write_info(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.command("notice", message, location);
    }

    fn write_debug(&mut self, message: &str) {
        self.command("debug", message, None);
    }

    fn open_group(&mut self, title: &str, _key: Option<&str>) {
        self.command("group", title, None);
    }

    fn close_group(&mut self, _key: Option<&str>) {
        self.command("endgroup", "", None);
    }

    fn set_progress(&mut self, _total: usize, _current: usize, _message: Option<&str>) {
        // GitHub Actions has no progress channel; stay quiet rather than
        // spam the log.
    }

    fn set_result(&mut self, result: &CommandResult) {
        let aggregate = &result.aggregate;
        let pairs = [
            ("total", aggregate.total.to_string()),
            ("undocumented", aggregate.undocumented.to_string()),
            ("documented", aggregate.documented().to_string()),
            (
                "percent",
                aggregate.documented_percentage_display().to_string(),
            ),
            ("health", result.health_glyph().to_string()),
            ("badge", result.badge_url()),
            ("message", result.message.clone()),
        ];

        if let Some(path) = self.env.var("GITHUB_OUTPUT") {
            let mut content = String::new();
            for (key, value) in &pairs {
                content.push_str(&format!("{key}={value}\n"));
            }
            if let Err(e) = Self::append_file(&path, &content) {
                warn!("failed to write GITHUB_OUTPUT file: {e}");
            }
        } else {
            // Legacy fallback for runners without an output file.
            for (key, value) in &pairs {
                self.write_line(&format!("::set-output name={key}::{value}"));
            }
        }

        let summary = format!(
            "![Documentation coverage {}%]({})\n\n{}\n",
            aggregate.documented_percentage_display(),
            result.badge_url(),
            result.message
        );
        if let Some(path) = self.env.var("GITHUB_STEP_SUMMARY") {
            if let Err(e) = Self::append_file(&path, &summary) {
                warn!("failed to write GITHUB_STEP_SUMMARY file: {e}");
            }
        }
    }
}
