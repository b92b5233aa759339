//! Azure Pipelines reporter
//!
//! Plain messages are rendered as `##[<level>]<message>`, issues as
//! `##vso[task.logissue ...]`, progress as `##vso[task.setprogress ...]`.
//! The terminal result is persisted as read-only output variables and a
//! `##vso[task.complete ...]` command carrying the coarse health outcome.
//!
//! Reference: https://learn.microsoft.com/azure/devops/pipelines/scripts/logging-commands

use super::Reporter;
use crate::models::{CommandResult, HealthIndicator, SourceLocation};
use std::io::Write;
use tracing::warn;

pub struct AzureReporter<W: Write> {
    out: W,
}

impl<W: Write> AzureReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!("failed to write logging command: {e}");
        }
    }

    fn message(&mut self, level: Option<&str>, message: &str) {
        match level {
            Some(level) => self.write_line(&format!("##[{level}]{message}")),
            None => self.write_line(message),
        }
    }

    /// `##vso[task.logissue ...]` with each attribute segment omitted when
    /// unset. Only the start position is representable.
    fn issue(&mut self, kind: &str, message: &str, location: Option<&SourceLocation>) {
        let mut line = format!("##vso[task.logissue type={kind};");
        if let Some(loc) = location {
            if let Some(file) = &loc.file {
                line.push_str(&format!("sourcepath={file};"));
            }
            if let Some(l) = loc.line {
                line.push_str(&format!("linenumber={l};"));
            }
            if let Some(col) = loc.col {
                line.push_str(&format!("columnnumber={col};"));
            }
            if let Some(code) = &loc.code {
                line.push_str(&format!("code={code};"));
            }
        }
        line.push(']');
        line.push_str(message);
        self.write_line(&line);
    }

    fn set_variable(&mut self, name: &str, value: &str) {
        self.write_line(&format!(
            "##vso[task.setvariable variable={name};isoutput=true;isreadonly=true]{value}"
        ));
    }
}

impl<W: Write> Reporter for AzureReporter<W> {
    fn write_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.issue("error", message, location);
    }

    fn write_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.issue("warning", message, location);
    }

    fn write_info(&mut self, message: &str, _location: Option<&SourceLocation>) {
        self.message(None, message);
    }

    fn write_debug(&mut self, message: &str) {
        self.message(Some("debug"), message);
    }

    fn open_group(&mut self, title: &str, _key: Option<&str>) {
        self.message(Some("group"), title);
    }

    fn close_group(&mut self, _key: Option<&str>) {
        self.message(Some("endgroup"), "");
    }

    fn set_progress(&mut self, total: usize, current: usize, message: Option<&str>) {
        let percent = if total == 0 {
            100
        } else {
            (current as f64 / total as f64 * 100.0) as u32
        };
        self.write_line(&format!(
            "##vso[task.setprogress value={percent};]{}",
            message.unwrap_or("")
        ));
    }

    fn set_result(&mut self, result: &CommandResult) {
        let aggregate = &result.aggregate;
        self.set_variable("total", &aggregate.total.to_string());
        self.set_variable("undocumented", &aggregate.undocumented.to_string());
        self.set_variable("documented", &aggregate.documented().to_string());
        self.set_variable(
            "percent",
            &aggregate.documented_percentage_display().to_string(),
        );
        self.set_variable("health", result.health_glyph());
        self.set_variable("badge", &result.badge_url());
        self.set_variable("message", &result.message);

        let task_result = match result.health {
            HealthIndicator::Success => "Succeeded",
            HealthIndicator::Warning => "SucceededWithIssues",
            HealthIndicator::Error => "Failed",
        };
        self.write_line(&format!(
            "##vso[task.complete result={task_result};]{}",
            result.message
        ));
    }

    fn set_failed(&mut self, message: &str) {
        self.write_line(&format!("##vso[task.complete result=Failed;]{message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AggregateResult;
    use crate::reporters::tests::{test_location, test_result};

    fn capture(f: impl FnOnce(&mut AzureReporter<&mut Vec<u8>>)) -> String {
        let mut buf = Vec::new();
        let mut reporter = AzureReporter::new(&mut buf);
        f(&mut reporter);
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn issues_with_and_without_location() {
        let out = capture(|r| r.write_error("missing docs", Some(&test_location())));
        assert_eq!(
            out,
            "##vso[task.logissue type=error;sourcepath=src/Widget.cs;linenumber=12;columnnumber=5;code=DOC001;]missing docs\n"
        );

        let out = capture(|r| r.write_warning("w", None));
        assert_eq!(out, "##vso[task.logissue type=warning;]w\n");
    }

    #[test]
    fn plain_and_leveled_messages() {
        let out = capture(|r| {
            r.write_info("hello", None);
            r.write_debug("dbg");
            r.open_group("Analyzing App.csproj", None);
            r.close_group(None);
        });
        assert_eq!(
            out,
            "hello\n##[debug]dbg\n##[group]Analyzing App.csproj\n##[endgroup]\n"
        );
    }

    #[test]
    fn progress_percentage() {
        let out = capture(|r| r.set_progress(4, 1, Some("App.csproj")));
        assert_eq!(out, "##vso[task.setprogress value=25;]App.csproj\n");

        let out = capture(|r| r.set_progress(0, 0, None));
        assert_eq!(out, "##vso[task.setprogress value=100;]\n");
    }

    #[test]
    fn result_sets_variables_and_completes() {
        let out = capture(|r| r.set_result(&test_result()));
        let expected = "\
##vso[task.setvariable variable=total;isoutput=true;isreadonly=true]10
##vso[task.setvariable variable=undocumented;isoutput=true;isreadonly=true]3
##vso[task.setvariable variable=documented;isoutput=true;isreadonly=true]7
##vso[task.setvariable variable=percent;isoutput=true;isreadonly=true]70
##vso[task.setvariable variable=health;isoutput=true;isreadonly=true]\u{26a0}\u{fe0f}
##vso[task.setvariable variable=badge;isoutput=true;isreadonly=true]https://img.shields.io/badge/Documentation%20Coverage-70%25-yellow
##vso[task.setvariable variable=message;isoutput=true;isreadonly=true]Documentation coverage is below the acceptable threshold.
##vso[task.complete result=SucceededWithIssues;]Documentation coverage is below the acceptable threshold.
";
        assert_eq!(out, expected);
    }

    #[test]
    fn completion_result_tracks_health() {
        let mut result = test_result();
        result.health = HealthIndicator::Success;
        let out = capture(|r| r.set_result(&result));
        assert!(out.contains("##vso[task.complete result=Succeeded;]"));

        let failed = CommandResult::new(
            AggregateResult {
                total: 10,
                undocumented: 9,
            },
            HealthIndicator::Error,
            "below minimum".to_string(),
        );
        let out = capture(|r| r.set_result(&failed));
        assert!(out.contains("##vso[task.complete result=Failed;]below minimum"));
    }

    #[test]
    fn set_failed_completes_failed() {
        let out = capture(|r| r.set_failed("config error"));
        assert_eq!(out, "##vso[task.complete result=Failed;]config error\n");
    }
}
