//! Analyze command implementation
//!
//! Sequences the full pipeline:
//! 1. Select the reporter backend (one per run)
//! 2. Resolve project manifests (selection, cwd fallback, exclusions)
//! 3. Analyze each project's files sequentially, folding per-file counts
//! 4. Classify the aggregate against the thresholds
//! 5. Report the result and determine the process exit code

use crate::analyzer::{Cancelled, CancellationToken, MemberAnalyzer};
use crate::cli::AnalyzeArgs;
use crate::health::{self, Thresholds};
use crate::models::{CommandResult, HealthIndicator};
use crate::reporters::{self, Reporter, ReporterKind};
use crate::resolver;
use anyhow::{Context, Result};
use tracing::debug;

pub fn run(args: &AnalyzeArgs, cancel: CancellationToken) -> Result<i32> {
    let mut reporter = reporters::create(reporter_kind(args), args.debug);
    let outcome = run_with_reporter(args, reporter.as_mut(), cancel);
    // Buffering reporters must flush on every exit path.
    reporter.close();
    outcome
}

fn reporter_kind(args: &AnalyzeArgs) -> ReporterKind {
    if args.github {
        ReporterKind::Github
    } else if args.azure {
        ReporterKind::Azure
    } else if args.json {
        ReporterKind::Json
    } else {
        ReporterKind::Console
    }
}

/// Run the pipeline against an externally supplied reporter and return the
/// process exit code. Configuration errors surface through `set_failed` and
/// exit 1; a cancelled run propagates as an error without reporting results.
pub fn run_with_reporter(
    args: &AnalyzeArgs,
    reporter: &mut dyn Reporter,
    cancel: CancellationToken,
) -> Result<i32> {
    let thresholds = match Thresholds::parse(&args.percentages) {
        Ok(thresholds) => thresholds,
        Err(e) => {
            reporter.set_failed(&e.to_string());
            return Ok(1);
        }
    };

    let cwd = std::env::current_dir().context("determining working directory")?;
    let manifests = match resolver::resolve(
        args.project.as_deref(),
        args.solution.as_deref(),
        &args.exclude,
        &cwd,
    ) {
        Ok(manifests) => manifests,
        Err(e) => {
            reporter.set_failed(&e.to_string());
            return Ok(1);
        }
    };
    debug!(count = manifests.len(), "resolved project manifests");

    let analyzer = MemberAnalyzer::new().with_cancellation(cancel);
    let aggregate = match analyzer.analyze_projects(&manifests, reporter) {
        Ok(aggregate) => aggregate,
        Err(e) if e.downcast_ref::<Cancelled>().is_some() => {
            // Aborted run: fail fast, report nothing.
            return Err(e);
        }
        Err(e) => {
            reporter.set_failed(&format!("{e:#}"));
            return Ok(1);
        }
    };

    let (health, message) = health::evaluate(&aggregate, thresholds);
    let result = CommandResult::new(aggregate, health, message);
    reporter.set_result(&result);

    let failed = args.set_exit_code && result.health == HealthIndicator::Error;
    Ok(i32::from(failed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_selection() {
        let args = AnalyzeArgs::default();
        assert_eq!(reporter_kind(&args), ReporterKind::Console);
        assert_eq!(
            reporter_kind(&AnalyzeArgs {
                github: true,
                ..AnalyzeArgs::default()
            }),
            ReporterKind::Github
        );
        assert_eq!(
            reporter_kind(&AnalyzeArgs {
                azure: true,
                ..AnalyzeArgs::default()
            }),
            ReporterKind::Azure
        );
        assert_eq!(
            reporter_kind(&AnalyzeArgs {
                json: true,
                ..AnalyzeArgs::default()
            }),
            ReporterKind::Json
        );
    }
}
