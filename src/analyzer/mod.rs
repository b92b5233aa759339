//! Member analysis: per-file classification and sequential aggregation.
//!
//! Projects are processed one at a time, and within a project files are
//! processed one at a time, so running totals and progress counters need no
//! synchronization. A cancellation token is checked at least once per file.

use crate::models::{AggregateResult, FileAnalysisResult};
use crate::parser::{LineScanParser, SourceParser};
use crate::reporters::Reporter;
use crate::resolver::files::{BuildResolver, WalkBuildResolver};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Cooperative cancellation signal, checked between files. Cheap to clone;
/// cancelling any clone aborts the run at the next check.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Marker for a cooperatively aborted run. Distinct from a run that
/// completed with an `Error` classification: no results are reported.
#[derive(Debug, Error)]
#[error("analysis cancelled")]
pub struct Cancelled;

/// Analyzes the member declarations of each source file of each project.
pub struct MemberAnalyzer {
    parser: Box<dyn SourceParser>,
    resolver: Box<dyn BuildResolver>,
    cancel: CancellationToken,
}

impl Default for MemberAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberAnalyzer {
    pub fn new() -> Self {
        Self {
            parser: Box::new(LineScanParser),
            resolver: Box::new(WalkBuildResolver),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_parser(mut self, parser: Box<dyn SourceParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_resolver(mut self, resolver: Box<dyn BuildResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Analyze every project in order, folding per-file counts into one
    /// aggregate. Each project gets its own reporter group.
    pub fn analyze_projects(
        &self,
        manifests: &[impl AsRef<Path>],
        reporter: &mut dyn Reporter,
    ) -> Result<AggregateResult> {
        let mut aggregate = AggregateResult::default();
        for manifest in manifests {
            let manifest = manifest.as_ref();
            reporter.open_group(&format!("Analyzing {}", manifest.display()), None);
            let outcome = self.analyze_project(manifest, aggregate, reporter);
            reporter.close_group(None);
            aggregate = outcome?;
        }
        Ok(aggregate)
    }

    /// Analyze one project's files sequentially, returning the updated
    /// aggregate. Files that vanished since resolution are skipped silently
    /// and removed from the expected count.
    pub fn analyze_project(
        &self,
        manifest: &Path,
        mut aggregate: AggregateResult,
        reporter: &mut dyn Reporter,
    ) -> Result<AggregateResult> {
        reporter.write_debug(&format!("Resolving sources for {}", manifest.display()));
        let files = self
            .resolver
            .source_files(manifest)
            .with_context(|| format!("resolving sources for {}", manifest.display()))?;

        // Eagerly counted up front so progress has a stable denominator.
        let mut expected = files.len();
        let mut processed = 0;

        for file in &files {
            if self.cancel.is_cancelled() {
                return Err(Cancelled.into());
            }
            if !file.exists() {
                // Stale build output; not an error.
                expected -= 1;
                continue;
            }
            let result = self.analyze_file(file, reporter)?;
            aggregate = aggregate.fold(&result);
            processed += 1;
        }

        if expected == 0 {
            reporter.write_warning("no source files analyzed", None);
        } else {
            let name = manifest
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| manifest.display().to_string());
            reporter.set_progress(expected, processed, Some(&name));
        }

        Ok(aggregate)
    }

    /// Analyze a single existing file: parse members, keep the public API
    /// surface, and count how many members lack documentation.
    pub fn analyze_file(
        &self,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<FileAnalysisResult> {
        // Whether debug events reach the user is the backend's concern.
        reporter.write_debug(&format!("Analyzing file: {}", path.display()));
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading source file {}", path.display()))?;

        let mut result = FileAnalysisResult::default();
        for member in self.parser.parse_members(&text) {
            if !member.accessibility.is_api() {
                continue;
            }
            result.public_member_count += 1;
            if !member.has_documentation {
                result.undocumented_count += 1;
            }
        }
        Ok(result)
    }
}
