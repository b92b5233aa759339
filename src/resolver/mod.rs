//! Project resolution: turns a project-or-solution selection plus exclusion
//! patterns into the ordered list of project manifests to analyze.

pub mod files;
pub mod solution;

use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors detected before any source file is touched.
/// All of them terminate the run with exit code 1 and no partial output.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("only one of a project or solution file can be specified")]
    ConflictingSelection,
    #[error("no project or solution file found in {}", .0.display())]
    NothingFound(PathBuf),
    #[error("multiple candidate files found in {}; pass --project or --solution", .0.display())]
    AmbiguousSelection(PathBuf),
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("invalid percentages '{0}': expected 'min,ok' with integers 0-100 and min <= ok")]
    MalformedPercentages(String),
    #[error("no projects left to analyze after resolution and exclusions")]
    NoProjects,
    #[error("failed to read solution: {0}")]
    Solution(String),
}

/// A set of exclusion globs, each anchored to match an entire path.
///
/// `*` matches any run of characters, `?` exactly one; there is no substring
/// matching, so a pattern without wildcards only excludes an exact path.
#[derive(Debug, Default)]
pub struct ExcludeSet {
    patterns: Vec<Regex>,
}

impl ExcludeSet {
    pub fn compile(globs: &[String]) -> Self {
        let patterns = globs.iter().map(|g| glob_to_regex(g)).collect();
        Self { patterns }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let candidate = path.to_string_lossy();
        self.patterns.iter().any(|p| p.is_match(&candidate))
    }
}

fn glob_to_regex(glob: &str) -> Regex {
    let mut pattern = String::with_capacity(glob.len() + 2);
    pattern.push('^');
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            c => pattern.push_str(&regex::escape(&c.to_string())),
        }
    }
    pattern.push('$');
    // The pattern is fully escaped apart from `.*`/`.`, so compilation
    // cannot fail on user input.
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new("^$").expect("empty pattern"))
}

/// Resolve the manifests to analyze.
///
/// Exactly one of `project` / `solution` may be supplied. When neither is,
/// `cwd` is scanned for exactly one `*.sln`, else exactly one `*.csproj`.
/// Exclusion patterns are tested against each manifest's absolute path;
/// enumeration order is preserved.
pub fn resolve(
    project: Option<&Path>,
    solution: Option<&Path>,
    exclude: &[String],
    cwd: &Path,
) -> Result<Vec<PathBuf>, ConfigError> {
    let manifests = match (project, solution) {
        (Some(_), Some(_)) => return Err(ConfigError::ConflictingSelection),
        (Some(project), None) => {
            if !project.exists() {
                return Err(ConfigError::MissingFile(project.to_path_buf()));
            }
            vec![absolute(project, cwd)]
        }
        (None, Some(solution)) => {
            if !solution.exists() {
                return Err(ConfigError::MissingFile(solution.to_path_buf()));
            }
            solution::read_projects(&absolute(solution, cwd))
                .map_err(|e| ConfigError::Solution(format!("{e:#}")))?
        }
        (None, None) => {
            let selection = scan_cwd(cwd)?;
            debug!(path = %selection.display(), "selected manifest from working directory");
            if selection.extension().is_some_and(|e| e == "sln") {
                solution::read_projects(&selection)
                    .map_err(|e| ConfigError::Solution(format!("{e:#}")))?
            } else {
                vec![selection]
            }
        }
    };

    let excludes = ExcludeSet::compile(exclude);
    let manifests: Vec<PathBuf> = manifests
        .into_iter()
        .filter(|m| !excludes.is_excluded(m))
        .collect();

    if manifests.is_empty() {
        return Err(ConfigError::NoProjects);
    }
    Ok(manifests)
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Fallback scan: exactly one solution in `cwd`, else exactly one project.
fn scan_cwd(cwd: &Path) -> Result<PathBuf, ConfigError> {
    let solutions = list_by_extension(cwd, "sln");
    match solutions.len() {
        1 => return Ok(solutions.into_iter().next().expect("one element")),
        n if n > 1 => return Err(ConfigError::AmbiguousSelection(cwd.to_path_buf())),
        _ => {}
    }

    let projects = list_by_extension(cwd, "csproj");
    match projects.len() {
        1 => Ok(projects.into_iter().next().expect("one element")),
        0 => Err(ConfigError::NothingFound(cwd.to_path_buf())),
        _ => Err(ConfigError::AmbiguousSelection(cwd.to_path_buf())),
    }
}

fn list_by_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == extension))
        .collect();
    found.sort();
    found
}
