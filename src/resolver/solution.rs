//! Visual Studio solution (`.sln`) reading.
//!
//! Solutions list their member projects as `Project("{type-guid}") = ...`
//! lines. Only source-project kinds are retained; solution folders and other
//! pseudo-entries are discarded.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Classic .NET Framework C# project.
const PROJECT_TYPE_FRAMEWORK: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";
/// SDK-style C# project.
const PROJECT_TYPE_SDK: &str = "9A19103F-16F7-4668-BE54-8F1D61E87B4E";
/// Common-project-system class library.
const PROJECT_TYPE_CLASS_LIBRARY: &str = "13B669BE-BB05-4DDF-9536-439F39A36129";

/// Project-type identifiers accepted for analysis.
const ALLOWED_PROJECT_TYPES: &[&str] = &[
    PROJECT_TYPE_FRAMEWORK,
    PROJECT_TYPE_SDK,
    PROJECT_TYPE_CLASS_LIBRARY,
];

fn project_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Project("{type-guid}") = "Name", "rel\path.csproj", "{project-guid}"
        Regex::new(
            r#"(?i)^Project\("\{([0-9A-F-]+)\}"\)\s*=\s*"[^"]*",\s*"([^"]+)",\s*"\{[0-9A-F-]+\}""#,
        )
        .expect("static regex")
    })
}

/// Read the member project manifests of a solution, in declaration order,
/// keeping only source-project kinds.
pub fn read_projects(solution: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(solution)
        .with_context(|| format!("reading solution file {}", solution.display()))?;
    let base = solution.parent().unwrap_or_else(|| Path::new("."));

    let mut projects = Vec::new();
    for line in text.lines() {
        let Some(captures) = project_line_regex().captures(line.trim()) else {
            continue;
        };
        let type_guid = captures[1].to_uppercase();
        if !ALLOWED_PROJECT_TYPES.contains(&type_guid.as_str()) {
            debug!(%type_guid, "skipping non-source solution entry");
            continue;
        }
        // Solutions store Windows-style relative paths.
        let relative = captures[2].replace('\\', "/");
        projects.push(base.join(relative));
    }

    Ok(projects)
}
