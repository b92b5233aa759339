//! Build resolution: which compiled source files belong to a project.
//!
//! Stands in for a full build-system query. The default implementation
//! enumerates `*.cs` files under the manifest's directory, honoring
//! `.gitignore` and skipping build output, which matches the compile items
//! of conventional SDK-style projects.

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Resolves a project manifest to its list of compiled source file paths.
pub trait BuildResolver {
    fn source_files(&self, manifest: &Path) -> Result<Vec<PathBuf>>;
}

/// Directory-walk based resolver for SDK-style project conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkBuildResolver;

impl BuildResolver for WalkBuildResolver {
    fn source_files(&self, manifest: &Path) -> Result<Vec<PathBuf>> {
        let root = manifest.parent().unwrap_or_else(|| Path::new("."));

        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .filter_entry(|entry| {
                // Build output is never a compile item.
                let name = entry.file_name().to_string_lossy();
                !(entry.path().is_dir() && (name == "bin" || name == "obj"))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "cs") {
                files.push(path.to_path_buf());
            }
        }
        // Walk order is filesystem-dependent; sort for deterministic analysis.
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_sources_and_skips_build_output() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("App.csproj");
        fs::write(&manifest, "<Project Sdk=\"Microsoft.NET.Sdk\" />").unwrap();
        fs::write(dir.path().join("A.cs"), "public class A { }").unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/B.cs"), "public class B { }").unwrap();
        fs::create_dir_all(dir.path().join("obj")).unwrap();
        fs::write(dir.path().join("obj/Gen.cs"), "public class Gen { }").unwrap();
        fs::write(dir.path().join("notes.txt"), "not source").unwrap();

        let resolver = WalkBuildResolver;
        let files = resolver.source_files(&manifest).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("A.cs"), dir.path().join("sub/B.cs")]
        );
    }

    #[test]
    fn empty_project_yields_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("Empty.csproj");
        fs::write(&manifest, "<Project />").unwrap();

        let resolver = WalkBuildResolver;
        assert!(resolver.source_files(&manifest).unwrap().is_empty());
    }
}
