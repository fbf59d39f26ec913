//! # Swagger Gate Patch
//!
//! Removes the `IsDevelopment()` guard around `app.UseSwagger();` in service
//! bootstrap files so the UI is served in every environment.

use crate::error::AppResult;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Bootstrap file name the patch applies to.
pub const BOOTSTRAP_FILE: &str = "Program.cs";

const UNGATED: &str = "app.UseSwagger();";

fn gate_regex() -> &'static Regex {
    static GATE_RE: OnceLock<Regex> = OnceLock::new();
    GATE_RE.get_or_init(|| {
        Regex::new(
            r"(?s)if\s*\(\s*app\.Environment\.IsDevelopment\(\)\s*\)\s*\{\s*app\.UseSwagger\(\);\s*\}",
        )
        .expect("Invalid regex")
    })
}

/// Rewrites every guarded `UseSwagger` call. Returns `None` when nothing changed.
pub fn ungate_swagger(source: &str) -> Option<String> {
    let patched = gate_regex().replace_all(source, UNGATED);
    if patched == source {
        None
    } else {
        Some(patched.into_owned())
    }
}

/// Outcome of a tree-wide patch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SwaggerPatchReport {
    /// Files that were (or, in a dry run, would be) rewritten.
    pub updated: Vec<PathBuf>,
    /// Files that could not be read or written, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Whether `path` is a bootstrap file inside an `*.API` project.
pub fn is_api_bootstrap(path: &Path) -> bool {
    let named = path.file_name().is_some_and(|n| n == BOOTSTRAP_FILE);
    let in_api = path
        .parent()
        .is_some_and(|dir| dir.to_string_lossy().contains(".API"));
    named && in_api
}

/// Applies `ungate_swagger` to every API bootstrap file under `root`.
///
/// With `dry_run` set, files are only inspected.
pub fn patch_swagger_tree(root: &Path, dry_run: bool) -> AppResult<SwaggerPatchReport> {
    let mut report = SwaggerPatchReport::default();

    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_api_bootstrap(e.path()));

    for entry in files {
        let path = entry.path();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                report.skipped.push((path.to_path_buf(), e.to_string()));
                continue;
            }
        };

        let Some(patched) = ungate_swagger(&content) else {
            continue;
        };

        if !dry_run {
            if let Err(e) = fs::write(path, patched) {
                report.skipped.push((path.to_path_buf(), e.to_string()));
                continue;
            }
        }
        report.updated.push(path.to_path_buf());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GATED: &str = r#"var app = builder.Build();

if (app.Environment.IsDevelopment())
{
    app.UseSwagger();
}

app.UseSwaggerUI();
"#;

    #[test]
    fn test_ungate() {
        let patched = ungate_swagger(GATED).unwrap();
        assert!(patched.contains("\napp.UseSwagger();\n"));
        assert!(!patched.contains("IsDevelopment"));
        assert!(patched.contains("app.UseSwaggerUI();"));
    }

    #[test]
    fn test_guard_with_other_statements_is_untouched() {
        let code = "if (app.Environment.IsDevelopment()) { app.UseSwagger(); app.UseSwaggerUI(); }";
        assert!(ungate_swagger(code).is_none());
    }

    #[test]
    fn test_patch_tree_only_api_projects() {
        let dir = tempdir().unwrap();
        let api = dir.path().join("Auth/Auth.API");
        let worker = dir.path().join("Auth/Auth.Worker");
        fs::create_dir_all(&api).unwrap();
        fs::create_dir_all(&worker).unwrap();
        fs::write(api.join("Program.cs"), GATED).unwrap();
        fs::write(worker.join("Program.cs"), GATED).unwrap();

        let dry = patch_swagger_tree(dir.path(), true).unwrap();
        assert_eq!(dry.updated, vec![api.join("Program.cs")]);
        assert_eq!(fs::read_to_string(api.join("Program.cs")).unwrap(), GATED);

        let report = patch_swagger_tree(dir.path(), false).unwrap();
        assert_eq!(report.updated.len(), 1);
        assert!(!fs::read_to_string(api.join("Program.cs"))
            .unwrap()
            .contains("IsDevelopment"));
        assert_eq!(fs::read_to_string(worker.join("Program.cs")).unwrap(), GATED);

        // Second run finds nothing left to do.
        let again = patch_swagger_tree(dir.path(), false).unwrap();
        assert!(again.updated.is_empty());
    }
}
