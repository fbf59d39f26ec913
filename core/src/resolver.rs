#![deny(missing_docs)]

//! # Type Resolution
//!
//! Maps C# type names to the source file declaring them, assuming the
//! one-type-per-file convention (`CreateAppCommand` lives in `CreateAppCommand.cs`).

use crate::error::AppResult;
use crate::parser::{extract_properties, ParsedProperty};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reduces a type reference to the bare name used for the file lookup.
///
/// Generic arguments and namespace qualifiers are dropped:
/// `List<T>` becomes `List`, `Apps.Commands.CreateApp` becomes `CreateApp`.
pub fn clean_type_name(type_name: &str) -> &str {
    let head = type_name.split('<').next().unwrap_or(type_name);
    head.rsplit('.').next().unwrap_or(head).trim()
}

/// Per-run cache of type name to declaring file.
///
/// Misses are cached too, so an unknown type costs one tree walk per index.
/// Independent runs should use independent indexes.
#[derive(Debug)]
pub struct TypeIndex {
    root: PathBuf,
    cache: HashMap<String, Option<PathBuf>>,
}

impl TypeIndex {
    /// Creates an empty index over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// The directory searched by this index.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the cached lookup result for a type, if it was looked up before.
    pub fn cached(&self, type_name: &str) -> Option<Option<&Path>> {
        self.cache
            .get(clean_type_name(type_name))
            .map(|hit| hit.as_deref())
    }

    /// Finds `<Name>.cs` under the root, walking in file name order.
    pub fn find_file(&mut self, type_name: &str) -> Option<PathBuf> {
        let name = clean_type_name(type_name).to_string();
        if let Some(hit) = self.cache.get(&name) {
            return hit.clone();
        }

        let file_name = format!("{}.cs", name);
        let found = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name.as_str())
            .map(|entry| entry.into_path());

        self.cache.insert(name, found.clone());
        found
    }

    /// Resolves a type and extracts its properties.
    ///
    /// An unknown type yields an empty list.
    ///
    /// # Errors
    ///
    /// Fails when the declaring file cannot be read or its argument list does
    /// not parse.
    pub fn type_properties(&mut self, type_name: &str) -> AppResult<Vec<ParsedProperty>> {
        let Some(path) = self.find_file(type_name) else {
            return Ok(Vec::new());
        };
        let content = fs::read_to_string(&path)?;
        extract_properties(&content)
    }
}
