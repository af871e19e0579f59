//! Collection loader - discovers and validates collection entries

use glob::{MatchOptions, Pattern};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use super::entry::{sort_entries, Entry};
use super::frontmatter::{self, FrontMatterError};
use crate::config::CollectionConfig;
use crate::schema::{FieldType, Violation};
use crate::Workspace;

/// Why a collection failed to load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("{0}")]
    Invalid(InvalidReport),
}

/// Every invalid entry found while loading one collection
#[derive(Debug)]
pub struct InvalidReport {
    pub collection: String,
    pub failures: Vec<EntryFailure>,
}

impl InvalidReport {
    /// Total number of problems across all failed files
    pub fn problem_count(&self) -> usize {
        self.failures.iter().map(|f| f.problems.len()).sum()
    }
}

impl fmt::Display for InvalidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collection `{}` has {} invalid {}",
            self.collection,
            self.failures.len(),
            if self.failures.len() == 1 {
                "entry"
            } else {
                "entries"
            }
        )?;
        for failure in &self.failures {
            for problem in &failure.problems {
                write!(f, "\n  {}: {}", failure.source, problem)?;
            }
        }
        Ok(())
    }
}

/// One file that failed to become an entry
#[derive(Debug)]
pub struct EntryFailure {
    /// Source file path relative to the workspace root
    pub source: String,
    pub problems: Vec<Problem>,
}

/// A single problem with one file
#[derive(Debug, Error)]
pub enum Problem {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    FrontMatter(#[from] FrontMatterError),

    #[error("{0}")]
    Schema(#[from] Violation),
}

/// Loads collection entries for a workspace
pub struct CollectionLoader<'a> {
    workspace: &'a Workspace,
}

impl<'a> CollectionLoader<'a> {
    /// Create a new collection loader
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Load and validate one collection by name.
    ///
    /// Returns the validated entries in display order, or a report of
    /// every invalid file. A missing base directory yields an empty
    /// collection.
    pub fn load(&self, name: &str) -> Result<Vec<Entry>, LoadError> {
        let config = self
            .workspace
            .config
            .collection(name)
            .ok_or_else(|| LoadError::UnknownCollection(name.to_string()))?;
        self.load_declared(name, config)
    }

    fn load_declared(
        &self,
        name: &str,
        config: &CollectionConfig,
    ) -> Result<Vec<Entry>, LoadError> {
        let base_dir = self.workspace.base_dir.join(&config.base);
        if !base_dir.exists() {
            tracing::debug!("Collection `{}` base dir {:?} not found", name, base_dir);
            return Ok(Vec::new());
        }

        let pattern = Pattern::new(&config.pattern).map_err(|source| LoadError::Pattern {
            pattern: config.pattern.clone(),
            source,
        })?;
        // `*` must not cross directory boundaries; `**` still does
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::default()
        };

        let mut entries = Vec::new();
        let mut failures = Vec::new();

        for dir_entry in WalkDir::new(&base_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored_name(e.file_name()))
            .filter_map(|e| e.ok())
        {
            let path = dir_entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&base_dir).unwrap_or(path);
            let relative = relative.to_string_lossy().replace('\\', "/");
            if !pattern.matches_with(&relative, options) {
                continue;
            }

            match self.load_entry(name, config, path, &relative) {
                Ok(entry) => entries.push(entry),
                Err(problems) => {
                    let source = path
                        .strip_prefix(&self.workspace.base_dir)
                        .unwrap_or(path)
                        .to_string_lossy()
                        .to_string();
                    tracing::warn!("Invalid entry {}: {} problem(s)", source, problems.len());
                    failures.push(EntryFailure { source, problems });
                }
            }
        }

        if !failures.is_empty() {
            return Err(LoadError::Invalid(InvalidReport {
                collection: name.to_string(),
                failures,
            }));
        }

        let by_order = config
            .schema
            .field("order")
            .map(|spec| spec.ty == FieldType::Number)
            .unwrap_or(false);
        sort_entries(&mut entries, by_order);

        tracing::debug!("Loaded {} entries for collection `{}`", entries.len(), name);
        Ok(entries)
    }

    /// Load a single entry from a file
    fn load_entry(
        &self,
        collection: &str,
        config: &CollectionConfig,
        path: &Path,
        relative: &str,
    ) -> Result<Entry, Vec<Problem>> {
        let content = fs::read_to_string(path).map_err(|e| vec![Problem::Io(e)])?;

        let (fm, body) = frontmatter::parse(&content).map_err(|e| vec![Problem::FrontMatter(e)])?;

        let violations = config.schema.validate(&fm);
        if !violations.is_empty() {
            return Err(violations.into_iter().map(Problem::Schema).collect());
        }

        let id = Path::new(relative)
            .with_extension("")
            .to_string_lossy()
            .replace('\\', "/");

        let source = path
            .strip_prefix(&self.workspace.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut entry = Entry::new(collection, id, source, path.to_path_buf());

        // Declared fields first, in schema order, then any extras
        for (field, _) in config.schema.iter() {
            if let Some(value) = fm.get(field.as_str()) {
                entry.data.insert(field.clone(), value.clone());
            }
        }
        for (key, value) in &fm {
            if let serde_yaml::Value::String(key) = key {
                if !entry.data.contains_key(key) {
                    entry.data.insert(key.clone(), value.clone());
                }
            }
        }

        entry.body = body.to_string();

        Ok(entry)
    }
}

/// Names starting with `_` (drafts and partials) or `.` are never
/// considered for a collection
fn is_ignored_name(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .map(|s| s.starts_with('_') || s.starts_with('.'))
        .unwrap_or(false)
}
