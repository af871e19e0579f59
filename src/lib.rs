//! mdcollect: schema-validated markdown content collections
//!
//! This crate loads named content collections from the file system: each
//! collection maps a directory of markdown files (selected by a glob
//! pattern) to a typed front-matter schema, and only files that satisfy
//! the schema become entries of the collection.

pub mod commands;
pub mod config;
pub mod content;
pub mod schema;

pub use config::{CollectionConfig, CollectionsConfig};
pub use content::{CollectionLoader, Entry, LoadError};
pub use schema::{FieldSpec, FieldType, Schema};

use anyhow::Result;
use std::path::Path;

/// A content workspace: a base directory plus its collection declarations
#[derive(Clone)]
pub struct Workspace {
    /// Collection declarations
    pub config: CollectionsConfig,
    /// Base directory that collection paths are resolved against
    pub base_dir: std::path::PathBuf,
}

impl Workspace {
    /// Open a workspace rooted at the given directory.
    ///
    /// Reads `collections.yml` when present; otherwise the default
    /// declarations apply.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CollectionsConfig::FILE_NAME);

        let config = if config_path.exists() {
            CollectionsConfig::load(&config_path)?
        } else {
            CollectionsConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Load and validate a single collection
    pub fn load_collection(&self, name: &str) -> std::result::Result<Vec<Entry>, LoadError> {
        CollectionLoader::new(self).load(name)
    }

    /// Validate every declared collection
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }

    /// Scaffold a new entry in a collection
    pub fn new_entry(&self, collection: &str, title: &str) -> Result<()> {
        commands::new::run(self, collection, title)
    }
}
