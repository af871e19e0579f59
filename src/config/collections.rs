//! Collection declarations (collections.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::schema::{FieldSpec, FieldType, Schema};

/// All collection declarations for a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    /// Collections by name, in declaration order
    pub collections: IndexMap<String, CollectionConfig>,
}

/// One collection: where its files live and what their front-matter
/// must look like
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Directory holding the collection's files, relative to the
    /// workspace root
    pub base: String,

    /// Glob pattern selecting files under `base`
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Required front-matter fields and their types
    #[serde(default)]
    pub schema: Schema,
}

fn default_pattern() -> String {
    "**/*.md".to_string()
}

impl Default for CollectionsConfig {
    /// The built-in declaration: a `guides` collection of markdown files
    /// under `src/content/guides` with four required fields.
    fn default() -> Self {
        let mut schema = Schema::default();
        schema.insert("title", FieldSpec::required(FieldType::String));
        schema.insert("description", FieldSpec::required(FieldType::String));
        schema.insert("category", FieldSpec::required(FieldType::String));
        schema.insert("order", FieldSpec::required(FieldType::Number));

        let mut collections = IndexMap::new();
        collections.insert(
            "guides".to_string(),
            CollectionConfig {
                base: "src/content/guides".to_string(),
                pattern: default_pattern(),
                schema,
            },
        );

        Self { collections }
    }
}

impl CollectionsConfig {
    /// Name of the declaration file at the workspace root
    pub const FILE_NAME: &'static str = "collections.yml";

    /// Load declarations from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: CollectionsConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.get(name)
    }
}
