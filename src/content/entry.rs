//! Validated collection entries

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use std::path::PathBuf;

/// A single validated entry of a collection.
///
/// Identity is the source file's path: `id` is the path relative to the
/// collection's base directory with the markdown extension stripped.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Entry id derived from the file path (`/`-separated, no extension)
    pub id: String,

    /// URL-friendly name derived from the last path segment
    pub slug: String,

    /// Name of the owning collection
    pub collection: String,

    /// Source file path relative to the workspace root
    pub source: String,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,

    /// Validated front-matter values, declared fields first
    pub data: IndexMap<String, Value>,

    /// Markdown body after the front-matter, unrendered
    pub body: String,
}

impl Entry {
    /// Create an entry with empty data and body
    pub fn new(collection: &str, id: String, source: String, full_source: PathBuf) -> Self {
        let slug = slug::slugify(id.rsplit('/').next().unwrap_or(id.as_str()));
        Self {
            id,
            slug,
            collection: collection.to_string(),
            source,
            full_source,
            data: IndexMap::new(),
            body: String::new(),
        }
    }

    /// A string field's value, if present and a string
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(|v| v.as_str())
    }

    /// A number field's value, if present and a number
    pub fn num_field(&self, name: &str) -> Option<f64> {
        self.data.get(name).and_then(|v| v.as_f64())
    }

    /// A boolean field's value, if present and a boolean
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.data.get(name).and_then(|v| v.as_bool())
    }
}

/// Sort entries for deterministic output: by the numeric `order` field
/// when the collection declares one, then by id; otherwise by id alone.
pub(crate) fn sort_entries(entries: &mut [Entry], by_order: bool) {
    use std::cmp::Ordering;

    if by_order {
        entries.sort_by(|a, b| match (a.num_field("order"), b.num_field("order")) {
            (Some(x), Some(y)) => x
                .partial_cmp(&y)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
    } else {
        entries.sort_by(|a, b| a.id.cmp(&b.id));
    }
}
