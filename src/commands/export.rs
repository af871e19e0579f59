//! Export a collection as JSON

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::CollectionLoader;
use crate::Workspace;

/// Write a collection's validated entries as pretty JSON, to a file or
/// to stdout
pub fn run(workspace: &Workspace, collection: &str, output: Option<&Path>) -> Result<()> {
    let entries = CollectionLoader::new(workspace).load(collection)?;
    let json = serde_json::to_string_pretty(&entries)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, json)?;
            println!("Exported {} entries to {:?}", entries.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
