//! List collections and their entries

use anyhow::Result;

use crate::content::{CollectionLoader, LoadError};
use crate::Workspace;

/// List all collections, or the entries of one collection
pub fn run(workspace: &Workspace, collection: Option<&str>) -> Result<()> {
    let loader = CollectionLoader::new(workspace);

    match collection {
        Some(name) => {
            let entries = loader.load(name)?;
            println!("{} ({}):", name, entries.len());
            for entry in entries {
                let title = entry.str_field("title").unwrap_or(&entry.slug);
                let mut line = format!("  {} - {}", entry.id, title);
                if let Some(category) = entry.str_field("category") {
                    line.push_str(&format!(" [{}]", category));
                }
                println!("{}", line);
            }
        }
        None => {
            println!("Collections ({}):", workspace.config.collections.len());
            for name in workspace.config.collections.keys() {
                match loader.load(name) {
                    Ok(entries) => println!("  {} ({} entries)", name, entries.len()),
                    Err(LoadError::Invalid(report)) => {
                        println!("  {} ({} invalid entries)", name, report.failures.len())
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}
