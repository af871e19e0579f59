//! Create a new collection entry

use anyhow::Result;
use std::fs;

use crate::schema::FieldType;
use crate::Workspace;

/// Scaffold a markdown file in a collection's base directory with every
/// schema field stubbed in the front-matter
pub fn run(workspace: &Workspace, collection: &str, title: &str) -> Result<()> {
    let config = workspace
        .config
        .collection(collection)
        .ok_or_else(|| anyhow::anyhow!("Unknown collection: {}", collection))?;

    let target_dir = workspace.base_dir.join(&config.base);
    fs::create_dir_all(&target_dir)?;

    let slug = slug::slugify(title);
    let file_path = target_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = String::from("---\n");
    for (name, spec) in config.schema.iter() {
        let value = if name == "title" && spec.ty == FieldType::String {
            format!("\"{}\"", title.replace('"', "\\\""))
        } else {
            match spec.ty {
                FieldType::String => "''".to_string(),
                FieldType::Number => "0".to_string(),
                FieldType::Boolean => "false".to_string(),
            }
        };
        content.push_str(&format!("{}: {}\n", name, value));
    }
    content.push_str("---\n");

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
