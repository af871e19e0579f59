//! Initialize a new collections workspace

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CollectionsConfig;

/// Write a starter `collections.yml` and create the default collection's
/// base directory
pub fn run(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join(CollectionsConfig::FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("Config already exists: {:?}", config_path);
    }

    let config_content = r#"# Content collection declarations
## Each collection maps a directory of markdown files to a front-matter
## schema. Field types: string, number, boolean; append `?` for optional.

collections:
  guides:
    base: src/content/guides
    pattern: "**/*.md"
    schema:
      title: string
      description: string
      category: string
      order: number
"#;

    fs::write(&config_path, config_content)?;
    fs::create_dir_all(target_dir.join("src/content/guides"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Workspace;

    #[test]
    fn test_init_creates_loadable_workspace() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();

        assert!(dir.path().join("collections.yml").exists());
        assert!(dir.path().join("src/content/guides").is_dir());

        // The starter config matches the built-in default declaration
        let workspace = Workspace::new(dir.path()).unwrap();
        let guides = workspace.config.collection("guides").unwrap();
        assert_eq!(guides.base, "src/content/guides");
        assert_eq!(guides.schema.len(), 4);
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        assert!(run(dir.path()).is_err());
    }
}
