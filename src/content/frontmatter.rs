//! Front-matter parsing
//!
//! Splits a markdown source into its front-matter mapping and body.
//! YAML between `---` fences is the primary format; TOML between `+++`
//! fences and a leading JSON object (or `;;;` fences) are also accepted.
//! All formats are normalized to YAML values so the schema validator
//! works against a single value model.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Why a file's front-matter could not be parsed
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("no front-matter block found")]
    Missing,

    #[error("front-matter block is not terminated")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse front-matter from a content string.
/// Returns (front_matter, remaining_content).
pub fn parse(content: &str) -> Result<(Mapping, &str), FrontMatterError> {
    let content = content.trim_start();

    if content.starts_with("---") {
        return parse_yaml(content);
    }

    if content.starts_with("+++") {
        return parse_toml(content);
    }

    if content.starts_with(";;;") || content.starts_with('{') {
        return parse_json(content);
    }

    Err(FrontMatterError::Missing)
}

fn parse_yaml(content: &str) -> Result<(Mapping, &str), FrontMatterError> {
    let rest = &content[3..]; // Skip opening ---

    let end_pos = rest.find("\n---").ok_or(FrontMatterError::Unterminated)?;
    let yaml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..]; // Skip \n---
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    if yaml_content.trim().is_empty() {
        return Ok((Mapping::new(), remaining));
    }

    let fm: Mapping = serde_yaml::from_str(yaml_content)?;
    Ok((fm, remaining))
}

fn parse_toml(content: &str) -> Result<(Mapping, &str), FrontMatterError> {
    let rest = &content[3..]; // Skip opening +++

    let end_pos = rest.find("\n+++").ok_or(FrontMatterError::Unterminated)?;
    let toml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    let table: toml::Table = toml::from_str(toml_content)?;
    Ok((to_mapping(serde_yaml::to_value(&table)?), remaining))
}

fn parse_json(content: &str) -> Result<(Mapping, &str), FrontMatterError> {
    // JSON front-matter fenced with ;;;
    if let Some(rest) = content.strip_prefix(";;;") {
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
        let json_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 3..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json_content)?;
        return Ok((to_mapping(serde_yaml::to_value(&object)?), remaining));
    }

    // A bare JSON object at the start; find the matching closing brace
    let mut depth = 0;
    let mut end_pos = 0;
    for (i, c) in content.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end_pos = i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    if end_pos == 0 {
        return Err(FrontMatterError::Unterminated);
    }

    let json_content = &content[..end_pos];
    let remaining = &content[end_pos..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json_content)?;
    Ok((to_mapping(serde_yaml::to_value(&object)?), remaining))
}

fn to_mapping(value: Value) -> Mapping {
    match value {
        Value::Mapping(mapping) => mapping,
        _ => Mapping::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Getting Started
description: First steps with the tool
category: basics
order: 1
---

This is the body.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm.get("title").unwrap().as_str(), Some("Getting Started"));
        assert_eq!(fm.get("order").unwrap().as_i64(), Some(1));
        assert!(remaining.contains("This is the body."));
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "Getting Started"
order = 2
+++

Body text.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm.get("title").unwrap().as_str(), Some("Getting Started"));
        assert_eq!(fm.get("order").unwrap().as_i64(), Some(2));
        assert!(remaining.contains("Body text."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Getting Started", "order": 3}

Body text.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm.get("title").unwrap().as_str(), Some("Getting Started"));
        assert_eq!(fm.get("order").unwrap().as_i64(), Some(3));
        assert!(remaining.contains("Body text."));
    }

    #[test]
    fn test_quoted_number_stays_a_string() {
        let content = "---\norder: \"1\"\n---\n";
        let (fm, _) = parse(content).unwrap();
        assert!(fm.get("order").unwrap().is_string());
    }

    #[test]
    fn test_missing_frontmatter() {
        let content = "Just some markdown with no metadata.\n";
        assert!(matches!(parse(content), Err(FrontMatterError::Missing)));
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = "---\ntitle: Broken\n";
        assert!(matches!(
            parse(content),
            Err(FrontMatterError::Unterminated)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let content = "---\ntitle: [unclosed\n---\n";
        assert!(matches!(parse(content), Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn test_empty_fence_is_an_empty_mapping() {
        let content = "---\n---\nBody.\n";
        let (fm, remaining) = parse(content).unwrap();
        assert!(fm.is_empty());
        assert!(remaining.contains("Body."));
    }
}
