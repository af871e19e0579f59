//! Front-matter schemas: field types, declarations, and validation

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;
use thiserror::Error;

/// The type a front-matter field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    /// The tag used in collection declarations and error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }

    /// Check whether a front-matter value carries this type.
    ///
    /// `number` accepts both integers and floats; a quoted number is a
    /// string and does not match.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => matches!(value, Value::Number(_)),
            FieldType::Boolean => matches!(value, Value::Bool(_)),
        }
    }
}

/// A single field declaration: its type plus whether it must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub ty: FieldType,
    pub required: bool,
}

impl FieldSpec {
    /// A required field of the given type
    pub fn required(ty: FieldType) -> Self {
        Self { ty, required: true }
    }

    /// An optional field of the given type
    pub fn optional(ty: FieldType) -> Self {
        Self {
            ty,
            required: false,
        }
    }

    /// Parse a compact tag such as `string`, `number` or `boolean?`.
    /// A trailing `?` marks the field optional.
    fn parse(tag: &str) -> Option<Self> {
        let (tag, required) = match tag.strip_suffix('?') {
            Some(bare) => (bare, false),
            None => (tag, true),
        };

        let ty = match tag {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "boolean" | "bool" => FieldType::Boolean,
            _ => return None,
        };

        Some(Self { ty, required })
    }

    /// The compact tag form of this spec
    pub fn tag(&self) -> String {
        if self.required {
            self.ty.name().to_string()
        } else {
            format!("{}?", self.ty.name())
        }
    }
}

impl Serialize for FieldSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TagVisitor;

        impl<'de> de::Visitor<'de> for TagVisitor {
            type Value = FieldSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a field type tag such as `string`, `number` or `boolean?`")
            }

            fn visit_str<E>(self, value: &str) -> Result<FieldSpec, E>
            where
                E: de::Error,
            {
                FieldSpec::parse(value)
                    .ok_or_else(|| E::custom(format!("unknown field type `{}`", value)))
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}

/// A schema violation found while validating one file's front-matter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}`: expected {expected}, found {actual}")]
    WrongType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// An ordered set of field declarations for one collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    /// Add a field declaration, replacing any previous one with the same name
    pub fn insert(&mut self, name: &str, spec: FieldSpec) {
        self.fields.insert(name.to_string(), spec);
    }

    /// Look up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Iterate declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldSpec)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate front-matter against this schema.
    ///
    /// Returns every violation, not just the first. Fields not declared in
    /// the schema are ignored here; an explicit null counts as absent.
    pub fn validate(&self, data: &Mapping) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (name, spec) in &self.fields {
            let value = data.get(name.as_str()).filter(|v| !v.is_null());
            match value {
                None => {
                    if spec.required {
                        violations.push(Violation::MissingField(name.clone()));
                    }
                }
                Some(value) => {
                    if !spec.ty.matches(value) {
                        violations.push(Violation::WrongType {
                            field: name.clone(),
                            expected: spec.ty.name(),
                            actual: value_type_name(value),
                        });
                    }
                }
            }
        }

        violations
    }
}

/// Type name of a front-matter value, for error messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guides_schema() -> Schema {
        let mut schema = Schema::default();
        schema.insert("title", FieldSpec::required(FieldType::String));
        schema.insert("description", FieldSpec::required(FieldType::String));
        schema.insert("category", FieldSpec::required(FieldType::String));
        schema.insert("order", FieldSpec::required(FieldType::Number));
        schema
    }

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_front_matter() {
        let data = mapping(
            r#"
title: Getting Started
description: First steps
category: basics
order: 1
"#,
        );
        assert!(guides_schema().validate(&data).is_empty());
    }

    #[test]
    fn test_missing_field() {
        let data = mapping(
            r#"
title: Getting Started
description: First steps
order: 1
"#,
        );
        let violations = guides_schema().validate(&data);
        assert_eq!(
            violations,
            vec![Violation::MissingField("category".to_string())]
        );
    }

    #[test]
    fn test_quoted_number_is_a_string() {
        let data = mapping(
            r#"
title: Getting Started
description: First steps
category: basics
order: "1"
"#,
        );
        let violations = guides_schema().validate(&data);
        assert_eq!(
            violations,
            vec![Violation::WrongType {
                field: "order".to_string(),
                expected: "number",
                actual: "string",
            }]
        );
    }

    #[test]
    fn test_float_order_is_a_number() {
        let data = mapping(
            r#"
title: Getting Started
description: First steps
category: basics
order: 1.5
"#,
        );
        assert!(guides_schema().validate(&data).is_empty());
    }

    #[test]
    fn test_multiple_violations_collected() {
        let data = mapping("order: nope");
        let violations = guides_schema().validate(&data);
        assert_eq!(violations.len(), 4);
        assert!(violations.contains(&Violation::MissingField("title".to_string())));
        assert!(violations.contains(&Violation::WrongType {
            field: "order".to_string(),
            expected: "number",
            actual: "string",
        }));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let data = mapping(
            r#"
title: Getting Started
description: First steps
category: basics
order: 1
draft: true
"#,
        );
        assert!(guides_schema().validate(&data).is_empty());
    }

    #[test]
    fn test_null_counts_as_absent() {
        let data = mapping(
            r#"
title: Getting Started
description:
category: basics
order: 1
"#,
        );
        let violations = guides_schema().validate(&data);
        assert_eq!(
            violations,
            vec![Violation::MissingField("description".to_string())]
        );
    }

    #[test]
    fn test_optional_field() {
        let mut schema = guides_schema();
        schema.insert("draft", FieldSpec::optional(FieldType::Boolean));

        let data = mapping(
            r#"
title: Getting Started
description: First steps
category: basics
order: 1
"#,
        );
        assert!(schema.validate(&data).is_empty());

        let data = mapping(
            r#"
title: Getting Started
description: First steps
category: basics
order: 1
draft: yes please
"#,
        );
        assert_eq!(
            schema.validate(&data),
            vec![Violation::WrongType {
                field: "draft".to_string(),
                expected: "boolean",
                actual: "string",
            }]
        );
    }

    #[test]
    fn test_parse_schema_tags() {
        let schema: Schema = serde_yaml::from_str(
            r#"
title: string
order: number
draft: boolean?
"#,
        )
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(
            schema.field("title"),
            Some(&FieldSpec::required(FieldType::String))
        );
        assert_eq!(
            schema.field("draft"),
            Some(&FieldSpec::optional(FieldType::Boolean))
        );
    }

    #[test]
    fn test_parse_unknown_tag_fails() {
        let result: Result<Schema, _> = serde_yaml::from_str("title: text");
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&guides_schema()).unwrap();
        let parsed: Schema = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.field("order"),
            Some(&FieldSpec::required(FieldType::Number))
        );
    }
}
