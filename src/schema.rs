//! Schema model
//!
//! Typed, order-preserving view of the parts of a JSON Schema document that
//! record generation reads: definition names, descriptions, property names and
//! `allOf` composition. Every other keyword is dropped on load.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{json_kind, GenerateError, MalformedSchema, Result};

/// Root keys holding named definitions, in lookup order
const DEFINITION_KEYS: [&str; 2] = ["definitions", "$defs"];

/// Local pointer prefixes that name a definition
const REF_PREFIXES: [&str; 2] = ["#/definitions/", "#/$defs/"];

// =============================================================================
// SchemaDocument
// =============================================================================

/// Loaded schema document: definitions keyed by name, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    definitions: IndexMap<String, SchemaDefinition>,
}

impl SchemaDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content)?;
        Self::from_value(&root)
    }

    /// Read and parse a document from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build a document from an already parsed JSON value.
    ///
    /// `definitions` wins over `$defs` when both are present. A root without
    /// either yields an empty document. A definition that cannot be read fails
    /// the whole load with its name attached.
    pub fn from_value(root: &Value) -> Result<Self> {
        let Some(defs) = DEFINITION_KEYS.iter().find_map(|key| root.get(key)) else {
            return Ok(Self::default());
        };

        let defs = defs.as_object().ok_or_else(|| {
            GenerateError::InvalidDocument(format!(
                "definitions must be an object, found {}",
                json_kind(defs)
            ))
        })?;

        let mut definitions = IndexMap::with_capacity(defs.len());
        for (name, value) in defs {
            let definition = SchemaDefinition::from_value(value).map_err(|source| {
                GenerateError::Definition {
                    name: name.clone(),
                    source,
                }
            })?;
            definitions.insert(name.clone(), definition);
        }

        Ok(Self { definitions })
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&SchemaDefinition> {
        self.definitions.get(name)
    }

    /// Definitions in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaDefinition)> {
        self.definitions.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

// =============================================================================
// SchemaDefinition
// =============================================================================

/// A definition, or an inline `allOf` fragment shaped like one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDefinition {
    /// Free text, possibly multi-line
    pub description: Option<String>,

    /// Raw property names in document order (`None` when the key is absent)
    pub properties: Option<Vec<String>>,

    /// `allOf` members in document order (`None` when the key is absent)
    pub composed_of: Option<Vec<CompositionMember>>,
}

impl SchemaDefinition {
    /// Read a definition from its JSON value
    pub fn from_value(value: &Value) -> std::result::Result<Self, MalformedSchema> {
        Self::parse(value, "")
    }

    fn parse(value: &Value, path: &str) -> std::result::Result<Self, MalformedSchema> {
        let object = expect_object(value, path)?;

        let description = match object.get("description") {
            None => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                return Err(MalformedSchema::unexpected(
                    &format!("{path}/description"),
                    "a string",
                    other,
                ))
            }
        };

        let properties = match object.get("properties") {
            None => None,
            Some(props) => {
                let props = expect_object(props, &format!("{path}/properties"))?;
                Some(props.keys().cloned().collect())
            }
        };

        let composed_of = match object.get("allOf") {
            None => None,
            Some(Value::Array(members)) => Some(
                members
                    .iter()
                    .enumerate()
                    .map(|(i, member)| CompositionMember::parse(member, &format!("{path}/allOf/{i}")))
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            ),
            Some(other) => {
                return Err(MalformedSchema::unexpected(
                    &format!("{path}/allOf"),
                    "an array",
                    other,
                ))
            }
        };

        Ok(Self {
            description,
            properties,
            composed_of,
        })
    }

    /// Whether this definition becomes a record at all.
    ///
    /// An empty `properties` object still counts; only the absence of both
    /// `properties` and `allOf` makes a definition ineligible.
    pub fn is_record_bearing(&self) -> bool {
        self.properties.is_some() || self.composed_of.is_some()
    }

    /// Own property names, empty when absent
    pub fn property_names(&self) -> &[String] {
        self.properties.as_deref().unwrap_or(&[])
    }

    /// `allOf` members, empty when absent
    pub fn members(&self) -> &[CompositionMember] {
        self.composed_of.as_deref().unwrap_or(&[])
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> std::result::Result<&'a Map<String, Value>, MalformedSchema> {
    value
        .as_object()
        .ok_or_else(|| MalformedSchema::unexpected(path, "an object", value))
}

// =============================================================================
// Composition members
// =============================================================================

/// One entry of an `allOf` list
#[derive(Debug, Clone, PartialEq)]
pub enum CompositionMember {
    /// `{"$ref": "..."}`; sibling keywords are ignored
    Reference(SchemaRef),
    /// Nested sub-schema, resolved recursively
    Inline(SchemaDefinition),
}

impl CompositionMember {
    fn parse(value: &Value, path: &str) -> std::result::Result<Self, MalformedSchema> {
        let object = expect_object(value, path)?;
        match object.get("$ref") {
            Some(Value::String(pointer)) => Ok(CompositionMember::Reference(SchemaRef::new(pointer.clone()))),
            Some(other) => Err(MalformedSchema::unexpected(&format!("{path}/$ref"), "a string", other)),
            None => SchemaDefinition::parse(value, path).map(CompositionMember::Inline),
        }
    }
}

/// A `$ref` pointer as written in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRef(String);

impl SchemaRef {
    pub fn new(pointer: impl Into<String>) -> Self {
        Self(pointer.into())
    }

    /// The pointer text
    pub fn pointer(&self) -> &str {
        &self.0
    }

    /// Definition name this pointer targets, if it points at a local definition.
    ///
    /// `#/definitions/Foo` and `#/$defs/Foo` resolve to `Foo`; deeper pointers
    /// and external documents resolve to nothing.
    pub fn definition_name(&self) -> Option<String> {
        let rest = REF_PREFIXES
            .iter()
            .find_map(|prefix| self.0.strip_prefix(prefix))?;
        if rest.is_empty() || rest.contains('/') {
            return None;
        }
        Some(rest.replace("~1", "/").replace("~0", "~"))
    }
}
