//! Composition Resolution
//!
//! Flattens a definition's `allOf` members and own `properties` into one
//! ordered set of raw property names.
//!
//! Walk order is depth-first, left-to-right: every composition member is
//! expanded before the definition's own properties, and the first occurrence
//! of a name wins. Inherited fields therefore come first, specializations
//! append, and conflicts resolve to the base.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::schema::{CompositionMember, SchemaDefinition, SchemaDocument};

/// Ordered, de-duplicated raw property names for one definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields(IndexSet<String>);

impl ResolvedFields {
    /// Names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Insert unless already present; an existing entry keeps its position
    fn merge(&mut self, name: &str) {
        if !self.0.contains(name) {
            self.0.insert(name.to_string());
        }
    }
}

/// Resolve the full field set of `definition` against `document`.
///
/// `name` is the definition's own name when it is a top-level definition; it
/// seeds the chain of names being expanded so a self reference is not
/// re-entered.
pub fn resolve_fields(name: Option<&str>, definition: &SchemaDefinition, document: &SchemaDocument) -> ResolvedFields {
    let mut fields = ResolvedFields::default();
    let mut chain: Vec<String> = name.map(|n| vec![n.to_string()]).unwrap_or_default();
    collect(definition, document, &mut chain, &mut fields);
    fields
}

fn collect(
    definition: &SchemaDefinition,
    document: &SchemaDocument,
    chain: &mut Vec<String>,
    fields: &mut ResolvedFields,
) {
    for member in definition.members() {
        match member {
            CompositionMember::Reference(schema_ref) => {
                let Some(target) = schema_ref.definition_name() else {
                    debug!(pointer = schema_ref.pointer(), "ignoring non-local reference");
                    continue;
                };
                let Some(referenced) = document.get(&target) else {
                    debug!(pointer = schema_ref.pointer(), "ignoring reference to unknown definition");
                    continue;
                };
                if chain.contains(&target) {
                    warn!(definition = %target, "reference cycle, not expanding again");
                    continue;
                }
                chain.push(target);
                collect(referenced, document, chain, fields);
                chain.pop();
            }
            CompositionMember::Inline(fragment) => collect(fragment, document, chain, fields),
        }
    }

    for property in definition.property_names() {
        fields.merge(property);
    }
}

/// Description of a definition, falling back to its inline `allOf` fragments.
///
/// Referenced definitions never lend their description.
pub fn effective_description(definition: &SchemaDefinition) -> Option<&str> {
    if let Some(description) = definition.description.as_deref() {
        return Some(description);
    }
    definition.members().iter().find_map(|member| match member {
        CompositionMember::Inline(fragment) => effective_description(fragment),
        CompositionMember::Reference(_) => None,
    })
}
