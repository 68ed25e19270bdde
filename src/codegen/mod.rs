//! Code Generation
//!
//! Compiles schema definitions into record declarations.
//!
//! Architecture:
//! - resolve: flattens `allOf` composition into an ordered field set
//! - names: converts raw property names to snake_case
//! - CompiledDeclaration: language-agnostic result for one definition
//! - RecordSyntax: per-language rendering (ruby, python)
//!
//! The key constraint: emitters NEVER read the schema model, only
//! CompiledDeclarations. Swapping the target never touches resolution.

pub mod names;
pub mod python;
pub mod resolve;
pub mod ruby;
pub mod target;

use indexmap::IndexSet;
use tracing::{info, trace};

use crate::checksum::Checksum;
use crate::error::Result;
use crate::schema::{SchemaDefinition, SchemaDocument};

pub use names::to_snake_case;
pub use resolve::{effective_description, resolve_fields, ResolvedFields};
pub use target::Target;

// =============================================================================
// Record Syntax
// =============================================================================

/// Target-language rendering of comments and record declarations
pub trait RecordSyntax {
    /// Block emitted once before the first declaration (imports and the like)
    fn preamble(&self) -> Option<&'static str> {
        None
    }

    /// Map a snake_case field name to an identifier the target accepts
    fn field_name(&self, field: &str) -> String {
        field.to_string()
    }

    /// Render one comment line; `text` has no trailing whitespace
    fn comment(&self, text: &str) -> String;

    /// Render a record declaration with the given fields, in order
    fn declaration(&self, name: &str, fields: &[String]) -> String;
}

// =============================================================================
// CompiledDeclaration
// =============================================================================

/// One definition, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDeclaration {
    /// Definition name, used verbatim as the record name
    pub name: String,

    /// Description lines, trailing whitespace stripped, inner blank lines kept
    pub comment_lines: Vec<String>,

    /// snake_case field identifiers in resolved order
    pub fields: Vec<String>,
}

impl CompiledDeclaration {
    /// Comment lines followed directly by the declaration line
    pub fn render(&self, syntax: &dyn RecordSyntax) -> String {
        let mut lines: Vec<String> = self
            .comment_lines
            .iter()
            .map(|line| syntax.comment(line).trim_end().to_string())
            .collect();

        // Target escaping can merge distinct fields; keep the first.
        let fields: IndexSet<String> = self.fields.iter().map(|f| syntax.field_name(f)).collect();
        let fields: Vec<String> = fields.into_iter().collect();

        lines.push(syntax.declaration(&self.name, &fields));
        lines.join("\n")
    }
}

/// Compile one definition.
///
/// Returns None when the definition has neither `properties` nor `allOf`.
pub fn compile_definition(
    name: &str,
    definition: &SchemaDefinition,
    document: &SchemaDocument,
) -> Option<CompiledDeclaration> {
    if !definition.is_record_bearing() {
        trace!(definition = name, "no properties or allOf, skipping");
        return None;
    }

    let resolved = resolve_fields(Some(name), definition, document);

    // Two raw names may collapse to one identifier; keep the first.
    let fields: IndexSet<String> = resolved.iter().map(to_snake_case).collect();

    let mut comment_lines: Vec<String> = effective_description(definition)
        .map(|text| text.lines().map(|line| line.trim_end().to_string()).collect())
        .unwrap_or_default();
    while comment_lines.last().is_some_and(|line| line.is_empty()) {
        comment_lines.pop();
    }

    Some(CompiledDeclaration {
        name: name.to_string(),
        comment_lines,
        fields: fields.into_iter().collect(),
    })
}

/// Compile every eligible definition, in document order
pub fn compile_document(document: &SchemaDocument) -> Vec<CompiledDeclaration> {
    document
        .iter()
        .filter_map(|(name, definition)| compile_definition(name, definition, document))
        .collect()
}

// =============================================================================
// Emitter
// =============================================================================

/// Join declarations into the final text.
///
/// Blocks are separated by exactly one blank line and the text ends with a
/// single newline. No declarations means empty output, preamble included.
pub fn emit(declarations: &[CompiledDeclaration], syntax: &dyn RecordSyntax) -> String {
    if declarations.is_empty() {
        return String::new();
    }

    let mut blocks: Vec<String> = Vec::with_capacity(declarations.len() + 1);
    if let Some(preamble) = syntax.preamble() {
        blocks.push(preamble.trim_end().to_string());
    }
    blocks.extend(declarations.iter().map(|decl| decl.render(syntax)));

    let mut output = blocks.join("\n\n");
    output.push('\n');
    output
}

// =============================================================================
// Generated Output
// =============================================================================

/// Output from code generation
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Generated code as a string
    pub code: String,
    /// Number of records emitted
    pub record_count: usize,
    /// Definitions left out because they carry no record shape
    pub skipped: Vec<String>,
    /// SHA-256 of `code`
    pub checksum: Checksum,
}

// =============================================================================
// Public API
// =============================================================================

/// Generate records for a loaded document
pub fn generate(document: &SchemaDocument, target: Target) -> GeneratedOutput {
    let declarations = compile_document(document);
    let code = emit(&declarations, target.syntax());

    let skipped: Vec<String> = document
        .iter()
        .filter(|(_, def)| !def.is_record_bearing())
        .map(|(name, _)| name.to_string())
        .collect();

    let checksum = Checksum::of(&code);
    info!(
        %target,
        records = declarations.len(),
        skipped = skipped.len(),
        %checksum,
        "generated records"
    );

    GeneratedOutput {
        code,
        record_count: declarations.len(),
        skipped,
        checksum,
    }
}

/// Parse JSON Schema text and generate records
pub fn generate_from_str(content: &str, target: Target) -> Result<GeneratedOutput> {
    let document = SchemaDocument::from_json_str(content)?;
    Ok(generate(&document, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(definitions: serde_json::Value) -> SchemaDocument {
        SchemaDocument::from_value(&json!({ "definitions": definitions })).unwrap()
    }

    fn ruby(definitions: serde_json::Value) -> String {
        generate(&document(definitions), Target::Ruby).code
    }

    #[test]
    fn test_combined_fields_in_order() {
        let code = ruby(json!({
            "Base": { "type": "object", "properties": { "BaseProperty": { "type": "string" } } },
            "Combined": {
                "allOf": [
                    { "$ref": "#/definitions/Base" },
                    { "type": "object", "properties": { "OwnProperty": { "type": "integer" } } }
                ]
            }
        }));
        assert!(code.contains("Combined = Data.define(:base_property, :own_property)\n"));
    }

    #[test]
    fn test_snake_case_fields() {
        let code = ruby(json!({
            "Example": {
                "type": "object",
                "properties": {
                    "JSONValue": { "type": "string" },
                    "HTTPRequest": { "type": "string" }
                }
            }
        }));
        assert_eq!(code, "Example = Data.define(:json_value, :http_request)\n");
    }

    #[test]
    fn test_casing_collision_keeps_first() {
        let code = ruby(json!({
            "Base": { "properties": { "requestSeq": {} } },
            "Derived": {
                "allOf": [ { "$ref": "#/definitions/Base" } ],
                "properties": { "request_seq": {}, "extra": {} }
            }
        }));
        assert!(code.contains("Derived = Data.define(:request_seq, :extra)"));
    }

    #[test]
    fn test_zero_field_declarations_are_separated_by_one_blank_line() {
        let code = ruby(json!({
            "Foo": { "properties": {} },
            "Bar": { "properties": {} }
        }));
        assert_eq!(code, "Foo = Data.define\n\nBar = Data.define\n");
    }

    #[test]
    fn test_skip_rule() {
        let doc = document(json!({
            "Kind": { "type": "string", "enum": ["a", "b"] },
            "Empty": { "properties": {} },
            "Composed": { "allOf": [] }
        }));
        let output = generate(&doc, Target::Ruby);
        assert_eq!(output.code, "Empty = Data.define\n\nComposed = Data.define\n");
        assert_eq!(output.record_count, 2);
        assert_eq!(output.skipped, vec!["Kind".to_string()]);
    }

    #[test]
    fn test_two_line_description() {
        let code = ruby(json!({
            "Described": {
                "description": "First line.   \nSecond line.",
                "properties": { "a": {} }
            }
        }));
        assert_eq!(code, "# First line.\n# Second line.\nDescribed = Data.define(:a)\n");
    }

    #[test]
    fn test_blank_description_lines_are_kept() {
        let code = ruby(json!({
            "Paragraphs": {
                "description": "One.\n\nTwo.\n  Indented.",
                "properties": {}
            }
        }));
        assert_eq!(code, "# One.\n#\n# Two.\n#   Indented.\nParagraphs = Data.define\n");
    }

    #[test]
    fn test_description_from_inline_fragment() {
        let code = ruby(json!({
            "Request": { "properties": { "command": {} } },
            "CancelRequest": {
                "allOf": [
                    { "$ref": "#/definitions/Request" },
                    { "description": "The cancel request.", "properties": { "arguments": {} } }
                ]
            }
        }));
        assert!(code.ends_with("# The cancel request.\nCancelRequest = Data.define(:command, :arguments)\n"));
    }

    #[test]
    fn test_order_is_document_order() {
        let code = ruby(json!({
            "C": { "properties": {} },
            "A": { "properties": {} },
            "B": { "properties": {} }
        }));
        assert_eq!(code, "C = Data.define\n\nA = Data.define\n\nB = Data.define\n");
    }

    #[test]
    fn test_empty_document_is_empty_output() {
        let output = generate(&SchemaDocument::default(), Target::Python);
        assert_eq!(output.code, "");
        assert_eq!(output.record_count, 0);
    }

    #[test]
    fn test_deterministic() {
        let defs = json!({
            "Base": { "properties": { "a": {}, "b": {} } },
            "Derived": { "allOf": [ { "$ref": "#/definitions/Base" }, { "properties": { "c": {} } } ] }
        });
        let first = generate(&document(defs.clone()), Target::Ruby);
        let second = generate(&document(defs), Target::Ruby);
        assert_eq!(first.code, second.code);
        assert_eq!(first.checksum, second.checksum);
    }

    #[test]
    fn test_generate_from_str_attributes_errors() {
        let err = generate_from_str(
            r#"{"definitions": {"Good": {"properties": {}}, "BadDefinition": {"allOf": {}}}}"#,
            Target::Ruby,
        )
        .unwrap_err();
        assert!(err.to_string().contains("BadDefinition"));
    }

    #[test]
    fn test_render_keeps_comment_adjacent() {
        let decl = CompiledDeclaration {
            name: "Thing".to_string(),
            comment_lines: vec!["About the thing.".to_string(), String::new()],
            fields: vec!["a".to_string()],
        };
        assert_eq!(decl.render(&ruby::RubyData), "# About the thing.\n#\nThing = Data.define(:a)");
    }

    #[test]
    fn test_trailing_blank_description_lines_are_dropped() {
        let code = ruby(json!({
            "Foo": { "description": "a  \n\nb\n\n", "properties": {} }
        }));
        assert_eq!(code, "# a\n#\n# b\nFoo = Data.define\n");
    }

    #[test]
    fn test_python_fields_are_valid_and_unique() {
        let doc = document(json!({
            "LaunchRequestArguments": { "properties": { "noDebug": {}, "__restart": {} } },
            "Range": { "properties": { "from": {}, "from_": {}, "to": {} } }
        }));
        let code = generate(&doc, Target::Python).code;
        assert!(code.contains(
            r#"LaunchRequestArguments = namedtuple("LaunchRequestArguments", ["no_debug", "restart"])"#
        ));
        assert!(code.contains(r#"Range = namedtuple("Range", ["from_", "to"])"#));
    }

    #[test]
    fn test_ruby_keeps_leading_underscores() {
        let code = ruby(json!({
            "LaunchRequestArguments": { "properties": { "noDebug": {}, "__restart": {} } }
        }));
        assert_eq!(code, "LaunchRequestArguments = Data.define(:no_debug, :__restart)\n");
    }
}
