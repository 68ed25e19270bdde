//! Schema Records
//!
//! Compiles the definitions of a JSON Schema document into immutable
//! value-record declarations, one record per definition.
//!
//! ## Features
//!
//! - **Composition**: `allOf` references and inline fragments are flattened,
//!   inherited fields first, first occurrence wins
//! - **Naming**: property names become snake_case (`JSONValue` -> `json_value`)
//! - **Deterministic Output**: document order, one blank line between records,
//!   a single trailing newline
//! - **Targets**: Ruby `Data.define` (default) and Python `namedtuple`
//!
//! ## Example
//!
//! ```
//! use schema_records::{generate_from_str, Target};
//!
//! let schema = r##"{
//!     "definitions": {
//!         "Base": { "properties": { "BaseProperty": { "type": "string" } } },
//!         "Combined": {
//!             "allOf": [
//!                 { "$ref": "#/definitions/Base" },
//!                 { "properties": { "OwnProperty": { "type": "integer" } } }
//!             ]
//!         }
//!     }
//! }"##;
//!
//! let output = generate_from_str(schema, Target::Ruby).unwrap();
//! assert_eq!(
//!     output.code,
//!     "Base = Data.define(:base_property)\n\nCombined = Data.define(:base_property, :own_property)\n"
//! );
//! ```

pub mod checksum;
pub mod codegen;
pub mod config;
pub mod drift;
pub mod error;
pub mod schema;

pub use checksum::Checksum;
pub use codegen::{
    compile_definition, compile_document, emit, generate, generate_from_str, CompiledDeclaration,
    GeneratedOutput, RecordSyntax, ResolvedFields, Target,
};
pub use config::RecordsConfig;
pub use drift::DriftReport;
pub use error::{GenerateError, MalformedSchema, Result};
pub use schema::{CompositionMember, SchemaDefinition, SchemaDocument, SchemaRef};
