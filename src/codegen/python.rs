//! Python Code Emitter
//!
//! Renders records as `collections.namedtuple` types. namedtuple only takes
//! identifiers that are not keywords and do not start with an underscore, so
//! field names are mapped onto that set before rendering.

use super::RecordSyntax;

/// Python `namedtuple` records
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonNamedTuple;

impl PythonNamedTuple {
    /// Escape a keyword if needed
    fn escape_keyword(name: &str) -> String {
        if PYTHON_KEYWORDS.contains(&name) {
            format!("{}_", name)
        } else {
            name.to_string()
        }
    }

    /// Map a field name to a namedtuple-safe identifier.
    ///
    /// Non-identifier characters become `_`, leading underscores are dropped,
    /// a leading digit gets a `field_` prefix and keywords are escaped.
    pub fn identifier(name: &str) -> String {
        let replaced: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let trimmed = replaced.trim_start_matches('_');

        let ident = match trimmed.chars().next() {
            None => "field".to_string(),
            Some(c) if c.is_ascii_digit() => format!("field_{}", trimmed),
            Some(_) => trimmed.to_string(),
        };
        Self::escape_keyword(&ident)
    }
}

impl RecordSyntax for PythonNamedTuple {
    fn preamble(&self) -> Option<&'static str> {
        Some("from collections import namedtuple")
    }

    fn field_name(&self, field: &str) -> String {
        Self::identifier(field)
    }

    fn comment(&self, text: &str) -> String {
        if text.is_empty() {
            "#".to_string()
        } else {
            format!("# {}", text)
        }
    }

    fn declaration(&self, name: &str, fields: &[String]) -> String {
        let quoted: Vec<String> = fields
            .iter()
            .map(|f| string_literal(f))
            .collect();
        format!(
            "{} = namedtuple({}, [{}])",
            name,
            string_literal(name),
            quoted.join(", ")
        )
    }
}

fn string_literal(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];
