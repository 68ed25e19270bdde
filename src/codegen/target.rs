//! Render targets

use std::fmt;

use serde::{Deserialize, Serialize};

use super::python::PythonNamedTuple;
use super::ruby::RubyData;
use super::RecordSyntax;

/// Supported target languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Ruby `Data.define`
    #[default]
    Ruby,
    /// Python `collections.namedtuple`
    Python,
}

impl Target {
    /// Record syntax for this target
    pub fn syntax(&self) -> &'static dyn RecordSyntax {
        match self {
            Target::Ruby => &RubyData,
            Target::Python => &PythonNamedTuple,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Ruby => write!(f, "ruby"),
            Target::Python => write!(f, "python"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{emit, CompiledDeclaration};

    #[test]
    fn test_default_is_ruby() {
        assert_eq!(Target::default(), Target::Ruby);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Target::Python).unwrap(), "\"python\"");
        let parsed: Target = serde_json::from_str("\"ruby\"").unwrap();
        assert_eq!(parsed, Target::Ruby);
    }

    #[test]
    fn test_python_preamble_is_its_own_block() {
        let decls = vec![CompiledDeclaration {
            name: "Foo".to_string(),
            comment_lines: vec!["A foo.".to_string()],
            fields: vec!["a".to_string()],
        }];
        assert_eq!(
            emit(&decls, Target::Python.syntax()),
            "from collections import namedtuple\n\n# A foo.\nFoo = namedtuple(\"Foo\", [\"a\"])\n"
        );
    }
}
