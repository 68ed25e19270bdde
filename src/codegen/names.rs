//! Identifier casing
//!
//! Converts schema property names (camelCase, PascalCase, acronym runs) into
//! lower snake_case field identifiers. The conversion looks at the raw name
//! only, never at sibling properties or the owning definition.

use std::sync::LazyLock;

use regex::Regex;

/// Acronym run followed by a Titlecase word: `HTTPRequest` -> `HTTP_Request`
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym boundary pattern"));

/// Lowercase or digit followed by uppercase: `camelCase` -> `camel_Case`
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("word boundary pattern"));

/// Convert a property name to snake_case.
///
/// Idempotent on names that are already snake_case.
pub fn to_snake_case(name: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acronym_prefix() {
        assert_eq!(to_snake_case("JSONValue"), "json_value");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_snake_case("camelCaseProp"), "camel_case_prop");
        assert_eq!(to_snake_case("camelCaseProperty"), "camel_case_property");
        assert_eq!(to_snake_case("BaseProperty"), "base_property");
    }

    #[test]
    fn test_already_snake_is_unchanged() {
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("seq"), "seq");
        assert_eq!(to_snake_case("__restart"), "__restart");
    }

    #[test]
    fn test_idempotent() {
        for name in ["JSONValue", "requestSeq", "supportsANSIStyling", "x2Offset"] {
            let once = to_snake_case(name);
            assert_eq!(to_snake_case(&once), once);
        }
    }

    #[test]
    fn test_digits_and_trailing_acronyms() {
        assert_eq!(to_snake_case("x2Offset"), "x2_offset");
        assert_eq!(to_snake_case("requestID"), "request_id");
        assert_eq!(to_snake_case("supportsANSIStyling"), "supports_ansi_styling");
        assert_eq!(to_snake_case("URL"), "url");
    }
}
