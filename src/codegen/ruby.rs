//! Ruby Code Emitter
//!
//! Renders records as `Data.define` value objects:
//!
//! ```text
//! # Base class of requests, responses, and events.
//! ProtocolMessage = Data.define(:seq, :type)
//! ```

use super::RecordSyntax;

/// Ruby `Data.define` records
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyData;

impl RecordSyntax for RubyData {
    fn comment(&self, text: &str) -> String {
        if text.is_empty() {
            "#".to_string()
        } else {
            format!("# {}", text)
        }
    }

    fn declaration(&self, name: &str, fields: &[String]) -> String {
        if fields.is_empty() {
            return format!("{} = Data.define", name);
        }
        let symbols: Vec<String> = fields.iter().map(|f| symbol(f)).collect();
        format!("{} = Data.define({})", name, symbols.join(", "))
    }
}

/// Ruby symbol literal, quoted when the name is not a plain identifier
fn symbol(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase() || c == '_')
        .unwrap_or(false)
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        format!(":{}", name)
    } else {
        format!(":\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
