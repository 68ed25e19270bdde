//! Drift Detection
//!
//! Compares freshly generated records against a previously written file so
//! CI can fail when the checked-in output is stale.

use similar::{ChangeTag, TextDiff};

use crate::checksum::Checksum;

/// Result of comparing stored output with regenerated output
#[derive(Debug, Clone)]
pub struct DriftReport {
    pub stored_checksum: Checksum,
    pub generated_checksum: Checksum,
    /// Changed lines, `-` for stored-only and `+` for generated-only
    pub changes: Vec<String>,
}

impl DriftReport {
    /// Compare stored text against generated text
    pub fn compare(stored: &str, generated: &str) -> Self {
        let stored_checksum = Checksum::of(stored);
        let generated_checksum = Checksum::of(generated);

        let mut changes = Vec::new();
        if stored_checksum != generated_checksum {
            let diff = TextDiff::from_lines(stored, generated);
            for change in diff.iter_all_changes() {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => continue,
                };
                changes.push(format!("{}{}", sign, change.value().trim_end_matches('\n')));
            }
        }

        Self {
            stored_checksum,
            generated_checksum,
            changes,
        }
    }

    pub fn in_sync(&self) -> bool {
        self.stored_checksum == self.generated_checksum
    }
}
