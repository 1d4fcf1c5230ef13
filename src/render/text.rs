//! Plain text export.

use crate::model::Document;

/// Convert a document to plain text.
///
/// The text of every text-bearing item, one item per line in reading order.
pub fn to_text(doc: &Document) -> String {
    doc.iterate_items(false)
        .filter_map(|(item, _)| item.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
