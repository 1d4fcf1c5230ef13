//! Document-level types.

use super::{DocumentItem, Page};
use serde::{Deserialize, Serialize};

/// A converted document as produced by the external conversion engine.
///
/// The document is read-only input: every pass in this crate derives new
/// output records from it and never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document name, if the engine reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Pages in the document
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Items in reading order (pre-order traversal, groups included)
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_no: u32) -> Option<&Page> {
        if page_no == 0 {
            return None;
        }
        // Pages are normally stored in order, so try the direct slot first.
        match self.pages.get((page_no - 1) as usize) {
            Some(page) if page.number == page_no => Some(page),
            _ => self.pages.iter().find(|p| p.number == page_no),
        }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Append an item at the given nesting level.
    pub fn push(&mut self, item: impl Into<DocumentItem>, level: u32) {
        self.items.push(ItemEntry::new(item.into(), level));
    }

    /// Builder form of [`Document::push`].
    pub fn with_item(mut self, item: impl Into<DocumentItem>, level: u32) -> Self {
        self.push(item, level);
        self
    }

    /// Builder form of [`Document::add_page`].
    pub fn with_page(mut self, page: Page) -> Self {
        self.add_page(page);
        self
    }

    /// Check if the document has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in reading order as `(item, nesting_level)` pairs.
    ///
    /// With `with_groups == false`, structural group markers are left out.
    pub fn iterate_items(&self, with_groups: bool) -> impl Iterator<Item = (&DocumentItem, u32)> {
        self.items
            .iter()
            .filter(move |entry| with_groups || !entry.item.is_group())
            .map(|entry| (&entry.item, entry.level))
    }

    /// Height of the page with the given number, if known.
    pub fn page_height(&self, page_no: u32) -> Option<f32> {
        self.get_page(page_no).map(|p| p.height)
    }
}

/// An item together with its depth in the reading-order tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    /// The item
    pub item: DocumentItem,

    /// Nesting level (0 = document body)
    #[serde(default)]
    pub level: u32,
}

impl ItemEntry {
    /// Create a new entry.
    pub fn new(item: DocumentItem, level: u32) -> Self {
        Self { item, level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupKind, ItemLabel, TextItem};

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_get_page_out_of_order() {
        let doc = Document::new()
            .with_page(Page::letter(2))
            .with_page(Page::a4(1));

        assert_eq!(doc.get_page(1).map(|p| p.height), Some(842.0));
        assert_eq!(doc.get_page(2).map(|p| p.height), Some(792.0));
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_iterate_items_groups() {
        let doc = Document::new()
            .with_item(DocumentItem::group(GroupKind::List), 1)
            .with_item(TextItem::new(ItemLabel::Paragraph, "body"), 1);

        assert_eq!(doc.iterate_items(true).count(), 2);
        assert_eq!(doc.iterate_items(false).count(), 1);
    }
}
