//! Coarse document information from item labels.

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Label-based element counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    /// Number of pages
    pub pages: usize,
    /// Items labeled as text or paragraphs
    pub text_items: usize,
    /// Items labeled as tables
    pub tables: usize,
    /// Items labeled as pictures or images
    pub images: usize,
    /// Items labeled as list entries
    pub lists: usize,
    /// Items labeled as sections or headers
    pub sections: usize,
}

/// Coarse summary of what a document contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub element_counts: ElementCounts,
    pub has_text: bool,
    pub has_tables: bool,
    pub has_images: bool,
    pub has_lists: bool,
    pub has_sections: bool,
}

/// Count items by the first matching label substring.
///
/// Matching order: text/paragraph, table, picture/image, list,
/// section/header. Items without a label are not counted.
pub fn document_info(doc: &Document) -> DocumentInfo {
    let mut counts = ElementCounts {
        pages: doc.pages.len(),
        ..Default::default()
    };

    for (item, _) in doc.iterate_items(false) {
        let Some(label) = item.label() else {
            continue;
        };
        let label = label.as_str().to_ascii_lowercase();
        if label.contains("text") || label.contains("paragraph") {
            counts.text_items += 1;
        } else if label.contains("table") {
            counts.tables += 1;
        } else if label.contains("picture") || label.contains("image") {
            counts.images += 1;
        } else if label.contains("list") {
            counts.lists += 1;
        } else if label.contains("section") || label.contains("header") {
            counts.sections += 1;
        }
    }

    DocumentInfo {
        element_counts: counts,
        has_text: counts.text_items > 0,
        has_tables: counts.tables > 0,
        has_images: counts.images > 0,
        has_lists: counts.lists > 0,
        has_sections: counts.sections > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemLabel, ListItem, Page, PictureItem, TableGrid, TableItem, TextItem};

    #[test]
    fn test_document_info() {
        let doc = Document::new()
            .with_page(Page::letter(1))
            .with_item(TextItem::new(ItemLabel::SectionHeader, "Intro"), 1)
            .with_item(TextItem::new(ItemLabel::Paragraph, "Body"), 1)
            .with_item(TextItem::new(ItemLabel::PageHeader, "Running head"), 1)
            .with_item(ListItem::new("entry"), 2)
            .with_item(TableItem::new(TableGrid::new()), 1)
            .with_item(PictureItem::new(), 1);

        let info = document_info(&doc);
        assert_eq!(info.element_counts.pages, 1);
        assert_eq!(info.element_counts.text_items, 1);
        assert_eq!(info.element_counts.sections, 2);
        assert_eq!(info.element_counts.lists, 1);
        assert!(info.has_tables && info.has_images);
    }

    #[test]
    fn test_document_info_empty() {
        let info = document_info(&Document::new());
        assert!(!info.has_text);
        assert_eq!(info.element_counts, ElementCounts::default());
    }
}
