//! Format-aware structure report.

use super::Formatter;
use crate::classify::role;
use crate::model::{Document, PageSize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-page view of the elements a formatter renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    /// Formatter name ("html" or "markdown")
    pub format: String,

    /// Pages in document order
    pub pages: Vec<PageStructure>,

    /// All page elements, page by page
    pub elements: Vec<StructureElement>,
}

impl StructureReport {
    /// Total number of elements across all pages.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// Elements located on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageStructure {
    /// Zero-based page index
    pub page_index: u32,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page dimensions
    pub size: PageSize,

    /// Elements on the page in reading order
    pub elements: Vec<StructureElement>,
}

/// One element, as seen by a formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureElement {
    /// Item label
    #[serde(rename = "type")]
    pub element_type: String,

    /// Nesting level in the reading-order tree
    pub nesting_level: u32,

    /// Bounding box in top-left origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,

    /// Format-specific tag or element kind
    pub tag: String,

    /// Item text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Zero-based page index
    pub page_index: u32,
}

/// Build the structure report of `doc` for a formatter.
///
/// Only items with provenance on a known page are reported. An item
/// whose provenance covers several pages appears once on each.
pub(crate) fn build<F: Formatter + ?Sized>(formatter: &F, doc: &Document) -> StructureReport {
    let mut pages: Vec<PageStructure> = doc
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| PageStructure {
            page_index: index as u32,
            page_number: page.number,
            size: page.size(),
            elements: Vec::new(),
        })
        .collect();
    let slots: HashMap<u32, usize> = doc
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| (page.number, index))
        .collect();

    for (item, level) in doc.iterate_items(false) {
        let tag = formatter.element_tag(&role(item, level));
        let mut seen = Vec::new();

        for prov in item.provenance() {
            if seen.contains(&prov.page_no) {
                continue;
            }
            seen.push(prov.page_no);
            let Some(&slot) = slots.get(&prov.page_no) else {
                continue;
            };

            let height = doc.pages[slot].height;
            pages[slot].elements.push(StructureElement {
                element_type: item.label_str().to_string(),
                nesting_level: level,
                bbox: prov.bbox.map(|b| b.to_top_left_origin(height).as_array()),
                tag: tag.clone(),
                text: item.text().map(str::to_string),
                page_index: prov.page_index(),
            });
        }

        if seen.is_empty() {
            log::trace!("No provenance for {} item, left out of structure", item.label_str());
        }
    }

    let elements = pages.iter().flat_map(|p| p.elements.clone()).collect();
    StructureReport {
        format: formatter.format_name().to_string(),
        pages,
        elements,
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        BoundingBox, Document, DocumentItem, GroupKind, ItemLabel, Page, Provenance, TextItem,
    };
    use crate::render::{Formatter, HtmlFormatter, MarkdownFormatter};

    fn sample() -> Document {
        Document::new()
            .with_page(Page::new(1, 600.0, 800.0))
            .with_page(Page::new(2, 600.0, 800.0))
            .with_item(
                TextItem::new(ItemLabel::Title, "Report")
                    .with_prov(Provenance::new(1, BoundingBox::new(10.0, 790.0, 200.0, 770.0))),
                1,
            )
            .with_item(DocumentItem::group(GroupKind::List), 1)
            .with_item(
                TextItem::new(ItemLabel::Paragraph, "Spans pages")
                    .with_prov(Provenance::page_only(1))
                    .with_prov(Provenance::page_only(2)),
                1,
            )
            .with_item(TextItem::new(ItemLabel::Paragraph, "Nowhere"), 1)
    }

    #[test]
    fn test_structure_per_page() {
        let report = HtmlFormatter::default().get_structure(&sample());
        assert_eq!(report.format, "html");
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[0].elements.len(), 2);
        assert_eq!(report.pages[1].elements.len(), 1);
        assert_eq!(report.element_count(), 3);

        let title = &report.pages[0].elements[0];
        assert_eq!(title.element_type, "title");
        assert_eq!(title.tag, "h1");
        assert_eq!(title.bbox, Some([10.0, 10.0, 200.0, 30.0]));
        assert_eq!(report.pages[1].elements[0].page_index, 1);
    }

    #[test]
    fn test_structure_markdown_tags() {
        let report = MarkdownFormatter::default().get_structure(&sample());
        assert_eq!(report.format, "markdown");
        assert_eq!(report.elements[0].tag, "heading_1");
        assert_eq!(report.elements[1].tag, "paragraph");
        assert!(report.elements[1].bbox.is_none());
    }
}
