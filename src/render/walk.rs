//! Reading-order traversal shared by the markup serializers.

use super::list::{ListBlock, ListEntry, ListStack};
use super::RenderOptions;
use crate::classify::{role, ElementRole};
use crate::model::{BoundingBox, Document, DocumentItem, PictureItem, TableGrid, TableItem};

/// Positional metadata attached to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Positional {
    /// Zero-based page index
    pub(crate) page_index: u32,
    /// Box in top-left origin, when the item has one
    pub(crate) bbox: Option<BoundingBox>,
}

/// Positional metadata for an item from its provenance.
///
/// The first provenance entry with a bounding box wins, falling back to the
/// first entry for the page alone. Boxes on pages missing from the document
/// are kept in their source origin.
pub(crate) fn positional(doc: &Document, item: &DocumentItem) -> Option<Positional> {
    let provenance = item.provenance();
    let prov = provenance
        .iter()
        .find(|p| p.bbox.is_some())
        .or_else(|| provenance.first())?;

    let bbox = prov.bbox.map(|bbox| match doc.page_height(prov.page_no) {
        Some(height) => bbox.to_top_left_origin(height),
        None => bbox,
    });

    Some(Positional {
        page_index: prov.page_index(),
        bbox,
    })
}

/// Markup syntax for each rendered element kind.
///
/// Every method returns one complete element; an empty string means the
/// element produced no output.
pub(crate) trait ElementWriter {
    fn heading(&self, text: &str, level: u8, title: bool, pos: Option<&Positional>) -> String;
    fn paragraph(&self, text: &str, pos: Option<&Positional>) -> String;
    fn code(&self, text: &str, pos: Option<&Positional>) -> String;
    fn text(&self, text: &str, pos: Option<&Positional>) -> String;
    fn table(&self, table: &TableItem, pos: Option<&Positional>) -> String;
    fn picture(&self, picture: &PictureItem, pos: Option<&Positional>) -> String;
    fn list(&self, list: &ListBlock) -> String;
}

/// Walk the document in reading order and collect rendered elements.
pub(crate) fn render_parts<W: ElementWriter>(
    doc: &Document,
    options: &RenderOptions,
    writer: &W,
) -> Vec<String> {
    let mut parts = Vec::new();
    let mut lists = ListStack::new();

    for (item, level) in doc.iterate_items(true) {
        let item_role = role(item, level);
        let pos = if options.include_provenance {
            positional(doc, item)
        } else {
            None
        };

        match item_role {
            ElementRole::Group(kind) if kind.is_list() => {
                for block in lists.open(kind, level) {
                    parts.push(writer.list(&block));
                }
                continue;
            }
            ElementRole::ListItem => {
                let entry = ListEntry::new(item.text().unwrap_or_default(), pos);
                lists.push_entry(entry, level);
                continue;
            }
            _ => {}
        }

        if let Some(block) = lists.close_all() {
            parts.push(writer.list(&block));
        }

        let pos = pos.as_ref();
        let part = match (item_role, item) {
            (ElementRole::Title | ElementRole::SectionHeader { .. }, _) => {
                let level = item_role
                    .heading_level(options.max_heading_level)
                    .unwrap_or(1);
                non_empty(item.text())
                    .map(|text| writer.heading(text, level, item_role == ElementRole::Title, pos))
            }
            (ElementRole::Paragraph, _) => non_empty(item.text()).map(|t| writer.paragraph(t, pos)),
            (ElementRole::Code, _) => non_empty(item.text()).map(|t| writer.code(t, pos)),
            (ElementRole::Text, _) if options.exports(item.label()) => {
                non_empty(item.text()).map(|t| writer.text(t, pos))
            }
            (ElementRole::Table, DocumentItem::Table(table)) => Some(writer.table(table, pos)),
            // Items classified as tables without a grid render as an empty table
            (ElementRole::Table, _) => Some(writer.table(&TableItem::new(TableGrid::new()), pos)),
            (ElementRole::Picture, DocumentItem::Picture(picture)) if !options.strict_text => {
                Some(writer.picture(picture, pos))
            }
            _ => None,
        };

        if let Some(part) = part {
            parts.push(part);
        }
    }

    if let Some(block) = lists.close_all() {
        parts.push(writer.list(&block));
    }

    parts.retain(|p| !p.is_empty());
    parts
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Provenance, TextItem};
    use crate::model::ItemLabel;

    #[test]
    fn test_positional_converts_bbox() {
        let doc = Document::new().with_page(Page::letter(1));
        let item: DocumentItem = TextItem::new(ItemLabel::Paragraph, "x")
            .with_prov(Provenance::new(1, BoundingBox::new(10.0, 700.0, 100.0, 650.0)))
            .into();

        let pos = positional(&doc, &item).unwrap();
        assert_eq!(pos.page_index, 0);
        assert_eq!(pos.bbox.unwrap().as_array(), [10.0, 92.0, 100.0, 142.0]);
    }

    #[test]
    fn test_positional_missing_page_keeps_source_box() {
        let doc = Document::new();
        let item: DocumentItem = TextItem::new(ItemLabel::Paragraph, "x")
            .with_prov(Provenance::new(3, BoundingBox::new(1.0, 2.0, 3.0, 4.0)))
            .into();

        let pos = positional(&doc, &item).unwrap();
        assert_eq!(pos.page_index, 2);
        assert_eq!(pos.bbox.unwrap().as_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_positional_prefers_entry_with_box() {
        let doc = Document::new().with_page(Page::new(2, 100.0, 100.0));
        let item: DocumentItem = TextItem::new(ItemLabel::Paragraph, "x")
            .with_prov(Provenance::page_only(1))
            .with_prov(Provenance::new(2, BoundingBox::new(0.0, 90.0, 10.0, 80.0)))
            .into();

        let pos = positional(&doc, &item).unwrap();
        assert_eq!(pos.page_index, 1);
        assert!(positional(&doc, &DocumentItem::placeholder()).is_none());
    }
}
