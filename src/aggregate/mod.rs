//! Structure aggregation.
//!
//! [`aggregate`] walks the item stream once and builds a
//! [`StructuralMetadata`] record: per-category counts, typed element lists,
//! a flat bounding-box map and per-page buckets. Streams made almost
//! entirely of placeholders fall back to estimating structure from a
//! plain-text rendering instead of failing.

mod fallback;
mod info;
mod options;

pub use info::{document_info, DocumentInfo, ElementCounts};
pub use options::AggregateOptions;

use crate::classify::{classify, Category};
use crate::model::{BoundingBox, Document, DocumentItem, PageSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized structural metadata of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralMetadata {
    /// Number of pages
    pub page_count: u32,

    /// Element count per category
    pub elements_by_type: BTreeMap<Category, usize>,

    /// Table elements
    pub tables: Vec<ElementDescriptor>,

    /// Picture elements
    pub images: Vec<ElementDescriptor>,

    /// Heading elements
    pub headings: Vec<ElementDescriptor>,

    /// Text elements
    pub text_blocks: Vec<ElementDescriptor>,

    /// Bounding boxes keyed by `"{type}_{page}_{index}"`
    pub bounding_boxes: BTreeMap<String, BoundingBox>,

    /// Pages sorted by number with their elements
    pub document_structure: Vec<PageBucket>,

    /// Totals
    pub summary: Summary,

    /// Set when the degraded-mode fallback was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_note: Option<String>,
}

impl StructuralMetadata {
    /// Check if the degraded-mode fallback was used.
    pub fn is_degraded(&self) -> bool {
        self.mode_note.is_some()
    }

    /// Element count for one category.
    pub fn count(&self, category: Category) -> usize {
        self.elements_by_type.get(&category).copied().unwrap_or(0)
    }
}

/// One classified element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Category
    #[serde(rename = "type")]
    pub element_type: Category,

    /// Item label
    pub label: String,

    /// Item text, or the caption of a table or picture
    pub text: String,

    /// Page from the first provenance entry
    pub page: Option<u32>,

    /// Bounding box from the first provenance entry, in source origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// Table dimensions and content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableMetadata>,

    /// Picture details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageMetadata>,
}

/// Table details of a table element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Row count
    pub rows: usize,
    /// Column count
    pub columns: usize,
    /// Cell text by row then column; uncovered positions are empty
    pub content: Vec<Vec<String>>,
}

/// Picture details of a picture element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Whether the engine extracted an image
    pub has_image_ref: bool,
}

/// Elements located on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBucket {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page dimensions, when the page is listed in the document
    pub page_size: Option<PageSize>,

    /// All elements on the page
    pub elements: Vec<ElementDescriptor>,

    /// Table elements on the page
    pub tables: Vec<ElementDescriptor>,

    /// Picture elements on the page
    pub images: Vec<ElementDescriptor>,

    /// Heading elements on the page
    pub headings: Vec<ElementDescriptor>,

    /// Text elements on the page
    pub text_blocks: Vec<ElementDescriptor>,
}

impl PageBucket {
    fn new(page_number: u32, page_size: Option<PageSize>) -> Self {
        Self {
            page_number,
            page_size,
            elements: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
            headings: Vec::new(),
            text_blocks: Vec::new(),
        }
    }

    fn push(&mut self, descriptor: &ElementDescriptor) {
        self.elements.push(descriptor.clone());
        typed_list(
            descriptor.element_type,
            &mut self.tables,
            &mut self.images,
            &mut self.headings,
            &mut self.text_blocks,
        )
        .push(descriptor.clone());
    }
}

/// Totals of an aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of classified elements
    pub total_elements: usize,
    pub table_count: usize,
    pub image_count: usize,
    pub heading_count: usize,
    pub text_block_count: usize,

    /// Items seen in the stream (groups excluded)
    pub raw_item_count: usize,

    /// Placeholders skipped without classification
    pub skipped_items: usize,

    /// Degraded-mode estimates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_text_blocks: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_headings: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_tables: Option<usize>,
}

/// Aggregate a document with default options.
pub fn aggregate(doc: &Document) -> StructuralMetadata {
    aggregate_with_options(doc, &AggregateOptions::default())
}

/// Aggregate a document.
pub fn aggregate_with_options(doc: &Document, options: &AggregateOptions) -> StructuralMetadata {
    let mut metadata = StructuralMetadata {
        page_count: doc.page_count(),
        ..Default::default()
    };

    let mut buckets: BTreeMap<u32, PageBucket> = doc
        .pages
        .iter()
        .map(|p| (p.number, PageBucket::new(p.number, Some(p.size()))))
        .collect();

    for (item, _) in doc.iterate_items(false) {
        metadata.summary.raw_item_count += 1;
        if item.is_placeholder() {
            metadata.summary.skipped_items += 1;
            continue;
        }

        let descriptor = describe(item);

        if let (Some(bbox), Some(page)) = (descriptor.bbox, descriptor.page) {
            let id = format!(
                "{}_{}_{}",
                descriptor.element_type,
                page,
                metadata.bounding_boxes.len()
            );
            metadata.bounding_boxes.insert(id, bbox);
        }

        *metadata
            .elements_by_type
            .entry(descriptor.element_type)
            .or_insert(0) += 1;

        if let Some(page) = descriptor.page {
            buckets
                .entry(page)
                .or_insert_with(|| {
                    log::debug!("Item on page {} not listed in the document", page);
                    PageBucket::new(page, None)
                })
                .push(&descriptor);
        }

        typed_list(
            descriptor.element_type,
            &mut metadata.tables,
            &mut metadata.images,
            &mut metadata.headings,
            &mut metadata.text_blocks,
        )
        .push(descriptor);
    }

    metadata.document_structure = buckets.into_values().collect();

    let summary = &mut metadata.summary;
    summary.total_elements = metadata.elements_by_type.values().sum();
    summary.table_count = metadata.tables.len();
    summary.image_count = metadata.images.len();
    summary.heading_count = metadata.headings.len();
    summary.text_block_count = metadata.text_blocks.len();

    if options.is_degraded(summary.total_elements, summary.raw_item_count) {
        apply_fallback(doc, &mut metadata);
    }

    log::debug!(
        "Aggregated {} elements from {} raw items",
        metadata.summary.total_elements,
        metadata.summary.raw_item_count
    );
    metadata
}

fn apply_fallback(doc: &Document, metadata: &mut StructuralMetadata) {
    let raw = metadata.summary.raw_item_count;
    log::warn!(
        "Degraded item stream: {} elements from {} raw items, estimating from text",
        metadata.summary.total_elements,
        raw
    );

    match fallback::estimate(doc) {
        Some(estimate) => {
            metadata.summary.estimated_text_blocks = Some(estimate.text_blocks);
            metadata.summary.estimated_headings = Some(estimate.headings);
            metadata.summary.estimated_tables = Some(estimate.tables);
            metadata.mode_note = Some(format!(
                "Degraded mode detected - {} raw items, using text fallback",
                raw
            ));
        }
        None => {
            metadata.mode_note = Some(format!(
                "Degraded mode detected - {} raw items, no usable structure",
                raw
            ));
        }
    }
}

fn describe(item: &DocumentItem) -> ElementDescriptor {
    let element_type = classify(item);
    let prov = item.first_provenance();

    let table = match (element_type, item) {
        (Category::Table, DocumentItem::Table(t)) => Some(TableMetadata {
            rows: t.grid.row_count(),
            columns: t.grid.column_count(),
            content: t.grid.to_matrix(),
        }),
        (Category::Table, _) => Some(TableMetadata {
            rows: 0,
            columns: 0,
            content: Vec::new(),
        }),
        _ => None,
    };

    let image = (element_type == Category::Picture).then(|| ImageMetadata {
        has_image_ref: matches!(item, DocumentItem::Picture(p) if p.has_image_reference()),
    });

    ElementDescriptor {
        element_type,
        label: item.label_str().to_string(),
        text: item.text().or_else(|| item.caption()).unwrap_or_default().to_string(),
        page: prov.map(|p| p.page_no),
        bbox: prov.and_then(|p| p.bbox),
        table,
        image,
    }
}

fn typed_list<'a>(
    category: Category,
    tables: &'a mut Vec<ElementDescriptor>,
    images: &'a mut Vec<ElementDescriptor>,
    headings: &'a mut Vec<ElementDescriptor>,
    text_blocks: &'a mut Vec<ElementDescriptor>,
) -> &'a mut Vec<ElementDescriptor> {
    match category {
        Category::Table => tables,
        Category::Picture => images,
        Category::Heading => headings,
        Category::Text => text_blocks,
    }
}
