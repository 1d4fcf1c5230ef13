//! Integration tests for normalizing engine exports.

use docstruct::model::{CoordOrigin, DocumentItem, GroupKind, ItemLabel};
use docstruct::{aggregate, from_json_str, from_json_value, Category, DocStruct, Error, OutputFormat};
use serde_json::json;

fn engine_export() -> serde_json::Value {
    json!({
        "name": "quarterly.pdf",
        "pages": {
            "2": {"size": {"width": 612.0, "height": 792.0}},
            "1": {"size": {"width": 612.0, "height": 792.0}}
        },
        "items": [
            [{"type": "SectionHeaderItem", "label": "title", "text": "Quarterly report",
              "prov": [{"page_no": 1, "bbox": {"l": 72.0, "t": 720.0, "r": 540.0, "b": 700.0,
                                               "coord_origin": "BOTTOMLEFT"}}]}, 1],
            [{"type": "TextItem", "label": "paragraph", "text": "Numbers went up.",
              "prov": [{"page_no": 1, "bbox": {"l": 72.0, "t": 690.0, "r": 540.0, "b": 650.0}}]}, 1],
            [{"type": "GroupItem", "label": "list"}, 1],
            [{"type": "ListItem", "label": "list_item", "text": "North", "prov": [{"page_no": 1}]}, 2],
            [{"type": "ListItem", "label": "list_item", "text": "South", "prov": [{"page_no": 1}]}, 2],
            [{"type": "TableItem", "label": "table",
              "data": {"table_cells": [
                  {"start_row_offset_idx": 0, "end_row_offset_idx": 1,
                   "start_col_offset_idx": 0, "end_col_offset_idx": 1, "text": "Region"},
                  {"start_row_offset_idx": 0, "end_row_offset_idx": 1,
                   "start_col_offset_idx": 1, "end_col_offset_idx": 2, "text": "Sales"},
                  {"start_row_offset_idx": 1, "end_row_offset_idx": 2,
                   "start_col_offset_idx": 0, "end_col_offset_idx": 1, "text": "North"},
                  {"start_row_offset_idx": 1, "end_row_offset_idx": 2,
                   "start_col_offset_idx": 1, "end_col_offset_idx": 2, "text": "1200"}
              ]},
              "prov": [{"page_no": 2, "bbox": {"l": 72.0, "t": 600.0, "r": 540.0, "b": 400.0}}]}, 1],
            [{"type": "PictureItem", "label": "picture", "image": {"uri": "chart.png"},
              "prov": [{"page_no": 2, "bbox": [72.0, 380.0, 300.0, 200.0]}]}, 1]
        ]
    })
}

// ==================== Normalization ====================

#[test]
fn test_engine_export_normalized() {
    let doc = from_json_value(engine_export()).unwrap();

    assert_eq!(doc.name.as_deref(), Some("quarterly.pdf"));
    let numbers: Vec<u32> = doc.pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(doc.items.len(), 7);

    let (title, level) = doc.iterate_items(false).next().unwrap();
    assert_eq!(level, 1);
    assert!(matches!(title, DocumentItem::Heading(t) if t.label == ItemLabel::Title));

    assert!(matches!(
        &doc.items[2].item,
        DocumentItem::Group(g) if g.kind == GroupKind::List
    ));
}

#[test]
fn test_normalized_document_aggregates() {
    let doc = from_json_value(engine_export()).unwrap();
    let metadata = aggregate(&doc);

    assert_eq!(metadata.page_count, 2);
    assert_eq!(metadata.count(Category::Heading), 1);
    assert_eq!(metadata.count(Category::Text), 3);
    assert_eq!(metadata.count(Category::Table), 1);
    assert_eq!(metadata.count(Category::Picture), 1);

    let table = metadata.tables[0].table.as_ref().unwrap();
    assert_eq!(table.content[1], vec!["North", "1200"]);
    assert_eq!(metadata.images[0].image.map(|i| i.has_image_ref), Some(true));
    assert!(metadata.bounding_boxes.contains_key("picture_2_3"));
}

#[test]
fn test_normalized_document_renders() {
    let doc = from_json_value(engine_export()).unwrap();
    let processed = DocStruct::new()
        .with_format(OutputFormat::Markdown)
        .process(&doc, "quarterly")
        .unwrap();

    let content = &processed.content;
    assert!(content.contains("# Quarterly report"));
    assert!(content.contains("- North <!-- page: 0 -->\n- South <!-- page: 0 -->"));
    assert!(content.contains("| Region | Sales |"));
    assert!(content.contains("![Document image](chart.png)"));
    // 792 - 720 and 792 - 700 in top-left origin
    assert!(content.contains("<!-- bbox: [72, 72, 540, 92], page: 0 -->"));
}

// ==================== Loose shapes ====================

#[test]
fn test_bbox_origin_parsed() {
    let doc = from_json_value(json!({
        "items": [{"type": "text", "text": "x",
                   "prov": {"page": 1, "bbox": {"x0": 1, "y0": 2, "x1": 3, "y1": 4, "origin": "top-left"}}}]
    }))
    .unwrap();

    let prov = doc.items[0].item.first_provenance().copied().unwrap();
    let bbox = prov.bbox.unwrap();
    assert_eq!(bbox.origin, CoordOrigin::TopLeft);
    assert_eq!(bbox.as_array(), [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_scalar_entries_become_placeholders() {
    let mut items: Vec<serde_json::Value> = (0..150).map(|_| json!(null)).collect();
    items.push(json!("stray text"));
    let doc = from_json_value(json!({ "items": items })).unwrap();

    let metadata = aggregate(&doc);
    assert_eq!(metadata.summary.raw_item_count, 151);
    assert_eq!(metadata.summary.skipped_items, 150);
    assert_eq!(metadata.count(Category::Text), 1);
    assert!(metadata.is_degraded());
}

#[test]
fn test_item_without_type_uses_shape() {
    let doc = from_json_value(json!({
        "items": [
            {"cells": [{"row": 0, "col": 0, "text": "v"}]},
            {"image": "a.png"},
            {"text": "plain"}
        ]
    }))
    .unwrap();

    let kinds: Vec<Category> = doc.iterate_items(false).map(|(i, _)| docstruct::classify(i)).collect();
    assert_eq!(kinds, vec![Category::Table, Category::Picture, Category::Text]);
}

// ==================== Out-of-range values ====================

#[test]
fn test_far_away_table_cell_does_not_allocate() {
    let doc = from_json_value(json!({
        "items": [
            {"type": "table", "table_cells": [{"row": 4000000000u64, "col": 4000000000u64, "text": "x"}]},
            {"type": "text", "text": "after"}
        ]
    }))
    .unwrap();

    let metadata = aggregate(&doc);
    assert_eq!(metadata.count(Category::Table), 1);
    assert!(metadata.tables[0].table.as_ref().unwrap().content.is_empty());

    let processed = DocStruct::new()
        .with_format(OutputFormat::Markdown)
        .process(&doc, "far")
        .unwrap();
    assert_eq!(processed.content, "after");
}

#[test]
fn test_overflowing_cell_dropped() {
    let doc = from_json_value(json!({
        "items": [{"type": "table", "table_cells": [
            {"row": u64::MAX, "col": 0, "text": "overflow"},
            {"row": 0, "col": u64::MAX, "text": "overflow"},
            {"row": 0, "col": 0, "text": "kept"}
        ]}]
    }))
    .unwrap();

    let DocumentItem::Table(table) = &doc.items[0].item else {
        panic!("expected a table");
    };
    assert_eq!(table.grid.cells.len(), 1);
    assert_eq!(table.grid.to_matrix(), vec![vec!["kept".to_string()]]);
}

#[test]
fn test_maximum_level_heading() {
    let doc = from_json_value(json!({
        "items": [[{"type": "SectionHeaderItem", "label": "section_header", "text": "Deep"}, u32::MAX]]
    }))
    .unwrap();

    assert_eq!(doc.items[0].level, u32::MAX);
    let processed = DocStruct::new()
        .with_format(OutputFormat::Markdown)
        .process(&doc, "deep")
        .unwrap();
    assert_eq!(processed.content, "###### Deep");
}

// ==================== Errors ====================

#[test]
fn test_invalid_json_rejected() {
    assert!(matches!(from_json_str("{\"items\": ["), Err(Error::Json(_))));
}

#[test]
fn test_non_object_rejected() {
    let err = from_json_value(json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, Error::Normalize(_)));
    assert!(err.to_string().contains("array"));
}

#[test]
fn test_empty_export() {
    let doc = from_json_str("{}").unwrap();
    assert!(doc.is_empty());
    assert_eq!(aggregate(&doc).summary.total_elements, 0);
}
