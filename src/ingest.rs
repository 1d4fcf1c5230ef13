//! Normalization of conversion-engine JSON into a [`Document`].
//!
//! Engines export their item trees in loosely shaped JSON: pages as lists or
//! maps, items as objects, `[item, level]` pairs or bare scalars, bounding
//! boxes with `l/t/r/b` or `x0/y0/x1/y1` edges. Everything is converted
//! eagerly here, so the rest of the crate only ever sees the canonical model.
//! Items that cannot be mapped become [`DocumentItem::Unknown`].

use crate::error::{Error, Result};
use crate::model::{
    BoundingBox, CoordOrigin, Document, DocumentItem, GridCell, GroupItem, GroupKind, ImageRef,
    ItemLabel, ListItem, Page, PictureItem, Provenance, TableGrid, TableItem, TextItem,
    UnknownItem,
};
use serde_json::{Map, Value};

/// Parse an engine JSON export.
pub fn from_json_str(json: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    from_json_value(value)
}

/// Normalize an already-parsed engine JSON export.
///
/// Returns [`Error::Normalize`] when the top level is not an object.
/// Anything below the top level is coerced instead of rejected.
pub fn from_json_value(value: Value) -> Result<Document> {
    let root = match value {
        Value::Object(root) => root,
        other => {
            return Err(Error::Normalize(format!(
                "expected an object at the top level, found {}",
                value_kind(&other)
            )))
        }
    };

    let mut doc = Document::new();
    doc.name = get_str(&root, &["name"]).map(str::to_string);

    if let Some(pages) = root.get("pages") {
        doc.pages = normalize_pages(pages);
    }

    match root.get("items") {
        Some(Value::Array(entries)) => {
            for entry in entries {
                let (item, level) = normalize_entry(entry);
                doc.push(item, level);
            }
        }
        Some(other) => log::warn!("Ignoring items of type {}", value_kind(other)),
        None => log::debug!("Engine export has no items"),
    }

    let placeholders = doc.items.iter().filter(|e| e.item.is_placeholder()).count();
    if placeholders > 0 {
        log::debug!("Normalized {} items without structure into placeholders", placeholders);
    }
    log::debug!(
        "Normalized document: {} pages, {} items",
        doc.pages.len(),
        doc.items.len()
    );

    Ok(doc)
}

fn normalize_pages(value: &Value) -> Vec<Page> {
    let mut pages: Vec<Page> = match value {
        Value::Array(list) => list
            .iter()
            .enumerate()
            .filter_map(|(i, v)| normalize_page(v, i as u32 + 1))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, v)| {
                let number = key.trim().parse::<u32>().ok()?;
                normalize_page(v, number)
            })
            .collect(),
        other => {
            log::warn!("Ignoring pages of type {}", value_kind(other));
            Vec::new()
        }
    };
    pages.sort_by_key(|p| p.number);
    pages
}

fn normalize_page(value: &Value, fallback_number: u32) -> Option<Page> {
    match value {
        Value::Number(n) => {
            let number = n.as_u64().and_then(|n| u32::try_from(n).ok())?;
            Some(Page::new(number, 0.0, 0.0))
        }
        Value::Object(obj) => {
            let number = get_u32(obj, &["page_no", "number", "page"]).unwrap_or(fallback_number);
            let size = obj.get("size").and_then(Value::as_object).unwrap_or(obj);
            let width = get_f32(size, &["width"]).unwrap_or(0.0);
            let height = get_f32(size, &["height"]).unwrap_or(0.0);
            Some(Page::new(number, width, height))
        }
        other => {
            log::debug!("Skipping page of type {}", value_kind(other));
            None
        }
    }
}

fn normalize_entry(value: &Value) -> (DocumentItem, u32) {
    match value {
        Value::Object(obj) => match obj.get("item") {
            Some(Value::Object(item)) => (normalize_item(item), get_u32(obj, &["level"]).unwrap_or(0)),
            Some(other) => (normalize_scalar(other), get_u32(obj, &["level"]).unwrap_or(0)),
            None => (normalize_item(obj), get_u32(obj, &["level", "nesting_level"]).unwrap_or(0)),
        },
        Value::Array(pair) => {
            let item = match pair.first() {
                Some(Value::Object(item)) => normalize_item(item),
                Some(other) => normalize_scalar(other),
                None => DocumentItem::placeholder(),
            };
            let level = pair
                .get(1)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            (item, level)
        }
        other => (normalize_scalar(other), 0),
    }
}

/// Scalar items carry no structure; a string is kept as text.
fn normalize_scalar(value: &Value) -> DocumentItem {
    match value {
        Value::String(text) if !text.trim().is_empty() => {
            DocumentItem::Unknown(UnknownItem {
                text: Some(text.clone()),
                ..Default::default()
            })
        }
        _ => DocumentItem::placeholder(),
    }
}

/// Item kinds recognized from an engine type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Heading,
    Table,
    Picture,
    ListItem,
    Group,
}

fn kind_from_type(type_name: &str) -> Option<Kind> {
    let mut name: String = type_name
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect::<String>()
        .to_ascii_lowercase();
    if name != "listitem" && name.len() > 4 && name.ends_with("item") {
        name.truncate(name.len() - 4);
    }

    match name.as_str() {
        "text" | "paragraph" => Some(Kind::Text),
        "heading" | "title" | "sectionheader" => Some(Kind::Heading),
        "table" => Some(Kind::Table),
        "picture" | "image" | "figure" => Some(Kind::Picture),
        "listitem" => Some(Kind::ListItem),
        "group" | "list" | "orderedlist" | "unorderedlist" => Some(Kind::Group),
        _ => None,
    }
}

fn kind_from_label(label: &ItemLabel) -> Kind {
    match label {
        ItemLabel::Table => Kind::Table,
        ItemLabel::Picture => Kind::Picture,
        ItemLabel::ListItem => Kind::ListItem,
        label if label.is_heading() => Kind::Heading,
        ItemLabel::Other(name)
            if matches!(name.to_ascii_lowercase().as_str(), "list" | "ordered_list") =>
        {
            Kind::Group
        }
        _ => Kind::Text,
    }
}

fn kind_from_shape(obj: &Map<String, Value>) -> Option<Kind> {
    if ["table_cells", "data", "grid", "cells"].iter().any(|k| obj.contains_key(*k)) {
        Some(Kind::Table)
    } else if obj.contains_key("image") {
        Some(Kind::Picture)
    } else if obj.get("text").is_some_and(Value::is_string) {
        Some(Kind::Text)
    } else {
        None
    }
}

fn normalize_item(obj: &Map<String, Value>) -> DocumentItem {
    let type_name = get_str(obj, &["type", "kind"]);
    let label = get_str(obj, &["label"]).map(ItemLabel::parse);
    let text = get_str(obj, &["text"]).map(str::to_string);
    let prov = obj
        .get("prov")
        .or_else(|| obj.get("provenance"))
        .map(normalize_provenance)
        .unwrap_or_default();

    let kind = type_name
        .and_then(kind_from_type)
        .or_else(|| label.as_ref().map(kind_from_label))
        .or_else(|| kind_from_shape(obj));

    let Some(kind) = kind else {
        if let Some(name) = type_name {
            log::debug!("Unrecognized item type '{}'", name);
        }
        return DocumentItem::Unknown(UnknownItem {
            type_name: type_name.map(str::to_string),
            label,
            text,
            prov,
        });
    };

    match kind {
        Kind::Text => TextItem {
            label: label.unwrap_or(ItemLabel::Text),
            text: text.unwrap_or_default(),
            prov,
        }
        .into(),
        Kind::Heading => {
            let default_label = match type_name.map(str::to_ascii_lowercase).as_deref() {
                Some(name) if name.starts_with("title") => ItemLabel::Title,
                _ => ItemLabel::SectionHeader,
            };
            DocumentItem::Heading(TextItem {
                label: label.unwrap_or(default_label),
                text: text.unwrap_or_default(),
                prov,
            })
        }
        Kind::Table => DocumentItem::Table(TableItem {
            label: label.unwrap_or(ItemLabel::Table),
            grid: normalize_grid(obj),
            caption: get_str(obj, &["caption"]).map(str::to_string),
            prov,
        }),
        Kind::Picture => DocumentItem::Picture(PictureItem {
            label: label.unwrap_or(ItemLabel::Picture),
            image: normalize_image(obj.get("image")),
            caption: get_str(obj, &["caption"]).map(str::to_string),
            prov,
        }),
        Kind::ListItem => DocumentItem::ListItem(ListItem {
            label: label.unwrap_or(ItemLabel::ListItem),
            text: text.unwrap_or_default(),
            prov,
        }),
        Kind::Group => DocumentItem::Group(GroupItem {
            kind: group_kind(obj, type_name),
            name: get_str(obj, &["name"]).map(str::to_string),
        }),
    }
}

fn group_kind(obj: &Map<String, Value>, type_name: Option<&str>) -> GroupKind {
    let candidates = [get_str(obj, &["group_kind"]), get_str(obj, &["label"]), type_name];
    for candidate in candidates.into_iter().flatten() {
        match candidate.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "ordered_list" | "orderedlist" => return GroupKind::OrderedList,
            "list" | "unordered_list" | "unorderedlist" => return GroupKind::List,
            _ => {}
        }
    }
    GroupKind::Other
}

fn normalize_image(value: Option<&Value>) -> Option<ImageRef> {
    let uri = match value? {
        Value::String(uri) => uri.clone(),
        Value::Object(obj) => get_str(obj, &["uri", "url", "path"])?.to_string(),
        _ => return None,
    };
    Some(ImageRef { uri })
}

fn normalize_grid(obj: &Map<String, Value>) -> TableGrid {
    let cells = obj
        .get("table_cells")
        .or_else(|| obj.get("cells"))
        .or_else(|| nested(obj, "data", "table_cells"))
        .or_else(|| nested(obj, "grid", "cells"))
        .and_then(Value::as_array);

    let Some(cells) = cells else {
        log::debug!("Table without cell data, using an empty grid");
        return TableGrid::new();
    };

    TableGrid::from_cells(
        cells
            .iter()
            .filter_map(Value::as_object)
            .filter_map(normalize_cell)
            .collect(),
    )
}

fn normalize_cell(obj: &Map<String, Value>) -> Option<GridCell> {
    let row_start = get_usize(obj, &["start_row_offset_idx", "row_start", "row"])?;
    let col_start = get_usize(obj, &["start_col_offset_idx", "col_start", "col"])?;
    let (Some(row_end), Some(col_end)) = (
        cell_end(obj, row_start, &["end_row_offset_idx", "row_end"], &["row_span", "rowspan"]),
        cell_end(obj, col_start, &["end_col_offset_idx", "col_end"], &["col_span", "colspan"]),
    ) else {
        log::debug!("Dropping table cell at ({}, {}) with out-of-range span", row_start, col_start);
        return None;
    };

    Some(GridCell {
        row_start,
        row_end,
        col_start,
        col_end,
        text: get_str(obj, &["text"]).unwrap_or_default().to_string(),
    })
}

/// End-exclusive edge of a cell, covering at least one slot.
fn cell_end(
    obj: &Map<String, Value>,
    start: usize,
    end_keys: &[&str],
    span_keys: &[&str],
) -> Option<usize> {
    let min_end = start.checked_add(1)?;
    let end = match get_usize(obj, end_keys) {
        Some(end) => end,
        None => start.checked_add(get_usize(obj, span_keys).unwrap_or(1))?,
    };
    Some(end.max(min_end))
}

fn normalize_provenance(value: &Value) -> Vec<Provenance> {
    let entries = match value {
        Value::Array(list) => list.as_slice(),
        single => std::slice::from_ref(single),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let prov = match entry {
                Value::Number(n) => Provenance::page_only(u32::try_from(n.as_u64()?).ok()?),
                Value::Object(obj) => Provenance {
                    page_no: get_u32(obj, &["page_no", "page"])?,
                    bbox: obj.get("bbox").and_then(normalize_bbox),
                },
                _ => return None,
            };
            // Page numbers are 1-indexed
            (prov.page_no > 0).then_some(prov)
        })
        .collect()
}

fn normalize_bbox(value: &Value) -> Option<BoundingBox> {
    match value {
        Value::Array(edges) if edges.len() == 4 => {
            let edges: Vec<f32> = edges.iter().filter_map(|v| v.as_f64()).map(|v| v as f32).collect();
            (edges.len() == 4).then(|| BoundingBox::new(edges[0], edges[1], edges[2], edges[3]))
        }
        Value::Object(obj) => {
            let mut bbox = BoundingBox::new(
                get_f32(obj, &["l", "x0"])?,
                get_f32(obj, &["t", "y0"])?,
                get_f32(obj, &["r", "x1"])?,
                get_f32(obj, &["b", "y1"])?,
            );
            if let Some(origin) = get_str(obj, &["coord_origin", "origin"]) {
                let origin = origin.to_ascii_uppercase().replace(['_', '-'], "");
                if origin == "TOPLEFT" {
                    bbox.origin = CoordOrigin::TopLeft;
                }
            }
            Some(bbox)
        }
        _ => None,
    }
}

fn nested<'a>(obj: &'a Map<String, Value>, outer: &str, inner: &str) -> Option<&'a Value> {
    obj.get(outer)?.as_object()?.get(inner)
}

fn get_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_str))
}

fn get_usize(obj: &Map<String, Value>, keys: &[&str]) -> Option<usize> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_u64))
        .and_then(|n| usize::try_from(n).ok())
}

fn get_u32(obj: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_u64))
        .and_then(|n| u32::try_from(n).ok())
}

fn get_f32(obj: &Map<String, Value>, keys: &[&str]) -> Option<f32> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_f64))
        .map(|v| v as f32)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
