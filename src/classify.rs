//! Item classification.
//!
//! [`classify`] maps every item to one of four aggregation categories and
//! [`role`] refines that into the rendering role shared by both markup
//! serializers. Both functions are total: they never fail and every item
//! maps to exactly one result.

use crate::model::{DocumentItem, GroupKind, ItemLabel};
use serde::{Deserialize, Serialize};

/// Aggregation category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Tables
    Table,
    /// Pictures and figures
    Picture,
    /// Titles and section headers
    Heading,
    /// Everything else that carries text
    Text,
}

impl Category {
    /// Category name as used in output records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Table => "table",
            Category::Picture => "picture",
            Category::Heading => "heading",
            Category::Text => "text",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an item.
///
/// Rules in priority order: tables, pictures, text-like items with a
/// heading label, other text-like items and list items as text, and
/// finally name/shape heuristics for unrecognized items, defaulting to text.
pub fn classify(item: &DocumentItem) -> Category {
    match item {
        DocumentItem::Table(_) => Category::Table,
        DocumentItem::Picture(_) => Category::Picture,
        DocumentItem::Text(t) | DocumentItem::Heading(t) => {
            if t.label.is_heading() {
                Category::Heading
            } else {
                Category::Text
            }
        }
        DocumentItem::ListItem(_) => Category::Text,
        DocumentItem::Group(_) => Category::Text,
        DocumentItem::Unknown(u) => infer_category(u.type_name.as_deref(), u.label.as_ref()),
    }
}

/// Heuristic category for an item of unrecognized shape.
fn infer_category(type_name: Option<&str>, label: Option<&ItemLabel>) -> Category {
    if let Some(name) = type_name {
        let name = name.to_ascii_lowercase();
        if name.contains("header") || name.contains("title") {
            return Category::Heading;
        }
        if name.contains("text") || name.contains("paragraph") {
            return Category::Text;
        }
        if name.contains("table") {
            return Category::Table;
        }
        if name.contains("picture") || name.contains("image") {
            return Category::Picture;
        }
    }

    match label {
        Some(label) if label.is_heading() => Category::Heading,
        Some(ItemLabel::Table) => Category::Table,
        Some(ItemLabel::Picture) => Category::Picture,
        _ => Category::Text,
    }
}

/// Rendering role of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Document title (top-level heading)
    Title,
    /// Section header with its unclamped rank (`nesting_level + 1`)
    SectionHeader {
        /// Heading rank before clamping to the format's maximum
        rank: u32,
    },
    /// Plain paragraph
    Paragraph,
    /// Preformatted code block
    Code,
    /// Entry of the innermost open list
    ListItem,
    /// Any other text label
    Text,
    /// Table grid
    Table,
    /// Picture reference
    Picture,
    /// Structural group marker
    Group(GroupKind),
}

impl ElementRole {
    /// Heading rank clamped to `1..=max_level`, for heading roles.
    pub fn heading_level(&self, max_level: u8) -> Option<u8> {
        let max_level = max_level.clamp(1, 6);
        match self {
            ElementRole::Title => Some(1),
            ElementRole::SectionHeader { rank } => {
                Some((*rank).clamp(1, u32::from(max_level)) as u8)
            }
            _ => None,
        }
    }
}

/// Determine how an item at the given nesting level is rendered.
pub fn role(item: &DocumentItem, level: u32) -> ElementRole {
    if let DocumentItem::Group(g) = item {
        return ElementRole::Group(g.kind);
    }
    if item.is_list_item() {
        return ElementRole::ListItem;
    }

    match classify(item) {
        Category::Table => ElementRole::Table,
        Category::Picture => ElementRole::Picture,
        Category::Heading => match item.label() {
            Some(ItemLabel::SectionHeader) => ElementRole::SectionHeader {
                rank: level.saturating_add(1),
            },
            Some(ItemLabel::Title) => ElementRole::Title,
            // Headings inferred from an engine type name carry no label
            _ => ElementRole::SectionHeader { rank: level.saturating_add(1) },
        },
        Category::Text => match item.label() {
            Some(ItemLabel::Paragraph) => ElementRole::Paragraph,
            Some(ItemLabel::Code) => ElementRole::Code,
            Some(ItemLabel::ListItem) => ElementRole::ListItem,
            _ => ElementRole::Text,
        },
    }
}
