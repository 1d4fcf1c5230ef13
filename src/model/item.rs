//! Document item types.

use super::{Provenance, TableGrid};
use serde::{Deserialize, Serialize};

/// Semantic role of an item as labeled by the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemLabel {
    Title,
    SectionHeader,
    Paragraph,
    Text,
    ListItem,
    Code,
    Caption,
    Footnote,
    Formula,
    PageHeader,
    PageFooter,
    Table,
    Picture,
    DocumentIndex,
    CheckboxSelected,
    CheckboxUnselected,
    /// Any label outside the known vocabulary
    Other(String),
}

impl ItemLabel {
    /// Canonical label string (snake_case).
    pub fn as_str(&self) -> &str {
        match self {
            ItemLabel::Title => "title",
            ItemLabel::SectionHeader => "section_header",
            ItemLabel::Paragraph => "paragraph",
            ItemLabel::Text => "text",
            ItemLabel::ListItem => "list_item",
            ItemLabel::Code => "code",
            ItemLabel::Caption => "caption",
            ItemLabel::Footnote => "footnote",
            ItemLabel::Formula => "formula",
            ItemLabel::PageHeader => "page_header",
            ItemLabel::PageFooter => "page_footer",
            ItemLabel::Table => "table",
            ItemLabel::Picture => "picture",
            ItemLabel::DocumentIndex => "document_index",
            ItemLabel::CheckboxSelected => "checkbox_selected",
            ItemLabel::CheckboxUnselected => "checkbox_unselected",
            ItemLabel::Other(s) => s,
        }
    }

    /// Parse a label, accepting `-` or `_` separators in any case.
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "title" => ItemLabel::Title,
            "section_header" => ItemLabel::SectionHeader,
            "paragraph" => ItemLabel::Paragraph,
            "text" => ItemLabel::Text,
            "list_item" => ItemLabel::ListItem,
            "code" => ItemLabel::Code,
            "caption" => ItemLabel::Caption,
            "footnote" => ItemLabel::Footnote,
            "formula" => ItemLabel::Formula,
            "page_header" => ItemLabel::PageHeader,
            "page_footer" => ItemLabel::PageFooter,
            "table" => ItemLabel::Table,
            "picture" => ItemLabel::Picture,
            "document_index" => ItemLabel::DocumentIndex,
            "checkbox_selected" => ItemLabel::CheckboxSelected,
            "checkbox_unselected" => ItemLabel::CheckboxUnselected,
            _ => ItemLabel::Other(s.trim().to_string()),
        }
    }

    /// Check if this label marks a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, ItemLabel::Title | ItemLabel::SectionHeader)
    }
}

impl From<String> for ItemLabel {
    fn from(s: String) -> Self {
        ItemLabel::parse(&s)
    }
}

impl From<&str> for ItemLabel {
    fn from(s: &str) -> Self {
        ItemLabel::parse(s)
    }
}

impl From<ItemLabel> for String {
    fn from(label: ItemLabel) -> Self {
        label.as_str().to_string()
    }
}

impl std::fmt::Display for ItemLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a structural group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Bulleted list
    List,
    /// Numbered list
    OrderedList,
    /// Any other container (sections, key-value areas, ...)
    #[default]
    Other,
}

impl GroupKind {
    /// Check if this group opens a list.
    pub fn is_list(&self) -> bool {
        matches!(self, GroupKind::List | GroupKind::OrderedList)
    }
}

/// A document item in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentItem {
    /// Body text (paragraphs, code, captions, ...)
    Text(TextItem),

    /// A heading-like text item
    Heading(TextItem),

    /// A table
    Table(TableItem),

    /// A picture
    Picture(PictureItem),

    /// An entry of the innermost open list group
    ListItem(ListItem),

    /// A structural container, never emitted as content
    Group(GroupItem),

    /// An item the engine boundary could not map to a known shape
    Unknown(UnknownItem),
}

impl DocumentItem {
    /// Create a group marker.
    pub fn group(kind: GroupKind) -> Self {
        DocumentItem::Group(GroupItem { kind, name: None })
    }

    /// Create a bare placeholder with no structural information.
    pub fn placeholder() -> Self {
        DocumentItem::Unknown(UnknownItem::default())
    }

    /// Create a heading item.
    pub fn heading(label: ItemLabel, text: impl Into<String>) -> Self {
        DocumentItem::Heading(TextItem::new(label, text))
    }

    /// The item's label, if it has one.
    pub fn label(&self) -> Option<&ItemLabel> {
        match self {
            DocumentItem::Text(t) | DocumentItem::Heading(t) => Some(&t.label),
            DocumentItem::Table(t) => Some(&t.label),
            DocumentItem::Picture(p) => Some(&p.label),
            DocumentItem::ListItem(l) => Some(&l.label),
            DocumentItem::Group(_) => None,
            DocumentItem::Unknown(u) => u.label.as_ref(),
        }
    }

    /// Label string used in output records.
    pub fn label_str(&self) -> &str {
        match self {
            DocumentItem::Group(g) => match g.kind {
                GroupKind::List => "list",
                GroupKind::OrderedList => "ordered_list",
                GroupKind::Other => "group",
            },
            _ => self.label().map(ItemLabel::as_str).unwrap_or("unknown"),
        }
    }

    /// The item's text, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DocumentItem::Text(t) | DocumentItem::Heading(t) => Some(&t.text),
            DocumentItem::ListItem(l) => Some(&l.text),
            DocumentItem::Unknown(u) => u.text.as_deref(),
            _ => None,
        }
    }

    /// Provenance entries; the first one is authoritative.
    pub fn provenance(&self) -> &[Provenance] {
        match self {
            DocumentItem::Text(t) | DocumentItem::Heading(t) => &t.prov,
            DocumentItem::Table(t) => &t.prov,
            DocumentItem::Picture(p) => &p.prov,
            DocumentItem::ListItem(l) => &l.prov,
            DocumentItem::Group(_) => &[],
            DocumentItem::Unknown(u) => &u.prov,
        }
    }

    /// The authoritative provenance entry.
    pub fn first_provenance(&self) -> Option<&Provenance> {
        self.provenance().first()
    }

    /// Page the item is assigned to (from its first provenance entry).
    pub fn page_no(&self) -> Option<u32> {
        self.first_provenance().map(|p| p.page_no)
    }

    /// Caption text for tables and pictures.
    pub fn caption(&self) -> Option<&str> {
        let caption = match self {
            DocumentItem::Table(t) => t.caption.as_deref(),
            DocumentItem::Picture(p) => p.caption.as_deref(),
            _ => None,
        };
        caption.filter(|c| !c.is_empty())
    }

    /// Check if this is a structural group marker.
    pub fn is_group(&self) -> bool {
        matches!(self, DocumentItem::Group(_))
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, DocumentItem::ListItem(_))
    }

    /// Check if this item carries no structural information at all.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DocumentItem::Unknown(u) if u.is_placeholder())
    }
}

/// A text-bearing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// Semantic label
    pub label: ItemLabel,
    /// Text content
    #[serde(default)]
    pub text: String,
    /// Provenance entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prov: Vec<Provenance>,
}

impl TextItem {
    /// Create a new text item without provenance.
    pub fn new(label: ItemLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
            prov: Vec::new(),
        }
    }

    /// Add a provenance entry and return self.
    pub fn with_prov(mut self, prov: Provenance) -> Self {
        self.prov.push(prov);
        self
    }
}

impl From<TextItem> for DocumentItem {
    fn from(item: TextItem) -> Self {
        if item.label.is_heading() {
            DocumentItem::Heading(item)
        } else {
            DocumentItem::Text(item)
        }
    }
}

/// A table item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
    /// Semantic label
    #[serde(default = "table_label")]
    pub label: ItemLabel,
    /// Cell grid
    #[serde(default)]
    pub grid: TableGrid,
    /// Caption text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Provenance entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prov: Vec<Provenance>,
}

fn table_label() -> ItemLabel {
    ItemLabel::Table
}

impl TableItem {
    /// Create a new table item.
    pub fn new(grid: TableGrid) -> Self {
        Self {
            label: ItemLabel::Table,
            grid,
            caption: None,
            prov: Vec::new(),
        }
    }

    /// Set the caption and return self.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Add a provenance entry and return self.
    pub fn with_prov(mut self, prov: Provenance) -> Self {
        self.prov.push(prov);
        self
    }
}

impl From<TableItem> for DocumentItem {
    fn from(item: TableItem) -> Self {
        DocumentItem::Table(item)
    }
}

/// Reference to an extracted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image URI (file path, URL or data URI)
    pub uri: String,
}

/// A picture item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureItem {
    /// Semantic label
    #[serde(default = "picture_label")]
    pub label: ItemLabel,
    /// Image reference, when the engine extracted the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    /// Caption text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Provenance entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prov: Vec<Provenance>,
}

fn picture_label() -> ItemLabel {
    ItemLabel::Picture
}

impl PictureItem {
    /// Create a picture without an image reference.
    pub fn new() -> Self {
        Self {
            label: ItemLabel::Picture,
            image: None,
            caption: None,
            prov: Vec::new(),
        }
    }

    /// Set the image URI and return self.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.image = Some(ImageRef { uri: uri.into() });
        self
    }

    /// Set the caption and return self.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Add a provenance entry and return self.
    pub fn with_prov(mut self, prov: Provenance) -> Self {
        self.prov.push(prov);
        self
    }

    /// Check if an image reference exists.
    pub fn has_image_reference(&self) -> bool {
        self.image.is_some()
    }
}

impl Default for PictureItem {
    fn default() -> Self {
        Self::new()
    }
}

impl From<PictureItem> for DocumentItem {
    fn from(item: PictureItem) -> Self {
        DocumentItem::Picture(item)
    }
}

/// A list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Semantic label
    #[serde(default = "list_item_label")]
    pub label: ItemLabel,
    /// Entry text
    #[serde(default)]
    pub text: String,
    /// Provenance entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prov: Vec<Provenance>,
}

fn list_item_label() -> ItemLabel {
    ItemLabel::ListItem
}

impl ListItem {
    /// Create a new list entry.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: ItemLabel::ListItem,
            text: text.into(),
            prov: Vec::new(),
        }
    }

    /// Add a provenance entry and return self.
    pub fn with_prov(mut self, prov: Provenance) -> Self {
        self.prov.push(prov);
        self
    }
}

impl From<ListItem> for DocumentItem {
    fn from(item: ListItem) -> Self {
        DocumentItem::ListItem(item)
    }
}

/// A structural group marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupItem {
    /// Group kind
    #[serde(default)]
    pub kind: GroupKind,
    /// Group name reported by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<GroupItem> for DocumentItem {
    fn from(item: GroupItem) -> Self {
        DocumentItem::Group(item)
    }
}

/// An item of unrecognized shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnknownItem {
    /// Type name reported by the engine, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Label, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<ItemLabel>,
    /// Text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Provenance entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prov: Vec<Provenance>,
}

impl UnknownItem {
    /// Create an unknown item carrying an engine type name.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    /// Check if the item carries no structural information.
    pub fn is_placeholder(&self) -> bool {
        self.type_name.is_none() && self.label.is_none() && self.text.is_none() && self.prov.is_empty()
    }
}

impl From<UnknownItem> for DocumentItem {
    fn from(item: UnknownItem) -> Self {
        DocumentItem::Unknown(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!(ItemLabel::parse("section-header"), ItemLabel::SectionHeader);
        assert_eq!(ItemLabel::parse("SECTION_HEADER"), ItemLabel::SectionHeader);
        assert_eq!(ItemLabel::parse("list item"), ItemLabel::ListItem);
        assert_eq!(
            ItemLabel::parse("marginalia"),
            ItemLabel::Other("marginalia".to_string())
        );
        assert_eq!(ItemLabel::SectionHeader.to_string(), "section_header");
    }

    #[test]
    fn test_text_item_into_heading() {
        let item: DocumentItem = TextItem::new(ItemLabel::Title, "Intro").into();
        assert!(matches!(item, DocumentItem::Heading(_)));

        let item: DocumentItem = TextItem::new(ItemLabel::Paragraph, "Body").into();
        assert!(matches!(item, DocumentItem::Text(_)));
    }

    #[test]
    fn test_placeholder() {
        assert!(DocumentItem::placeholder().is_placeholder());
        assert!(!DocumentItem::Unknown(UnknownItem::named("SectionHeaderItem")).is_placeholder());
        assert_eq!(DocumentItem::placeholder().label_str(), "unknown");
    }

    #[test]
    fn test_empty_caption_is_none() {
        let item: DocumentItem = TableItem::new(TableGrid::new()).with_caption("").into();
        assert!(item.caption().is_none());
    }

    #[test]
    fn test_item_serde_tag() {
        let item: DocumentItem = ListItem::new("first").into();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"list_item\""));
        assert!(json.contains("\"label\":\"list_item\""));

        let back: DocumentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
