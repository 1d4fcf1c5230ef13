//! Rendering options and configuration.

use crate::model::ItemLabel;
use std::collections::HashSet;

/// Options for serializing document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Skip pictures entirely ("strict text" output)
    pub strict_text: bool,

    /// Attach page index and bounding box to rendered elements
    pub include_provenance: bool,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Escape special Markdown characters in text
    pub escape_special_chars: bool,

    /// Labels whose generic text items are left out of the output
    pub excluded_labels: HashSet<ItemLabel>,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Alt text for pictures without a caption (Markdown)
    pub default_image_alt: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict text mode.
    pub fn with_strict_text(mut self, strict: bool) -> Self {
        self.strict_text = strict;
        self
    }

    /// Enable or disable positional metadata.
    pub fn with_provenance(mut self, include: bool) -> Self {
        self.include_provenance = include;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Leave generic text items with this label out of the output.
    pub fn exclude_label(mut self, label: ItemLabel) -> Self {
        self.excluded_labels.insert(label);
        self
    }

    /// Export generic text items with this label.
    pub fn include_label(mut self, label: &ItemLabel) -> Self {
        self.excluded_labels.remove(label);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the alt text used for pictures without a caption.
    pub fn with_default_image_alt(mut self, alt: impl Into<String>) -> Self {
        self.default_image_alt = alt.into();
        self
    }

    /// Check if generic text items with this label are exported.
    pub fn exports(&self, label: Option<&ItemLabel>) -> bool {
        label.map_or(true, |l| !self.excluded_labels.contains(l))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict_text: false,
            include_provenance: true,
            max_heading_level: 6,
            escape_special_chars: false,
            excluded_labels: [ItemLabel::PageHeader, ItemLabel::PageFooter]
                .into_iter()
                .collect(),
            list_marker: '-',
            default_image_alt: "Document image".to_string(),
        }
    }
}
