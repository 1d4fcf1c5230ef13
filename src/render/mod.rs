//! Rendering module for converting documents to markup and other output formats.

mod html;
mod json;
mod list;
mod markdown;
mod options;
mod structure;
mod text;
mod walk;

pub use html::{to_html, HtmlFormatter, HTML_MIME_TYPE};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownFormatter, MARKDOWN_MIME_TYPE};
pub use options::RenderOptions;
pub use structure::{PageStructure, StructureElement, StructureReport};
pub use text::to_text;

pub(crate) use walk::Positional;

use crate::chunk::{Chunk, Chunker};
use crate::classify::ElementRole;
use crate::error::Result;
use crate::model::Document;
use serde::{Deserialize, Serialize};

/// A markup serializer.
///
/// Implementations render the document in reading order, describe the
/// elements they render per page, and chunk their own output.
pub trait Formatter {
    /// Short format name ("html", "markdown").
    fn format_name(&self) -> &'static str;

    /// MIME type of the rendered markup.
    fn mime_type(&self) -> &'static str;

    /// Render the whole document.
    fn format(&self, doc: &Document) -> String;

    /// Format-specific tag or element kind for a rendering role.
    fn element_tag(&self, role: &ElementRole) -> String;

    /// Per-page structure report of the rendered elements.
    fn get_structure(&self, doc: &Document) -> StructureReport {
        structure::build(self, doc)
    }

    /// Render the document and split the markup into chunks.
    ///
    /// The chunk size is validated before anything is rendered.
    fn create_chunks(&self, doc: &Document, chunk_size: usize) -> Result<Vec<Chunk>> {
        let chunker = Chunker::new(chunk_size)?.with_mime_type(self.mime_type());
        Ok(chunker.chunk(&self.format(doc)))
    }
}

/// Markup output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured markup
    #[default]
    Html,
    /// Lightweight markup
    Markdown,
}

impl OutputFormat {
    /// Format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// MIME type of the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => HTML_MIME_TYPE,
            OutputFormat::Markdown => MARKDOWN_MIME_TYPE,
        }
    }

    /// Create the formatter for this format.
    pub fn formatter(&self, options: RenderOptions) -> Box<dyn Formatter + Send + Sync> {
        match self {
            OutputFormat::Html => Box::new(HtmlFormatter::new(options)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(options)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{ItemLabel, TextItem};

    fn doc() -> Document {
        Document::new()
            .with_item(TextItem::new(ItemLabel::Title, "Intro"), 1)
            .with_item(TextItem::new(ItemLabel::Paragraph, "Hello world"), 1)
    }

    #[test]
    fn test_output_format_formatter() {
        let formatter = OutputFormat::Markdown.formatter(RenderOptions::default());
        assert_eq!(formatter.format_name(), "markdown");
        assert_eq!(formatter.mime_type(), "text/markdown");
        assert_eq!(formatter.format(&doc()), "# Intro\n\nHello world");
        assert_eq!(OutputFormat::Html.mime_type(), "text/html");
    }

    #[test]
    fn test_formatter_create_chunks() {
        let formatter = HtmlFormatter::default();
        let chunks = formatter.create_chunks(&doc(), 60).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.mime_type == "text/html"));

        assert!(matches!(
            formatter.create_chunks(&doc(), 0),
            Err(Error::InvalidChunkSize(0))
        ));
    }
}
