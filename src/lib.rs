//! # docstruct
//!
//! Structural post-processing for converted documents.
//!
//! This library takes the item tree a document-conversion engine produces
//! (text, headings, tables, pictures, lists, with page provenance) and
//! derives three artifacts from it: a normalized structural metadata
//! record, a serialization to HTML or Markdown, and size-bounded chunks of
//! that serialization for indexing.
//!
//! ## Quick Start
//!
//! ```
//! use docstruct::model::{ItemLabel, Page, TextItem};
//! use docstruct::{aggregate, render, Category, Document};
//!
//! let doc = Document::new()
//!     .with_page(Page::letter(1))
//!     .with_item(TextItem::new(ItemLabel::Title, "Intro"), 1)
//!     .with_item(TextItem::new(ItemLabel::Paragraph, "Hello world"), 1);
//!
//! // Structural metadata
//! let metadata = aggregate(&doc);
//! assert_eq!(metadata.count(Category::Heading), 1);
//!
//! // Markdown
//! let markdown = render::to_markdown(&doc, &render::RenderOptions::default());
//! assert_eq!(markdown, "# Intro\n\nHello world");
//! ```
//!
//! ## Features
//!
//! - **Engine boundary normalization**: loosely shaped engine JSON becomes a canonical model
//! - **Classification**: every item maps to exactly one category, never failing
//! - **Aggregation**: counts, typed element lists, bounding boxes, per-page buckets
//! - **Degraded input**: placeholder-heavy streams fall back to text estimates
//! - **Two markup formats**: HTML with positional attributes, Markdown with comments
//! - **Chunking**: structure-aware, lossless, size-bounded chunks
//! - **Parallel batches**: Uses Rayon for independent documents

pub mod aggregate;
pub mod chunk;
pub mod classify;
pub mod error;
pub mod ingest;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use aggregate::{
    aggregate, aggregate_with_options, document_info, AggregateOptions, DocumentInfo,
    StructuralMetadata,
};
pub use chunk::{Chunk, ChunkMetadata, ChunkType, Chunker};
pub use classify::{classify, Category, ElementRole};
pub use error::{Error, Result};
pub use ingest::{from_json_str, from_json_value};
pub use model::{Document, DocumentItem, ItemLabel, Page};
pub use render::{
    Formatter, HtmlFormatter, JsonFormat, MarkdownFormatter, OutputFormat, RenderOptions,
    StructureReport,
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Convert a document to HTML with default options.
pub fn to_html(doc: &Document) -> String {
    render::to_html(doc, &RenderOptions::default())
}

/// Convert a document to Markdown with default options.
pub fn to_markdown(doc: &Document) -> String {
    render::to_markdown(doc, &RenderOptions::default())
}

/// Serialize a document and split it into chunks of at most `chunk_size`
/// characters.
///
/// # Example
///
/// ```
/// use docstruct::model::{ItemLabel, TextItem};
/// use docstruct::{create_chunks, Document, OutputFormat};
///
/// let doc = Document::new().with_item(TextItem::new(ItemLabel::Paragraph, "Hello"), 1);
/// let chunks = create_chunks(&doc, OutputFormat::Markdown, 100)?;
/// assert_eq!(chunks[0].content, "Hello");
/// assert_eq!(chunks[0].mime_type, "text/markdown");
/// # Ok::<(), docstruct::Error>(())
/// ```
pub fn create_chunks(doc: &Document, format: OutputFormat, chunk_size: usize) -> Result<Vec<Chunk>> {
    format
        .formatter(RenderOptions::default())
        .create_chunks(doc, chunk_size)
}

/// Builder for processing documents end to end.
///
/// # Example
///
/// ```
/// use docstruct::model::{ItemLabel, TextItem};
/// use docstruct::{DocStruct, Document, OutputFormat};
///
/// let doc = Document::new().with_item(TextItem::new(ItemLabel::Paragraph, "Hello"), 1);
/// let processed = DocStruct::new()
///     .with_format(OutputFormat::Markdown)
///     .with_chunk_size(500)
///     .process(&doc, "doc-1")?;
///
/// assert_eq!(processed.content, "Hello");
/// assert_eq!(processed.chunks.len(), 1);
/// # Ok::<(), docstruct::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocStruct {
    format: OutputFormat,
    chunk_size: Option<usize>,
    render_options: RenderOptions,
    aggregate_options: AggregateOptions,
}

impl DocStruct {
    /// Create a new builder (HTML output, no chunking).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Chunk the serialized output with this size limit in characters.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Skip pictures in the output.
    pub fn strict_text(mut self) -> Self {
        self.render_options = self.render_options.with_strict_text(true);
        self
    }

    /// Set the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the aggregate options.
    pub fn with_aggregate_options(mut self, options: AggregateOptions) -> Self {
        self.aggregate_options = options;
        self
    }

    /// Serialize, aggregate and chunk one document.
    ///
    /// Fails only when the configured chunk size is invalid; that is
    /// checked before any work is done.
    pub fn process(&self, doc: &Document, document_id: impl Into<String>) -> Result<ProcessedDocument> {
        let formatter = self.format.formatter(self.render_options.clone());
        let chunker = match self.chunk_size {
            Some(size) => Some(Chunker::new(size)?.with_mime_type(formatter.mime_type())),
            None => None,
        };

        let content = formatter.format(doc);
        let chunks = chunker.map(|c| c.chunk(&content)).unwrap_or_default();
        let metadata = aggregate_with_options(doc, &self.aggregate_options);
        let document_id = document_id.into();

        log::debug!(
            "Processed {}: {} chars of {}, {} chunks",
            document_id,
            content.chars().count(),
            self.format,
            chunks.len()
        );

        Ok(ProcessedDocument {
            document_id,
            content,
            mime_type: formatter.mime_type().to_string(),
            output_format: self.format,
            metadata,
            chunks,
        })
    }

    /// Process independent documents in parallel.
    ///
    /// Results are returned in input order.
    pub fn process_batch(&self, docs: &[(String, Document)]) -> Vec<Result<ProcessedDocument>> {
        docs.par_iter()
            .map(|(id, doc)| self.process(doc, id.as_str()))
            .collect()
    }
}

/// Everything derived from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Caller-supplied document identifier
    pub document_id: String,

    /// Serialized markup
    pub content: String,

    /// MIME type of `content`
    pub mime_type: String,

    /// Markup format of `content`
    pub output_format: OutputFormat,

    /// Structural metadata
    pub metadata: StructuralMetadata,

    /// Chunks of `content` (empty when chunking is off)
    pub chunks: Vec<Chunk>,
}
