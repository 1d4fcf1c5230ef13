//! Size-bounded chunking of serialized markup.
//!
//! The chunker splits markup on its element separator (a blank line),
//! greedily packs consecutive elements into chunks of at most `chunk_size`
//! characters, and word-splits any single element that is larger than
//! the limit on its own.
//!
//! # Example
//!
//! ```
//! use docstruct::chunk::{reassemble, Chunker, ChunkType};
//!
//! let chunker = Chunker::new(10)?;
//! let markup = "aaaa\n\nbbbbbbbbbbbbbbb";
//! let chunks = chunker.chunk(markup);
//!
//! assert_eq!(chunks[0].content, "aaaa");
//! assert_eq!(chunks[1].metadata.chunk_type, ChunkType::Partial);
//! assert_eq!(reassemble(&chunks, "\n\n"), markup);
//! # Ok::<(), docstruct::Error>(())
//! ```

mod splitter;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

use splitter::{char_len, split_words};

/// Separator between serialized elements.
pub const ELEMENT_SEPARATOR: &str = "\n\n";

/// Default MIME type for chunks when none is configured.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// A bounded-size piece of serialized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub content: String,

    /// MIME type of the markup the chunk was cut from
    pub mime_type: String,

    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

/// Metadata attached to every chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Position of the chunk in the sequence (0-based)
    pub index: usize,

    /// How the chunk was formed
    pub chunk_type: ChunkType,

    /// Number of whole or remainder elements packed in the chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_count: Option<usize>,

    /// Content length in characters
    pub content_length: usize,

    /// Set when the chunk holds a piece of a word-split element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_partial: Option<bool>,

    /// Set when the element continues in the next chunk with no separator
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub continued: bool,
}

/// How a chunk was formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// One or more consecutive elements
    ElementGroup,
    /// A word-split piece of a single oversized element
    Partial,
}

/// Greedy structural chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    mime_type: String,
    separator: String,
}

impl Chunker {
    /// Create a chunker with a limit of `chunk_size` characters.
    ///
    /// Returns [`Error::InvalidChunkSize`] when `chunk_size` is 0.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            chunk_size,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            separator: ELEMENT_SEPARATOR.to_string(),
        })
    }

    /// Set the MIME type stamped on every chunk.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Set the element separator (ignored when empty).
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.separator = separator;
        }
        self
    }

    /// The configured size limit in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The configured element separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Split markup into chunks in reading order.
    ///
    /// The result is deterministic and lossless: [`reassemble`] with the
    /// same separator reproduces `markup` exactly.
    pub fn chunk(&self, markup: &str) -> Vec<Chunk> {
        if markup.is_empty() {
            return Vec::new();
        }

        let mut builder = ChunkBuilder::new(self);
        for element in markup.split(self.separator.as_str()) {
            builder.push_element(element);
        }
        let chunks = builder.finish();

        log::debug!(
            "Chunked {} chars into {} chunks (limit {})",
            char_len(markup),
            chunks.len(),
            self.chunk_size
        );
        chunks
    }
}

/// Running state of one chunking pass.
struct ChunkBuilder<'a> {
    config: &'a Chunker,
    sep_len: usize,
    chunks: Vec<Chunk>,
    buffer: Vec<&'a str>,
    buffer_len: usize,
    /// The buffer starts with the remainder of a word-split element
    buffer_partial: bool,
}

impl<'a> ChunkBuilder<'a> {
    fn new(config: &'a Chunker) -> Self {
        Self {
            config,
            sep_len: char_len(&config.separator),
            chunks: Vec::new(),
            buffer: Vec::new(),
            buffer_len: 0,
            buffer_partial: false,
        }
    }

    fn push_element(&mut self, element: &'a str) {
        let len = char_len(element);
        let limit = self.config.chunk_size;

        if !self.buffer.is_empty() && self.buffer_len + self.sep_len + len > limit {
            self.flush();
        }

        if len <= limit {
            self.append(element, len);
            return;
        }

        // The buffer is empty here: anything in it was just flushed.
        let pieces = split_words(element, limit);
        let Some((remainder, cut)) = pieces.split_last() else {
            return;
        };
        for piece in cut {
            self.emit(piece.to_string(), ChunkType::Partial, None, Some(true), true);
        }
        self.append(remainder, char_len(remainder));
        self.buffer_partial = true;
    }

    fn append(&mut self, element: &'a str, len: usize) {
        if !self.buffer.is_empty() {
            self.buffer_len += self.sep_len;
        }
        self.buffer.push(element);
        self.buffer_len += len;
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let content = self.buffer.join(&self.config.separator);
        let count = self.buffer.len();
        if self.buffer_partial && count == 1 {
            self.emit(content, ChunkType::Partial, None, Some(true), false);
        } else {
            let partial = self.buffer_partial.then_some(true);
            self.emit(content, ChunkType::ElementGroup, Some(count), partial, false);
        }
        self.buffer.clear();
        self.buffer_len = 0;
        self.buffer_partial = false;
    }

    fn emit(
        &mut self,
        content: String,
        chunk_type: ChunkType,
        element_count: Option<usize>,
        is_partial: Option<bool>,
        continued: bool,
    ) {
        let metadata = ChunkMetadata {
            index: self.chunks.len(),
            chunk_type,
            element_count,
            content_length: char_len(&content),
            is_partial,
            continued,
        };
        self.chunks.push(Chunk {
            content,
            mime_type: self.config.mime_type.clone(),
            metadata,
        });
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

/// Chunk `markup` with a limit of `chunk_size` characters.
pub fn create_chunks(markup: &str, chunk_size: usize, mime_type: &str) -> Result<Vec<Chunk>> {
    Ok(Chunker::new(chunk_size)?
        .with_mime_type(mime_type)
        .chunk(markup))
}

/// Rebuild the original markup from its chunks.
pub fn reassemble(chunks: &[Chunk], separator: &str) -> String {
    let mut output = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        output.push_str(&chunk.content);
        if i + 1 < chunks.len() && !chunk.metadata.continued {
            output.push_str(separator);
        }
    }
    output
}
