//! Markdown ("lightweight markup") serialization.

use super::list::ListBlock;
use super::walk::{render_parts, ElementWriter, Positional};
use super::{Formatter, RenderOptions};
use crate::classify::ElementRole;
use crate::model::{Document, GroupKind, PictureItem, TableItem};

/// MIME type of Markdown output.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> String {
    MarkdownFormatter::new(options.clone()).format(doc)
}

/// Markdown formatter.
///
/// Positional metadata is written as an HTML comment on the line before
/// each element, or at the end of the line for list entries.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    options: RenderOptions,
}

impl MarkdownFormatter {
    /// Create a new Markdown formatter.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The formatter's render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    fn render_list(&self, output: &mut Vec<String>, list: &ListBlock, depth: usize) {
        let indent = "  ".repeat(depth);
        let mut number = 0;

        for entry in &list.entries {
            if let Some(text) = &entry.text {
                let marker = if list.is_ordered() {
                    number += 1;
                    format!("{}.", number)
                } else {
                    self.options.list_marker.to_string()
                };
                let mut line = format!("{}{} {}", indent, marker, self.escape(text));
                if let Some(comment) = entry.position.as_ref().map(position_comment) {
                    line.push(' ');
                    line.push_str(&comment);
                }
                output.push(line);
            }

            let child_depth = if entry.text.is_some() { depth + 1 } else { depth };
            for child in &entry.children {
                self.render_list(output, child, child_depth);
            }
        }
    }
}

impl Formatter for MarkdownFormatter {
    fn format_name(&self) -> &'static str {
        "markdown"
    }

    fn mime_type(&self) -> &'static str {
        MARKDOWN_MIME_TYPE
    }

    fn format(&self, doc: &Document) -> String {
        render_parts(doc, &self.options, self).join("\n\n")
    }

    fn element_tag(&self, role: &ElementRole) -> String {
        match role {
            ElementRole::Title | ElementRole::SectionHeader { .. } => {
                let level = role.heading_level(self.options.max_heading_level).unwrap_or(1);
                format!("heading_{}", level)
            }
            ElementRole::Paragraph => "paragraph".to_string(),
            ElementRole::Code => "code_block".to_string(),
            ElementRole::ListItem => "list_item".to_string(),
            ElementRole::Text => "text".to_string(),
            ElementRole::Table => "table".to_string(),
            ElementRole::Picture => "image".to_string(),
            ElementRole::Group(GroupKind::List) => "list".to_string(),
            ElementRole::Group(GroupKind::OrderedList) => "ordered_list".to_string(),
            ElementRole::Group(GroupKind::Other) => "group".to_string(),
        }
    }
}

impl ElementWriter for MarkdownFormatter {
    fn heading(&self, text: &str, level: u8, _title: bool, pos: Option<&Positional>) -> String {
        let heading = format!("{} {}", "#".repeat(level as usize), self.escape(text));
        with_comment(pos, heading)
    }

    fn paragraph(&self, text: &str, pos: Option<&Positional>) -> String {
        with_comment(pos, self.escape(text))
    }

    fn code(&self, text: &str, pos: Option<&Positional>) -> String {
        with_comment(pos, format!("```\n{}\n```", text))
    }

    fn text(&self, text: &str, pos: Option<&Positional>) -> String {
        with_comment(pos, self.escape(text))
    }

    fn table(&self, table: &TableItem, pos: Option<&Positional>) -> String {
        let matrix = table.grid.to_matrix();
        if matrix.is_empty() {
            log::debug!("Skipping empty table grid");
            return String::new();
        }

        let mut lines = Vec::with_capacity(matrix.len() + 1);
        for (i, row) in matrix.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|c| table_cell(c)).collect();
            lines.push(format!("| {} |", cells.join(" | ")));

            // Separator after header row
            if i == 0 {
                lines.push(format!("|{}", " --- |".repeat(row.len())));
            }
        }

        let mut output = with_comment(pos, lines.join("\n"));
        if let Some(caption) = table.caption.as_deref().filter(|c| !c.is_empty()) {
            output.push_str(&format!("\n\n*{}*", self.escape(caption)));
        }
        output
    }

    fn picture(&self, picture: &PictureItem, pos: Option<&Positional>) -> String {
        let caption = picture.caption.as_deref().filter(|c| !c.is_empty());
        let alt = caption.unwrap_or(self.options.default_image_alt.as_str());
        let uri = picture.image.as_ref().map(|i| i.uri.as_str()).unwrap_or("");

        let mut output = with_comment(pos, format!("![{}]({})", self.escape(alt), uri));
        if let Some(caption) = caption {
            output.push_str(&format!("\n\n*{}*", self.escape(caption)));
        }
        output
    }

    fn list(&self, list: &ListBlock) -> String {
        let mut lines = Vec::new();
        self.render_list(&mut lines, list, 0);
        lines.join("\n")
    }
}

fn with_comment(pos: Option<&Positional>, element: String) -> String {
    match pos {
        Some(pos) => format!("{}\n{}", position_comment(pos), element),
        None => element,
    }
}

fn position_comment(pos: &Positional) -> String {
    match pos.bbox {
        Some(bbox) => format!("<!-- bbox: {}, page: {} -->", bbox, pos.page_index),
        None => format!("<!-- page: {} -->", pos.page_index),
    }
}

fn table_cell(text: &str) -> String {
    text.replace('\n', " ").replace('|', "\\|").trim().to_string()
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Core formatting that must be escaped
            '\\' | '`' | '*' | '_' |
            // Brackets for links/images, pipe for tables
            '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
