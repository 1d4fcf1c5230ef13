//! Structure estimation for degraded item streams.

use crate::model::Document;
use crate::render::{Formatter, MarkdownFormatter, RenderOptions};
use regex::Regex;
use std::sync::OnceLock;

/// Counts estimated from a plain-text rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Estimate {
    pub(crate) text_blocks: usize,
    pub(crate) headings: usize,
    pub(crate) tables: usize,
}

fn heading_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6}\s").unwrap())
}

fn table_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\|.*\|").unwrap())
}

/// Estimate structure from the Markdown rendering of `doc`.
///
/// Returns `None` when the rendering is empty.
pub(crate) fn estimate(doc: &Document) -> Option<Estimate> {
    let options = RenderOptions::new().with_provenance(false);
    let markdown = MarkdownFormatter::new(options).format(doc);
    if markdown.trim().is_empty() {
        return None;
    }
    Some(estimate_text(&markdown))
}

/// Line heuristics: heading marker lines, runs of delimiter rows as
/// tables, every other non-empty line as a text block.
pub(crate) fn estimate_text(text: &str) -> Estimate {
    let heading = heading_line();
    let table = table_line();

    let mut estimate = Estimate::default();
    let mut in_table = false;

    for line in text.lines() {
        if table.is_match(line) {
            if !in_table {
                estimate.tables += 1;
                in_table = true;
            }
            continue;
        }
        in_table = false;

        if heading.is_match(line) {
            estimate.headings += 1;
        } else if !line.trim().is_empty() {
            estimate.text_blocks += 1;
        }
    }

    estimate
}
