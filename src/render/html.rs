//! HTML ("structured markup") serialization.

use super::list::ListBlock;
use super::walk::{render_parts, ElementWriter, Positional};
use super::{Formatter, RenderOptions};
use crate::classify::ElementRole;
use crate::model::{Document, GroupKind, PictureItem, TableGrid, TableItem};

/// MIME type of HTML output.
pub const HTML_MIME_TYPE: &str = "text/html";

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    HtmlFormatter::new(options.clone()).format(doc)
}

/// HTML formatter.
///
/// Elements carry a `className` wrapper attribute and, when provenance is
/// enabled, `bbox` (top-left origin) and `page_index` attributes.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    options: RenderOptions,
}

impl HtmlFormatter {
    /// Create a new HTML formatter.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The formatter's render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Formatter for HtmlFormatter {
    fn format_name(&self) -> &'static str {
        "html"
    }

    fn mime_type(&self) -> &'static str {
        HTML_MIME_TYPE
    }

    fn format(&self, doc: &Document) -> String {
        render_parts(doc, &self.options, self).join("\n\n")
    }

    fn element_tag(&self, role: &ElementRole) -> String {
        match role {
            ElementRole::Title | ElementRole::SectionHeader { .. } => {
                let level = role.heading_level(self.options.max_heading_level).unwrap_or(1);
                format!("h{}", level)
            }
            ElementRole::Paragraph => "p".to_string(),
            ElementRole::Code => "pre".to_string(),
            ElementRole::ListItem => "li".to_string(),
            ElementRole::Text | ElementRole::Group(GroupKind::Other) => "div".to_string(),
            ElementRole::Table => "table".to_string(),
            ElementRole::Picture => "img".to_string(),
            ElementRole::Group(GroupKind::List) => "ul".to_string(),
            ElementRole::Group(GroupKind::OrderedList) => "ol".to_string(),
        }
    }
}

impl ElementWriter for HtmlFormatter {
    fn heading(&self, text: &str, level: u8, title: bool, pos: Option<&Positional>) -> String {
        let class = if title { "title_wrapper" } else { "section_wrapper" };
        element(&format!("h{}", level), class, pos, &escape_html(text))
    }

    fn paragraph(&self, text: &str, pos: Option<&Positional>) -> String {
        element("p", "paragraph_wrapper", pos, &escape_html(text))
    }

    fn code(&self, text: &str, pos: Option<&Positional>) -> String {
        let code = format!("<code>{}</code>", escape_html(text));
        element("pre", "code_wrapper", pos, &code)
    }

    fn text(&self, text: &str, pos: Option<&Positional>) -> String {
        element("div", "text_wrapper", pos, &escape_html(text))
    }

    fn table(&self, table: &TableItem, pos: Option<&Positional>) -> String {
        let mut output = element("div", "table_wrapper", pos, &render_grid(&table.grid));
        if let Some(caption) = table.caption.as_deref().filter(|c| !c.is_empty()) {
            output.push_str("\n\n");
            output.push_str(&element("div", "caption_wrapper", None, &escape_html(caption)));
        }
        output
    }

    fn picture(&self, picture: &PictureItem, pos: Option<&Positional>) -> String {
        let img = match &picture.image {
            Some(image) => format!("<img src=\"{}\"/>", escape_html(&image.uri)),
            None => "<img/>".to_string(),
        };
        let mut output = element("div", "image_wrapper", pos, &img);
        if let Some(caption) = picture.caption.as_deref().filter(|c| !c.is_empty()) {
            output.push_str("\n\n");
            output.push_str(&element("div", "caption_wrapper", None, &escape_html(caption)));
        }
        output
    }

    fn list(&self, list: &ListBlock) -> String {
        let mut output = String::new();
        render_list(&mut output, list);
        output
    }
}

fn render_list(output: &mut String, list: &ListBlock) {
    let tag = if list.is_ordered() { "ol" } else { "ul" };
    output.push_str(&format!("<{} className=\"list_wrapper\">", tag));

    for entry in &list.entries {
        output.push_str("<li className=\"listitem_wrapper\"");
        output.push_str(&position_attrs(entry.position.as_ref()));
        output.push('>');
        if let Some(text) = &entry.text {
            output.push_str(&escape_html(text));
        }
        for child in &entry.children {
            render_list(output, child);
        }
        output.push_str("</li>");
    }

    output.push_str(&format!("</{}>", tag));
}

fn render_grid(grid: &TableGrid) -> String {
    if grid.is_empty() {
        log::debug!("Rendering empty table grid");
        return "<table></table>".to_string();
    }

    let mut output = String::from("<table>");
    for cells in grid.rows().values() {
        output.push_str("<tr>");
        for cell in cells {
            let mut attrs = String::new();
            if cell.row_span() > 1 {
                attrs.push_str(&format!(" rowspan=\"{}\"", cell.row_span()));
            }
            if cell.col_span() > 1 {
                attrs.push_str(&format!(" colspan=\"{}\"", cell.col_span()));
            }
            output.push_str(&format!("<td{}>{}</td>", attrs, escape_html(&cell.text)));
        }
        output.push_str("</tr>");
    }
    output.push_str("</table>");
    output
}

fn element(tag: &str, class: &str, pos: Option<&Positional>, content: &str) -> String {
    format!(
        "<{tag} className=\"{class}\"{attrs}>{content}</{tag}>",
        tag = tag,
        class = class,
        attrs = position_attrs(pos),
        content = content
    )
}

fn position_attrs(pos: Option<&Positional>) -> String {
    let Some(pos) = pos else {
        return String::new();
    };
    let mut attrs = String::new();
    if let Some(bbox) = pos.bbox {
        attrs.push_str(&format!(" bbox=\"{}\"", bbox));
    }
    attrs.push_str(&format!(" page_index=\"{}\"", pos.page_index));
    attrs
}

/// Escape text for HTML content and attribute values.
fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BoundingBox, DocumentItem, GridCell, ItemLabel, ListItem, Page, Provenance, TextItem,
    };

    fn html(doc: &Document) -> String {
        HtmlFormatter::default().format(doc)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_heading_and_paragraph() {
        let doc = Document::new()
            .with_page(Page::letter(1))
            .with_item(TextItem::new(ItemLabel::Title, "Intro"), 1)
            .with_item(TextItem::new(ItemLabel::SectionHeader, "Part"), 2)
            .with_item(TextItem::new(ItemLabel::Paragraph, "Hello world"), 2);

        assert_eq!(
            html(&doc),
            "<h1 className=\"title_wrapper\">Intro</h1>\n\n\
             <h3 className=\"section_wrapper\">Part</h3>\n\n\
             <p className=\"paragraph_wrapper\">Hello world</p>"
        );
    }

    #[test]
    fn test_position_attributes() {
        let doc = Document::new().with_page(Page::letter(1)).with_item(
            TextItem::new(ItemLabel::Paragraph, "body")
                .with_prov(Provenance::new(1, BoundingBox::new(72.0, 700.0, 540.0, 680.0))),
            1,
        );

        assert_eq!(
            html(&doc),
            "<p className=\"paragraph_wrapper\" bbox=\"[72, 92, 540, 112]\" page_index=\"0\">body</p>"
        );

        let plain = HtmlFormatter::new(RenderOptions::new().with_provenance(false)).format(&doc);
        assert_eq!(plain, "<p className=\"paragraph_wrapper\">body</p>");
    }

    #[test]
    fn test_table_spans_and_caption() {
        let grid = TableGrid::new()
            .with_cell(GridCell::new(0, 0, "Header").colspan(2))
            .with_cell(GridCell::new(1, 0, "a"))
            .with_cell(GridCell::new(1, 1, "b"));
        let doc = Document::new().with_item(TableItem::new(grid).with_caption("Totals"), 1);

        assert_eq!(
            html(&doc),
            "<div className=\"table_wrapper\"><table><tr><td colspan=\"2\">Header</td></tr>\
             <tr><td>a</td><td>b</td></tr></table></div>\n\n\
             <div className=\"caption_wrapper\">Totals</div>"
        );
    }

    #[test]
    fn test_empty_table() {
        let doc = Document::new().with_item(TableItem::new(TableGrid::new()), 1);
        assert_eq!(html(&doc), "<div className=\"table_wrapper\"><table></table></div>");
    }

    #[test]
    fn test_picture_and_strict_text() {
        let doc = Document::new()
            .with_item(PictureItem::new().with_uri("fig1.png"), 1)
            .with_item(TextItem::new(ItemLabel::Paragraph, "after"), 1);

        assert!(html(&doc).starts_with("<div className=\"image_wrapper\"><img src=\"fig1.png\"/></div>"));

        let strict = HtmlFormatter::new(RenderOptions::new().with_strict_text(true)).format(&doc);
        assert_eq!(strict, "<p className=\"paragraph_wrapper\">after</p>");
    }

    #[test]
    fn test_nested_lists() {
        let doc = Document::new()
            .with_item(DocumentItem::group(GroupKind::List), 1)
            .with_item(ListItem::new("one"), 2)
            .with_item(DocumentItem::group(GroupKind::OrderedList), 2)
            .with_item(ListItem::new("one.a"), 3)
            .with_item(ListItem::new("two"), 2);

        assert_eq!(
            html(&doc),
            "<ul className=\"list_wrapper\"><li className=\"listitem_wrapper\">one\
             <ol className=\"list_wrapper\"><li className=\"listitem_wrapper\">one.a</li></ol></li>\
             <li className=\"listitem_wrapper\">two</li></ul>"
        );
    }

    #[test]
    fn test_page_furniture_excluded() {
        let doc = Document::new()
            .with_item(TextItem::new(ItemLabel::PageHeader, "Running head"), 1)
            .with_item(TextItem::new(ItemLabel::Caption, "Figure 2"), 1);

        assert_eq!(html(&doc), "<div className=\"text_wrapper\">Figure 2</div>");
    }
}
