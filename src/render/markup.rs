//! HTML building blocks shared by the section generators.
//!
//! All text handed to these helpers is escaped. The only ways to place
//! unescaped markup on a page are [`PageBuilder::raw`] and
//! [`PageBuilder::diagram`].

use crate::diagram::{embed_diagram, Diagram};
use crate::model::{Page, SectionId};

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
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

/// Incrementally builds the body of one page.
#[derive(Debug)]
pub struct PageBuilder {
    section: SectionId,
    output: String,
}

impl PageBuilder {
    /// Start a page with the section title as its heading.
    pub fn new(section: SectionId) -> Self {
        Self::untitled(section).heading(2, section.title())
    }

    /// Start a page without a heading.
    pub fn untitled(section: SectionId) -> Self {
        Self {
            section,
            output: String::new(),
        }
    }

    /// Add a heading (level clamped to 1-6).
    pub fn heading(mut self, level: u8, text: &str) -> Self {
        let level = level.clamp(1, 6);
        self.output
            .push_str(&format!("<h{0}>{1}</h{0}>\n", level, escape_html(text)));
        self
    }

    /// Add a paragraph.
    pub fn paragraph(mut self, text: &str) -> Self {
        self.output
            .push_str(&format!("<p>{}</p>\n", escape_html(text)));
        self
    }

    /// Add a paragraph with a CSS class.
    pub fn paragraph_class(mut self, class: &str, text: &str) -> Self {
        self.output.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            escape_html(class),
            escape_html(text)
        ));
        self
    }

    /// Add a paragraph with a bold label (`Label: value`).
    pub fn labeled(mut self, label: &str, value: &str) -> Self {
        self.output.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            escape_html(label),
            escape_html(value)
        ));
        self
    }

    /// Add an unordered list. An empty list is still emitted.
    pub fn list<S: AsRef<str>>(mut self, items: &[S]) -> Self {
        self.push_list("ul", items);
        self
    }

    /// Add an ordered list. An empty list is still emitted.
    pub fn ordered_list<S: AsRef<str>>(mut self, items: &[S]) -> Self {
        self.push_list("ol", items);
        self
    }

    /// Add a table with a header row. An empty body is still emitted.
    pub fn table<S: AsRef<str>>(mut self, headers: &[&str], rows: &[Vec<S>]) -> Self {
        self.output.push_str("<table>\n<thead>\n<tr>");
        for header in headers {
            self.output
                .push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        self.output.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in rows {
            self.output.push_str("<tr>");
            for cell in row {
                self.output
                    .push_str(&format!("<td>{}</td>", escape_html(cell.as_ref())));
            }
            self.output.push_str("</tr>\n");
        }
        self.output.push_str("</tbody>\n</table>\n");
        self
    }

    /// Add a two-column label/value table without a header row.
    pub fn details(mut self, pairs: &[(&str, String)]) -> Self {
        self.output.push_str("<table class=\"details\">\n<tbody>\n");
        for (label, value) in pairs {
            self.output.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>\n",
                escape_html(label),
                escape_html(value)
            ));
        }
        self.output.push_str("</tbody>\n</table>\n");
        self
    }

    /// Add a highlighted callout box.
    pub fn callout(mut self, text: &str) -> Self {
        self.output.push_str(&format!(
            "<div class=\"callout\">{}</div>\n",
            escape_html(text)
        ));
        self
    }

    /// Add a signature line for each party.
    pub fn signatures(mut self, parties: &[(&str, String)]) -> Self {
        self.output.push_str("<div class=\"signatures\">\n");
        for (role, name) in parties {
            self.output.push_str(&format!(
                "<div class=\"signature\"><div class=\"signature-line\"></div><p><strong>{}</strong></p><p>{}</p><p>Date: ____________</p></div>\n",
                escape_html(role),
                escape_html(name)
            ));
        }
        self.output.push_str("</div>\n");
        self
    }

    /// Embed a diagram descriptor.
    pub fn diagram(mut self, diagram: &Diagram) -> Self {
        self.output.push_str(&embed_diagram(diagram));
        self
    }

    /// Append trusted markup verbatim.
    pub fn raw(mut self, html: &str) -> Self {
        self.output.push_str(html);
        if !html.ends_with('\n') {
            self.output.push('\n');
        }
        self
    }

    /// Finish the page.
    pub fn finish(self) -> Page {
        Page::new(self.section, self.output)
    }

    fn push_list<S: AsRef<str>>(&mut self, tag: &str, items: &[S]) {
        self.output.push_str(&format!("<{}>\n", tag));
        for item in items {
            self.output
                .push_str(&format!("<li>{}</li>\n", escape_html(item.as_ref())));
        }
        self.output.push_str(&format!("</{}>\n", tag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom & Jerry's\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_builder_escapes_text() {
        let page = PageBuilder::new(SectionId::Team)
            .paragraph("<script>alert(1)</script>")
            .finish();
        assert!(page.body.starts_with("<h2>Project Team</h2>"));
        assert!(page.body.contains("&lt;script&gt;"));
        assert!(!page.body.contains("<script>"));
    }

    #[test]
    fn test_empty_list_and_table_still_render() {
        let empty: Vec<String> = Vec::new();
        let rows: Vec<Vec<String>> = Vec::new();
        let page = PageBuilder::untitled(SectionId::Pricing)
            .list(&empty)
            .table(&["Item", "Cost"], &rows)
            .finish();
        assert!(page.body.contains("<ul>\n</ul>"));
        assert!(page.body.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn test_details_and_signatures() {
        let page = PageBuilder::untitled(SectionId::Acceptance)
            .details(&[("Client", "Acme".to_string())])
            .signatures(&[("Client", "Jane Roe".to_string())])
            .finish();
        assert!(page.body.contains("<tr><th>Client</th><td>Acme</td></tr>"));
        assert!(page.body.contains("signature-line"));
    }
}
