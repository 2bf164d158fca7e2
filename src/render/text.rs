//! Plain text rendering for composed documents.

use crate::model::RenderedDocument;
use regex::Regex;
use std::sync::OnceLock;

static STYLE: OnceLock<Regex> = OnceLock::new();
static DIAGRAM: OnceLock<Regex> = OnceLock::new();
static BLOCK_END: OnceLock<Regex> = OnceLock::new();
static CELL_END: OnceLock<Regex> = OnceLock::new();
static TAG: OnceLock<Regex> = OnceLock::new();

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("text pattern is valid"))
}

fn replace(input: String, regex: &Regex, with: &str) -> String {
    regex.replace_all(&input, with).into_owned()
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Visible text of a markup fragment, one line per block.
///
/// Stylesheets and diagram descriptors are not part of the visible text.
pub fn visible_text(markup: &str) -> String {
    let mut output = markup.to_string();
    output = replace(output, cached(&STYLE, r"(?s)<style>.*?</style>"), "");
    output = replace(
        output,
        cached(&DIAGRAM, r#"(?s)<div class="mermaid">.*?</div>"#),
        "",
    );
    output = replace(output, cached(&CELL_END, r"</t[dh]>"), "\t");
    output = replace(
        output,
        cached(
            &BLOCK_END,
            r"(?i)</(p|h[1-6]|li|tr|div|section|address|header)>|<br\s*/?>",
        ),
        "\n",
    );
    output = replace(output, cached(&TAG, r"<[^>]*>"), "");
    let output: String = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    unescape(&output)
}

/// Convert a rendered document to plain text.
pub fn to_text(doc: &RenderedDocument) -> String {
    doc.pages
        .iter()
        .map(|page| visible_text(&page.body))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentType, Page, SectionId};

    #[test]
    fn test_visible_text_strips_markup() {
        let markup = "<style>.a { color: red; }</style>\n<h2>Pricing</h2>\n<p>Tom &amp; Jerry</p>\n<div class=\"mermaid\">\npie\n</div>\n";
        assert_eq!(visible_text(markup), "Pricing\nTom & Jerry");
    }

    #[test]
    fn test_visible_text_tables_and_breaks() {
        let markup = "<table><tr><th>Item</th><th>Cost</th></tr><tr><td>Build</td><td>$10.00</td></tr></table><p>a<br/>b</p>";
        assert_eq!(visible_text(markup), "Item\tCost\nBuild\t$10.00\na\nb");
    }

    #[test]
    fn test_to_text_joins_pages() {
        let doc = RenderedDocument::new(
            DocumentType::Page,
            vec![
                Page::new(SectionId::ArticleHeader, "<h1>Hello</h1>"),
                Page::new(SectionId::ArticleBody, "<p>World</p>"),
            ],
            String::new(),
        );
        assert_eq!(to_text(&doc), "Hello\n\nWorld");
    }
}
