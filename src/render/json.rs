//! JSON rendering for composed documents.

use crate::error::{Error, Result};
use crate::model::RenderedDocument;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON: its type, every page and the full markup.
pub fn to_json(doc: &RenderedDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

#[derive(Serialize)]
struct PageEntry<'a> {
    section: &'a str,
    title: &'static str,
    anchor: String,
}

/// Table of pages only, without bodies.
pub fn page_listing(doc: &RenderedDocument, format: JsonFormat) -> Result<String> {
    let entries: Vec<PageEntry<'_>> = doc
        .pages
        .iter()
        .map(|page| PageEntry {
            section: page.section.as_str(),
            title: page.section.title(),
            anchor: page.anchor(),
        })
        .collect();
    serialize(&entries, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentType, Page, SectionId};

    fn sample() -> RenderedDocument {
        let pages = vec![Page::new(SectionId::ArticleBody, "<p>Hello</p>")];
        let markup = pages.iter().map(Page::to_markup).collect();
        RenderedDocument::new(DocumentType::Page, pages, markup)
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"document_type\": \"page\""));
        assert!(json.contains("article-body"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_page_listing() {
        let json = page_listing(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"section":"article-body","title":"Content","anchor":"page-article-body"}]"#
        );
    }
}
