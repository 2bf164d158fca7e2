//! Document-level types.

use super::{Page, SectionId};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A kind of document the engine knows how to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// Multi-page business proposal
    Proposal,
    /// Employment offer letter
    OfferLetter,
    /// Line-itemized invoice
    Invoice,
    /// Employment termination letter
    TerminationLetter,
    /// Generic documentation page with references
    Documentation,
    /// Generic single page
    Page,
    /// Blog article
    Blog,
}

impl DocumentType {
    /// All document types, in registration order.
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Proposal,
        DocumentType::OfferLetter,
        DocumentType::Invoice,
        DocumentType::TerminationLetter,
        DocumentType::Documentation,
        DocumentType::Page,
        DocumentType::Blog,
    ];

    /// Stable identifier used by callers and in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Proposal => "proposal",
            DocumentType::OfferLetter => "offer-letter",
            DocumentType::Invoice => "invoice",
            DocumentType::TerminationLetter => "termination-letter",
            DocumentType::Documentation => "documentation",
            DocumentType::Page => "page",
            DocumentType::Blog => "blog",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::Proposal => "Business Proposal",
            DocumentType::OfferLetter => "Offer Letter",
            DocumentType::Invoice => "Invoice",
            DocumentType::TerminationLetter => "Termination Letter",
            DocumentType::Documentation => "Documentation",
            DocumentType::Page => "Page",
            DocumentType::Blog => "Blog Post",
        }
    }

    /// Prefix used for generated document numbers (e.g. `INV-2026-0042`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            DocumentType::Proposal => "PROP",
            DocumentType::OfferLetter => "OFR",
            DocumentType::Invoice => "INV",
            DocumentType::TerminationLetter => "TRM",
            DocumentType::Documentation => "DOC",
            DocumentType::Page => "PG",
            DocumentType::Blog => "BLOG",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    /// Parse a document type id. Case-insensitive, `_` is accepted for `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        DocumentType::ALL
            .iter()
            .find(|t| t.as_str() == normalized)
            .copied()
            .ok_or_else(|| Error::UnknownDocumentType(s.to_string()))
    }
}

/// The output of a composition: ordered pages plus the final markup.
///
/// A rendered document is never edited in place. Re-rendering produces a
/// new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Type the document was composed as
    pub document_type: DocumentType,

    /// Pages in section order
    pub pages: Vec<Page>,

    /// Stylesheet followed by every page block
    pub markup: String,
}

impl RenderedDocument {
    /// Create a rendered document from its parts.
    pub fn new(document_type: DocumentType, pages: Vec<Page>, markup: String) -> Self {
        Self {
            document_type,
            pages,
            markup,
        }
    }

    /// The final markup string.
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    /// Consume the document and return its markup.
    pub fn into_string(self) -> String {
        self.markup
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sections in page order.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.pages.iter().map(|p| p.section).collect()
    }

    /// Page anchor ids (`page-<section>`) in page order.
    pub fn page_ids(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.anchor()).collect()
    }

    /// Get the page rendered for a section.
    pub fn page(&self, section: SectionId) -> Option<&Page> {
        self.pages.iter().find(|p| p.section == section)
    }

    /// Check whether the markup contains the given text.
    pub fn contains(&self, needle: &str) -> bool {
        self.markup.contains(needle)
    }

    /// Length of the markup in bytes.
    pub fn len(&self) -> usize {
        self.markup.len()
    }

    /// Check if the markup is empty.
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

impl AsRef<str> for RenderedDocument {
    fn as_ref(&self) -> &str {
        &self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip_ids() {
        for doc_type in DocumentType::ALL {
            let parsed: DocumentType = doc_type.as_str().parse().unwrap();
            assert_eq!(parsed, doc_type);
        }
    }

    #[test]
    fn test_document_type_parse_lenient() {
        assert_eq!(
            "Offer_Letter".parse::<DocumentType>().unwrap(),
            DocumentType::OfferLetter
        );
        assert_eq!(
            " INVOICE ".parse::<DocumentType>().unwrap(),
            DocumentType::Invoice
        );
    }

    #[test]
    fn test_document_type_parse_unknown() {
        let err = "not-a-real-type".parse::<DocumentType>().unwrap_err();
        assert!(matches!(err, Error::UnknownDocumentType(ref id) if id == "not-a-real-type"));
    }

    #[test]
    fn test_document_type_serde() {
        let json = serde_json::to_string(&DocumentType::TerminationLetter).unwrap();
        assert_eq!(json, "\"termination-letter\"");
    }

    #[test]
    fn test_rendered_document_accessors() {
        let pages = vec![
            Page::new(SectionId::Cover, "<h1>Atlas</h1>"),
            Page::new(SectionId::Pricing, "<table></table>"),
        ];
        let markup = pages.iter().map(|p| p.to_markup()).collect::<String>();
        let doc = RenderedDocument::new(DocumentType::Proposal, pages, markup);

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_ids(), vec!["page-cover", "page-pricing"]);
        assert!(doc.contains("Atlas"));
        assert!(doc.page(SectionId::Pricing).is_some());
        assert!(doc.page(SectionId::Team).is_none());
    }
}
