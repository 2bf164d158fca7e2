//! Page-level types.

use super::SectionId;
use serde::{Deserialize, Serialize};

/// Marker emitted after every page block.
pub(crate) const PAGE_BREAK: &str = "<div class=\"page-break\"></div>\n";

/// A single page: exactly one section's fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Section this page was generated by
    pub section: SectionId,

    /// Inner markup of the page
    pub body: String,
}

impl Page {
    /// Create a page for a section.
    pub fn new(section: SectionId, body: impl Into<String>) -> Self {
        Self {
            section,
            body: body.into(),
        }
    }

    /// Stable anchor id used for deep-linking (`page-<section>`).
    pub fn anchor(&self) -> String {
        format!("page-{}", self.section.as_str())
    }

    /// Render the page block followed by its page-break marker.
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 128);
        out.push_str(&format!(
            "<section class=\"page page-{id}\" id=\"page-{id}\" data-section=\"{id}\">\n",
            id = self.section.as_str()
        ));
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</section>\n");
        out.push_str(PAGE_BREAK);
        out
    }

    /// Check if the page has no content.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_markup_wraps_body() {
        let page = Page::new(SectionId::RiskMatrix, "<h2>Risks</h2>");
        let markup = page.to_markup();

        assert!(markup.starts_with("<section class=\"page page-risk-matrix\" id=\"page-risk-matrix\""));
        assert!(markup.contains("<h2>Risks</h2>\n</section>"));
        assert!(markup.ends_with(PAGE_BREAK));
        assert_eq!(page.anchor(), "page-risk-matrix");
    }

    #[test]
    fn test_page_is_empty() {
        assert!(Page::new(SectionId::Cover, "  \n").is_empty());
        assert!(!Page::new(SectionId::Cover, "<p>x</p>").is_empty());
    }
}
