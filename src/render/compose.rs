//! Composition driver: runs a document type's sections in order and
//! assembles the final markup.

use super::{lint, stylesheet, ComposeOptions};
use crate::error::Result;
use crate::invoice::{invoice_from_data, pricing_total, InvoiceSummary};
use crate::model::{DocumentType, Page, RenderedDocument, SectionId};
use crate::registry::registry;
use crate::sections::{generate, SectionContext};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Compose a document by type id with default options.
pub fn compose(type_id: &str, data: &Value) -> Result<RenderedDocument> {
    compose_with_options(type_id, data, &ComposeOptions::default())
}

/// Compose a document by type id.
pub fn compose_with_options(
    type_id: &str,
    data: &Value,
    options: &ComposeOptions,
) -> Result<RenderedDocument> {
    let document_type = registry().lookup(type_id)?;
    compose_document(document_type, data, options)
}

/// Compose a document of a known type.
pub fn compose_document(
    document_type: DocumentType,
    data: &Value,
    options: &ComposeOptions,
) -> Result<RenderedDocument> {
    Composer::new(options.clone()).compose(document_type, registry().sections(document_type), data)
}

/// One entry of a batch composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    /// Document type id (e.g. `proposal`)
    pub document_type: String,

    /// Data object for the document
    #[serde(default)]
    pub data: Value,
}

impl ComposeRequest {
    /// Create a request.
    pub fn new(document_type: impl Into<String>, data: Value) -> Self {
        Self {
            document_type: document_type.into(),
            data,
        }
    }
}

/// Compose independent requests in parallel.
///
/// Results are returned in request order; one failing request does not
/// affect the others.
pub fn compose_batch(
    requests: &[ComposeRequest],
    options: &ComposeOptions,
) -> Vec<Result<RenderedDocument>> {
    requests
        .par_iter()
        .map(|request| compose_with_options(&request.document_type, &request.data, options))
        .collect()
}

/// Assembles documents from an explicit section list.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: ComposeOptions,
}

impl Composer {
    /// Create a composer.
    pub fn new(options: ComposeOptions) -> Self {
        Self { options }
    }

    /// Options used by this composer.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose `sections` in order. Fails before generating anything when
    /// the data object holds invalid invoice line items or totals that do
    /// not fit in a decimal.
    pub fn compose(
        &self,
        document_type: DocumentType,
        sections: &[SectionId],
        data: &Value,
    ) -> Result<RenderedDocument> {
        log::debug!(
            "Composing {} with {} sections",
            document_type,
            sections.len()
        );

        let invoice = self.validate(sections, data)?;
        let mut ctx = SectionContext::new(document_type, data, &self.options, sections);
        if let Some(ref summary) = invoice {
            ctx = ctx.with_invoice(summary);
        }

        let pages = self.generate_pages(sections, &ctx);
        let markup = self.assemble(&pages);

        if self.options.lint {
            let hits = lint::unresolved_markers(&markup);
            if !hits.is_empty() {
                log::warn!(
                    "{} has unresolved markers: {}",
                    document_type,
                    hits.join(", ")
                );
            }
        }

        Ok(RenderedDocument::new(document_type, pages, markup))
    }

    fn validate(&self, sections: &[SectionId], data: &Value) -> Result<Option<InvoiceSummary>> {
        if sections.iter().any(|s| s.needs_pricing()) {
            pricing_total(data)?;
        }
        if sections.iter().any(|s| s.needs_invoice()) {
            invoice_from_data(data).map(Some)
        } else {
            Ok(None)
        }
    }

    fn generate_pages(&self, sections: &[SectionId], ctx: &SectionContext<'_>) -> Vec<Page> {
        if self.options.parallel {
            sections.par_iter().map(|s| generate(*s, ctx)).collect()
        } else {
            sections.iter().map(|s| generate(*s, ctx)).collect()
        }
    }

    fn assemble(&self, pages: &[Page]) -> String {
        let mut output = String::new();
        if self.options.include_stylesheet {
            output.push_str(&stylesheet(self.options.layout));
        }
        for page in pages {
            output.push_str(&page.to_markup());
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn pinned() -> ComposeOptions {
        ComposeOptions::default().with_today(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }

    #[test]
    fn test_explicit_sections_in_order() {
        let sections = [SectionId::AuthorBio, SectionId::ArticleHeader];
        let doc = Composer::new(pinned().with_stylesheet(false))
            .compose(DocumentType::Blog, &sections, &json!({ "title": "Hi" }))
            .unwrap();

        assert_eq!(doc.section_ids(), sections.to_vec());
        assert!(doc.markup.starts_with("<section class=\"page page-author-bio\""));
    }

    #[test]
    fn test_single_stylesheet_block() {
        let doc = compose_with_options("page", &json!({}), &pinned()).unwrap();
        assert!(doc.markup.starts_with("<style>"));
        assert_eq!(doc.markup.matches("<style>").count(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data = json!({ "projectName": "Atlas", "phases": [{ "name": "Build", "duration": "3 weeks" }] });
        let parallel = compose_with_options("proposal", &data, &pinned()).unwrap();
        let sequential = compose_with_options("proposal", &data, &pinned().sequential()).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_invalid_invoice_produces_no_document() {
        let data = json!({ "items": [{ "description": "x", "hours": -1, "rate": 10 }] });
        let err = compose_with_options("invoice", &data, &pinned()).unwrap_err();
        assert_eq!(err.line_item_index(), Some(0));
    }

    #[test]
    fn test_batch_keeps_request_order() {
        let requests = vec![
            ComposeRequest::new("blog", json!({})),
            ComposeRequest::new("memo", json!({})),
            ComposeRequest::new("invoice", json!({})),
        ];
        let results = compose_batch(&requests, &pinned());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().document_type, DocumentType::Blog);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().document_type, DocumentType::Invoice);
    }
}
