//! Document type registry.
//!
//! Maps every [`DocumentType`] to its ordered list of sections and to its
//! default content: the composition of an empty data object. The built-in
//! table is built once per process and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use docsmith::registry::registry;
//! use docsmith::{DocumentType, SectionId};
//!
//! let sections = registry().sections(DocumentType::Invoice);
//! assert_eq!(sections.first(), Some(&SectionId::InvoiceHeader));
//! ```

use crate::error::{Error, Result};
use crate::model::{DocumentType, RenderedDocument, SectionId};
use crate::render::{ComposeOptions, Composer};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

const PROPOSAL: &[SectionId] = &[
    SectionId::Cover,
    SectionId::TableOfContents,
    SectionId::ExecutiveSummary,
    SectionId::CompanyOverview,
    SectionId::ClientBackground,
    SectionId::ProblemStatement,
    SectionId::Objectives,
    SectionId::ScopeOfWork,
    SectionId::SolutionOverview,
    SectionId::Architecture,
    SectionId::TechnologyStack,
    SectionId::Features,
    SectionId::Methodology,
    SectionId::Timeline,
    SectionId::Milestones,
    SectionId::Team,
    SectionId::RolesResponsibilities,
    SectionId::QualityAssurance,
    SectionId::SecurityCompliance,
    SectionId::RiskMatrix,
    SectionId::CommunicationPlan,
    SectionId::Pricing,
    SectionId::PaymentTerms,
    SectionId::SupportMaintenance,
    SectionId::CaseStudies,
    SectionId::Assumptions,
    SectionId::LegalTerms,
    SectionId::Acceptance,
];

const OFFER_LETTER: &[SectionId] = &[
    SectionId::Letterhead,
    SectionId::OfferDetails,
    SectionId::Compensation,
    SectionId::Benefits,
    SectionId::OfferTerms,
    SectionId::OfferAcceptance,
];

const INVOICE: &[SectionId] = &[
    SectionId::InvoiceHeader,
    SectionId::BillTo,
    SectionId::LineItems,
    SectionId::InvoiceTotals,
    SectionId::PaymentDetails,
    SectionId::InvoiceNotes,
];

const TERMINATION_LETTER: &[SectionId] = &[
    SectionId::Letterhead,
    SectionId::TerminationNotice,
    SectionId::FinalSettlement,
    SectionId::ReturnOfProperty,
    SectionId::TerminationAcknowledgement,
];

const DOCUMENTATION: &[SectionId] = &[
    SectionId::ArticleHeader,
    SectionId::TableOfContents,
    SectionId::ArticleBody,
    SectionId::References,
];

const PAGE: &[SectionId] = &[SectionId::ArticleHeader, SectionId::ArticleBody];

const BLOG: &[SectionId] = &[
    SectionId::ArticleHeader,
    SectionId::ArticleBody,
    SectionId::AuthorBio,
];

/// Built-in section list for a document type.
fn builtin_outline(document_type: DocumentType) -> &'static [SectionId] {
    match document_type {
        DocumentType::Proposal => PROPOSAL,
        DocumentType::OfferLetter => OFFER_LETTER,
        DocumentType::Invoice => INVOICE,
        DocumentType::TerminationLetter => TERMINATION_LETTER,
        DocumentType::Documentation => DOCUMENTATION,
        DocumentType::Page => PAGE,
        DocumentType::Blog => BLOG,
    }
}

/// A registered document type.
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    /// Type this template describes
    pub document_type: DocumentType,

    /// Sections in page order
    pub sections: Vec<SectionId>,

    /// Composition of the empty data object
    pub default_content: RenderedDocument,
}

impl DocumentTemplate {
    fn build(document_type: DocumentType, sections: Vec<SectionId>, composer: &Composer) -> Self {
        let empty = Value::Object(Default::default());
        let default_content = match composer.compose(document_type, &sections, &empty) {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("Default content for {} failed: {}", document_type, e);
                RenderedDocument::new(document_type, Vec::new(), String::new())
            }
        };
        Self {
            document_type,
            sections,
            default_content,
        }
    }
}

/// Registry of document types.
///
/// Templates are stored in [`DocumentType::ALL`] order, one per type, and
/// are indexed by the type's declaration position.
#[derive(Debug, Clone)]
pub struct Registry {
    templates: Vec<DocumentTemplate>,
    composer: Composer,
}

impl Registry {
    /// Build the built-in table with default compose options.
    pub fn builtin() -> Self {
        Self::builtin_with_options(ComposeOptions::default())
    }

    /// Build the built-in table; default contents are composed with `options`.
    pub fn builtin_with_options(options: ComposeOptions) -> Self {
        // Sequential: first use may happen inside a rayon task, and work
        // stealing during initialisation could re-enter `registry()`.
        let composer = Composer::new(options.sequential());
        let templates = DocumentType::ALL
            .iter()
            .map(|t| DocumentTemplate::build(*t, builtin_outline(*t).to_vec(), &composer))
            .collect();
        Self {
            templates,
            composer,
        }
    }

    /// Replace the section list of one type and recompute its default content.
    pub fn with_outline(mut self, document_type: DocumentType, sections: Vec<SectionId>) -> Self {
        let template = DocumentTemplate::build(document_type, sections, &self.composer);
        self.templates[document_type as usize] = template;
        self
    }

    /// Check the table: every type present exactly once, in declaration
    /// order, each with at least one section and no section listed twice.
    pub fn validate(&self) -> Result<()> {
        if self.templates.len() != DocumentType::ALL.len() {
            return Err(Error::Registry(format!(
                "expected {} document types, found {}",
                DocumentType::ALL.len(),
                self.templates.len()
            )));
        }
        for (expected, template) in DocumentType::ALL.iter().zip(&self.templates) {
            if template.document_type != *expected {
                return Err(Error::Registry(format!(
                    "document type {} is missing or out of order",
                    expected
                )));
            }
            if template.sections.is_empty() {
                return Err(Error::Registry(format!(
                    "document type {} has no sections",
                    template.document_type
                )));
            }
            let mut seen = HashSet::new();
            for section in &template.sections {
                if !seen.insert(section) {
                    return Err(Error::Registry(format!(
                        "section {} is listed twice in {}",
                        section, template.document_type
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve a document type id.
    pub fn lookup(&self, type_id: &str) -> Result<DocumentType> {
        type_id.parse()
    }

    /// Registered types in declaration order.
    pub fn document_types(&self) -> Vec<DocumentType> {
        self.templates.iter().map(|t| t.document_type).collect()
    }

    /// Template for a type.
    pub fn template(&self, document_type: DocumentType) -> &DocumentTemplate {
        &self.templates[document_type as usize]
    }

    /// Ordered section list of a type.
    pub fn sections(&self, document_type: DocumentType) -> &[SectionId] {
        &self.template(document_type).sections
    }

    /// Ordered section list of a type id.
    pub fn sections_for(&self, type_id: &str) -> Result<&[SectionId]> {
        Ok(self.sections(self.lookup(type_id)?))
    }

    /// Default content of a type, composed from the empty data object.
    pub fn default_content(&self, document_type: DocumentType) -> &RenderedDocument {
        &self.template(document_type).default_content
    }

    /// Default content of a type id.
    pub fn default_content_for(&self, type_id: &str) -> Result<&RenderedDocument> {
        Ok(self.default_content(self.lookup(type_id)?))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide built-in registry.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry = Registry::builtin();
        let validation = registry.validate();
        if let Err(ref e) = validation {
            log::error!("Built-in registry is invalid: {}", e);
        }
        debug_assert!(validation.is_ok(), "built-in registry is invalid: {:?}", validation);
        log::debug!(
            "Registry ready with {} document types",
            registry.templates.len()
        );
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        assert!(Registry::builtin().validate().is_ok());
        assert!(registry().validate().is_ok());
    }

    #[test]
    fn test_proposal_outline() {
        let sections = registry().sections(DocumentType::Proposal);
        assert_eq!(sections.len(), 28);
        assert_eq!(sections[0], SectionId::Cover);
        assert_eq!(sections[27], SectionId::Acceptance);
    }

    #[test]
    fn test_shared_sections() {
        let r = registry();
        assert!(r.sections(DocumentType::OfferLetter).contains(&SectionId::Letterhead));
        assert!(r.sections(DocumentType::TerminationLetter).contains(&SectionId::Letterhead));
        assert!(r.sections(DocumentType::Documentation).contains(&SectionId::TableOfContents));
    }

    #[test]
    fn test_lookup() {
        let r = registry();
        assert_eq!(r.lookup("offer_letter").unwrap(), DocumentType::OfferLetter);
        assert_eq!(r.lookup("Invoice").unwrap(), DocumentType::Invoice);
        assert!(matches!(
            r.lookup("memo"),
            Err(Error::UnknownDocumentType(id)) if id == "memo"
        ));
    }

    #[test]
    fn test_default_content_matches_outline() {
        let r = registry();
        for t in r.document_types() {
            let doc = r.default_content(t);
            assert_eq!(doc.section_ids(), r.sections(t).to_vec());
            assert!(!doc.is_empty());
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let r = registry();
        assert_eq!(r.sections_for("blog").unwrap().len(), 3);
        assert!(r.default_content_for("invoice").unwrap().contains("page-line-items"));
        assert!(r.default_content_for("memo").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_outline() {
        let registry = Registry::builtin().with_outline(DocumentType::Blog, Vec::new());
        assert!(matches!(registry.validate(), Err(Error::Registry(_))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let registry = Registry::builtin().with_outline(
            DocumentType::Page,
            vec![SectionId::ArticleBody, SectionId::ArticleBody],
        );
        let err = registry.validate().unwrap_err();
        assert!(err.to_string().contains("article-body"));
    }
}
