//! Section generator library.
//!
//! One generator per [`SectionId`]. Every generator reads the shared data
//! object through [`Fields`], may embed diagram descriptors, and returns
//! exactly one [`Page`]. Generators share no mutable state, so the order in
//! which they run never changes their output, and each one renders a
//! complete page from an empty data object.

mod article;
mod invoice;
mod letters;
mod proposal;

use crate::interpolate::{value_to_text, Fields};
use crate::invoice::InvoiceSummary;
use crate::model::{DocumentType, Page, SectionId};
use crate::render::ComposeOptions;
use serde_json::Value;

/// Signature shared by all section generators.
pub type SectionFn = fn(&SectionContext<'_>) -> Page;

/// Read-only inputs shared by every section of one composition.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    /// Type being composed
    pub document_type: DocumentType,
    /// Caller-owned data object
    pub data: &'a Value,
    /// Composition options
    pub options: &'a ComposeOptions,
    /// All sections of the document, in page order
    pub outline: &'a [SectionId],
    /// Invoice totals, computed before generation when a section needs them
    pub invoice: Option<&'a InvoiceSummary>,
}

impl<'a> SectionContext<'a> {
    /// Create a context without invoice totals.
    pub fn new(
        document_type: DocumentType,
        data: &'a Value,
        options: &'a ComposeOptions,
        outline: &'a [SectionId],
    ) -> Self {
        Self {
            document_type,
            data,
            options,
            outline,
            invoice: None,
        }
    }

    /// Attach computed invoice totals.
    pub fn with_invoice(mut self, invoice: &'a InvoiceSummary) -> Self {
        self.invoice = Some(invoice);
        self
    }

    /// Field access for this composition.
    pub fn fields(&self) -> Fields<'a> {
        Fields::new(self.data, self.options).with_id_prefix(self.document_type.id_prefix())
    }
}

/// Look up the generator for a section.
pub fn generator(section: SectionId) -> SectionFn {
    match section {
        SectionId::Cover => proposal::cover,
        SectionId::TableOfContents => article::table_of_contents,
        SectionId::ExecutiveSummary => proposal::executive_summary,
        SectionId::CompanyOverview => proposal::company_overview,
        SectionId::ClientBackground => proposal::client_background,
        SectionId::ProblemStatement => proposal::problem_statement,
        SectionId::Objectives => proposal::objectives,
        SectionId::ScopeOfWork => proposal::scope_of_work,
        SectionId::SolutionOverview => proposal::solution_overview,
        SectionId::Architecture => proposal::architecture,
        SectionId::TechnologyStack => proposal::technology_stack,
        SectionId::Features => proposal::features,
        SectionId::Methodology => proposal::methodology,
        SectionId::Timeline => proposal::timeline,
        SectionId::Milestones => proposal::milestones,
        SectionId::Team => proposal::team,
        SectionId::RolesResponsibilities => proposal::roles_responsibilities,
        SectionId::QualityAssurance => proposal::quality_assurance,
        SectionId::SecurityCompliance => proposal::security_compliance,
        SectionId::RiskMatrix => proposal::risk_matrix,
        SectionId::CommunicationPlan => proposal::communication_plan,
        SectionId::Pricing => proposal::pricing,
        SectionId::PaymentTerms => proposal::payment_terms,
        SectionId::SupportMaintenance => proposal::support_maintenance,
        SectionId::CaseStudies => proposal::case_studies,
        SectionId::Assumptions => proposal::assumptions,
        SectionId::LegalTerms => proposal::legal_terms,
        SectionId::Acceptance => proposal::acceptance,
        SectionId::Letterhead => letters::letterhead,
        SectionId::OfferDetails => letters::offer_details,
        SectionId::Compensation => letters::compensation,
        SectionId::Benefits => letters::benefits,
        SectionId::OfferTerms => letters::offer_terms,
        SectionId::OfferAcceptance => letters::offer_acceptance,
        SectionId::TerminationNotice => letters::termination_notice,
        SectionId::FinalSettlement => letters::final_settlement,
        SectionId::ReturnOfProperty => letters::return_of_property,
        SectionId::TerminationAcknowledgement => letters::termination_acknowledgement,
        SectionId::InvoiceHeader => invoice::invoice_header,
        SectionId::BillTo => invoice::bill_to,
        SectionId::LineItems => invoice::line_items,
        SectionId::InvoiceTotals => invoice::invoice_totals,
        SectionId::PaymentDetails => invoice::payment_details,
        SectionId::InvoiceNotes => invoice::invoice_notes,
        SectionId::ArticleHeader => article::article_header,
        SectionId::ArticleBody => article::article_body,
        SectionId::References => article::references,
        SectionId::AuthorBio => article::author_bio,
    }
}

/// Run the generator for a section.
pub fn generate(section: SectionId, ctx: &SectionContext<'_>) -> Page {
    log::debug!("Generating section '{}' for {}", section, ctx.document_type);
    generator(section)(ctx)
}

/// Items of a narrative list, or the given defaults when the field is absent.
fn list_or(fields: &Fields<'_>, path: &str, defaults: &[&str]) -> Vec<String> {
    let items = fields.strings(path);
    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

/// Text of an array element that may be a plain string or an object.
fn item_text(item: &Value, key: &str, placeholder: &str) -> String {
    match item {
        Value::Object(map) => map
            .get(key)
            .filter(|v| crate::interpolate::is_present(v) && !v.is_object())
            .map(value_to_text)
            .unwrap_or_else(|| placeholder.to_string()),
        other if crate::interpolate::is_present(other) => value_to_text(other),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_section_renders_from_empty_data() {
        let data = json!({});
        let options = ComposeOptions::default();
        let outline = SectionId::ALL;
        for doc_type in DocumentType::ALL {
            let ctx = SectionContext::new(doc_type, &data, &options, &outline);
            for section in SectionId::ALL {
                let page = generate(section, &ctx);
                assert_eq!(page.section, section);
                assert!(!page.is_empty(), "{} rendered empty", section);
            }
        }
    }

    #[test]
    fn test_generators_do_not_depend_on_order() {
        let data = json!({ "projectName": "Atlas", "phases": [{ "name": "Build" }] });
        let options = ComposeOptions::default();
        let outline = [SectionId::Timeline, SectionId::Cover];
        let ctx = SectionContext::new(DocumentType::Proposal, &data, &options, &outline);

        let forward: Vec<Page> = outline.iter().map(|s| generate(*s, &ctx)).collect();
        let mut backward: Vec<Page> = outline.iter().rev().map(|s| generate(*s, &ctx)).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_list_or_and_item_text() {
        let data = json!({ "goals": ["Grow"], "people": [{ "name": "Ada" }, "Bob", {}] });
        let options = ComposeOptions::default();
        let fields = Fields::new(&data, &options);

        assert_eq!(list_or(&fields, "goals", &["x"]), vec!["Grow"]);
        assert_eq!(list_or(&fields, "missing", &["x"]), vec!["x"]);

        let people = fields.array("people");
        assert_eq!(item_text(&people[0], "name", "[Name]"), "Ada");
        assert_eq!(item_text(&people[1], "name", "[Name]"), "Bob");
        assert_eq!(item_text(&people[2], "name", "[Name]"), "[Name]");
    }
}
