//! Section identifiers.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One logical section of a document, rendered as one page.
///
/// Each variant maps to exactly one generator in [`crate::sections`]; the
/// mapping is an exhaustive match, so a section without a generator cannot
/// be composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    // Proposal
    Cover,
    TableOfContents,
    ExecutiveSummary,
    CompanyOverview,
    ClientBackground,
    ProblemStatement,
    Objectives,
    ScopeOfWork,
    SolutionOverview,
    Architecture,
    TechnologyStack,
    Features,
    Methodology,
    Timeline,
    Milestones,
    Team,
    RolesResponsibilities,
    QualityAssurance,
    SecurityCompliance,
    RiskMatrix,
    CommunicationPlan,
    Pricing,
    PaymentTerms,
    SupportMaintenance,
    CaseStudies,
    Assumptions,
    LegalTerms,
    Acceptance,

    // Letters
    Letterhead,
    OfferDetails,
    Compensation,
    Benefits,
    OfferTerms,
    OfferAcceptance,
    TerminationNotice,
    FinalSettlement,
    ReturnOfProperty,
    TerminationAcknowledgement,

    // Invoice
    InvoiceHeader,
    BillTo,
    LineItems,
    InvoiceTotals,
    PaymentDetails,
    InvoiceNotes,

    // Articles
    ArticleHeader,
    ArticleBody,
    References,
    AuthorBio,
}

impl SectionId {
    /// Every section, in catalogue order.
    pub const ALL: [SectionId; 48] = [
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
        SectionId::Letterhead,
        SectionId::OfferDetails,
        SectionId::Compensation,
        SectionId::Benefits,
        SectionId::OfferTerms,
        SectionId::OfferAcceptance,
        SectionId::TerminationNotice,
        SectionId::FinalSettlement,
        SectionId::ReturnOfProperty,
        SectionId::TerminationAcknowledgement,
        SectionId::InvoiceHeader,
        SectionId::BillTo,
        SectionId::LineItems,
        SectionId::InvoiceTotals,
        SectionId::PaymentDetails,
        SectionId::InvoiceNotes,
        SectionId::ArticleHeader,
        SectionId::ArticleBody,
        SectionId::References,
        SectionId::AuthorBio,
    ];

    /// Stable kebab-case id, used in page anchors.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Cover => "cover",
            SectionId::TableOfContents => "table-of-contents",
            SectionId::ExecutiveSummary => "executive-summary",
            SectionId::CompanyOverview => "company-overview",
            SectionId::ClientBackground => "client-background",
            SectionId::ProblemStatement => "problem-statement",
            SectionId::Objectives => "objectives",
            SectionId::ScopeOfWork => "scope-of-work",
            SectionId::SolutionOverview => "solution-overview",
            SectionId::Architecture => "architecture",
            SectionId::TechnologyStack => "technology-stack",
            SectionId::Features => "features",
            SectionId::Methodology => "methodology",
            SectionId::Timeline => "timeline",
            SectionId::Milestones => "milestones",
            SectionId::Team => "team",
            SectionId::RolesResponsibilities => "roles-responsibilities",
            SectionId::QualityAssurance => "quality-assurance",
            SectionId::SecurityCompliance => "security-compliance",
            SectionId::RiskMatrix => "risk-matrix",
            SectionId::CommunicationPlan => "communication-plan",
            SectionId::Pricing => "pricing",
            SectionId::PaymentTerms => "payment-terms",
            SectionId::SupportMaintenance => "support-maintenance",
            SectionId::CaseStudies => "case-studies",
            SectionId::Assumptions => "assumptions",
            SectionId::LegalTerms => "legal-terms",
            SectionId::Acceptance => "acceptance",
            SectionId::Letterhead => "letterhead",
            SectionId::OfferDetails => "offer-details",
            SectionId::Compensation => "compensation",
            SectionId::Benefits => "benefits",
            SectionId::OfferTerms => "offer-terms",
            SectionId::OfferAcceptance => "offer-acceptance",
            SectionId::TerminationNotice => "termination-notice",
            SectionId::FinalSettlement => "final-settlement",
            SectionId::ReturnOfProperty => "return-of-property",
            SectionId::TerminationAcknowledgement => "termination-acknowledgement",
            SectionId::InvoiceHeader => "invoice-header",
            SectionId::BillTo => "bill-to",
            SectionId::LineItems => "line-items",
            SectionId::InvoiceTotals => "invoice-totals",
            SectionId::PaymentDetails => "payment-details",
            SectionId::InvoiceNotes => "invoice-notes",
            SectionId::ArticleHeader => "article-header",
            SectionId::ArticleBody => "article-body",
            SectionId::References => "references",
            SectionId::AuthorBio => "author-bio",
        }
    }

    /// Title shown in the table of contents and page headings.
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Cover => "Cover",
            SectionId::TableOfContents => "Table of Contents",
            SectionId::ExecutiveSummary => "Executive Summary",
            SectionId::CompanyOverview => "Company Overview",
            SectionId::ClientBackground => "Client Background",
            SectionId::ProblemStatement => "Problem Statement",
            SectionId::Objectives => "Project Objectives",
            SectionId::ScopeOfWork => "Scope of Work",
            SectionId::SolutionOverview => "Proposed Solution",
            SectionId::Architecture => "System Architecture",
            SectionId::TechnologyStack => "Technology Stack",
            SectionId::Features => "Key Features",
            SectionId::Methodology => "Methodology",
            SectionId::Timeline => "Project Timeline",
            SectionId::Milestones => "Milestones & Deliverables",
            SectionId::Team => "Project Team",
            SectionId::RolesResponsibilities => "Roles & Responsibilities",
            SectionId::QualityAssurance => "Quality Assurance",
            SectionId::SecurityCompliance => "Security & Compliance",
            SectionId::RiskMatrix => "Risk Assessment",
            SectionId::CommunicationPlan => "Communication Plan",
            SectionId::Pricing => "Investment Summary",
            SectionId::PaymentTerms => "Payment Terms",
            SectionId::SupportMaintenance => "Support & Maintenance",
            SectionId::CaseStudies => "Case Studies",
            SectionId::Assumptions => "Assumptions & Dependencies",
            SectionId::LegalTerms => "Terms & Conditions",
            SectionId::Acceptance => "Acceptance",
            SectionId::Letterhead => "Letterhead",
            SectionId::OfferDetails => "Offer of Employment",
            SectionId::Compensation => "Compensation",
            SectionId::Benefits => "Benefits",
            SectionId::OfferTerms => "Terms of Employment",
            SectionId::OfferAcceptance => "Acceptance of Offer",
            SectionId::TerminationNotice => "Notice of Termination",
            SectionId::FinalSettlement => "Final Settlement",
            SectionId::ReturnOfProperty => "Return of Company Property",
            SectionId::TerminationAcknowledgement => "Acknowledgement",
            SectionId::InvoiceHeader => "Invoice",
            SectionId::BillTo => "Billing Details",
            SectionId::LineItems => "Services Rendered",
            SectionId::InvoiceTotals => "Summary",
            SectionId::PaymentDetails => "Payment Details",
            SectionId::InvoiceNotes => "Notes",
            SectionId::ArticleHeader => "Header",
            SectionId::ArticleBody => "Content",
            SectionId::References => "References",
            SectionId::AuthorBio => "About the Author",
        }
    }

    /// Whether the section reads computed invoice totals.
    ///
    /// Documents listing such a section run the invoice validation pass
    /// before any section is generated.
    pub fn needs_invoice(&self) -> bool {
        matches!(self, SectionId::LineItems | SectionId::InvoiceTotals)
    }

    /// Whether the section shows the proposal's total investment.
    pub fn needs_pricing(&self) -> bool {
        matches!(self, SectionId::ExecutiveSummary | SectionId::Pricing)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        SectionId::ALL
            .iter()
            .find(|id| id.as_str() == normalized)
            .copied()
            .ok_or_else(|| Error::Registry(format!("unknown section id: {}", s)))
    }
}
