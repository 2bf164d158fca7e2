//! Offer and termination letter sections.

use super::{list_or, SectionContext};
use crate::interpolate::Fields;
use crate::model::{DocumentType, Page, SectionId};
use crate::render::markup::{escape_html, PageBuilder};

fn company(f: &Fields<'_>) -> String {
    f.text("companyInfo.name", "[Company Name]")
}

fn candidate(f: &Fields<'_>) -> String {
    f.first_of(&["candidateName", "employeeName"], "[Candidate Name]")
}

fn employee(f: &Fields<'_>) -> String {
    f.first_of(&["employeeName", "candidateName"], "[Employee Name]")
}

fn position(f: &Fields<'_>) -> String {
    f.first_of(&["position", "jobTitle"], "[Position]")
}

fn signatory(f: &Fields<'_>) -> String {
    f.first_of(&["hrContact", "companyInfo.representative"], "[HR Representative]")
}

pub(super) fn letterhead(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let (recipient, address) = match ctx.document_type {
        DocumentType::TerminationLetter => (
            employee(&f),
            f.first_of(&["employeeAddress", "address"], "[Employee Address]"),
        ),
        _ => (
            candidate(&f),
            f.first_of(&["candidateAddress", "address"], "[Candidate Address]"),
        ),
    };
    let contact = format!(
        "{} | {} | {}",
        f.text("companyInfo.address", "[Company Address]"),
        f.text("companyInfo.phone", "[Company Phone]"),
        f.text("companyInfo.email", "[Company Email]")
    );

    PageBuilder::untitled(SectionId::Letterhead)
        .raw("<header class=\"letterhead\">")
        .heading(1, &company(&f))
        .paragraph_class("contact", &contact)
        .raw("</header>")
        .labeled("Date", &f.date("date"))
        .labeled("Reference", &f.document_number("referenceNumber"))
        .raw(&format!(
            "<address><strong>{}</strong><br>{}</address>",
            escape_html(&recipient),
            escape_html(&address)
        ))
        .finish()
}

pub(super) fn offer_details(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let opening = format!(
        "Dear {}, we are delighted to offer you the position of {} at {}.",
        candidate(&f),
        position(&f),
        company(&f)
    );
    PageBuilder::new(SectionId::OfferDetails)
        .paragraph(&opening)
        .details(&[
            ("Position", position(&f)),
            ("Department", f.text("department", "[Department]")),
            ("Reports to", f.text("manager", "[Manager Name]")),
            ("Start date", f.date_or("startDate", "[Start Date]")),
            ("Location", f.text("location", "[Work Location]")),
            ("Employment type", f.text("employmentType", "Full-time")),
        ])
        .finish()
}

pub(super) fn compensation(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut page = PageBuilder::new(SectionId::Compensation).details(&[
        ("Base salary", f.currency("salary", "[Salary]")),
        ("Pay frequency", f.text("payFrequency", "Monthly")),
        ("Bonus", f.text("bonus", "[Bonus Structure]")),
    ]);
    if f.has("equity") {
        page = page.labeled("Equity", &f.text("equity", ""));
    }
    page.paragraph("Compensation is reviewed annually in line with company policy.")
        .finish()
}

pub(super) fn benefits(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let benefits = list_or(
        &f,
        "benefits",
        &[
            "Health, dental and vision insurance",
            "Paid time off and public holidays",
            "Retirement savings plan",
            "Professional development budget",
        ],
    );
    PageBuilder::new(SectionId::Benefits)
        .paragraph(&format!("As an employee of {} you will be eligible for:", company(&f)))
        .list(&benefits)
        .finish()
}

pub(super) fn offer_terms(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let conditions = list_or(
        &f,
        "conditions",
        &[
            "Satisfactory completion of background and reference checks",
            "Proof of eligibility to work in the country of employment",
            "Signing of the company confidentiality agreement",
        ],
    );
    PageBuilder::new(SectionId::OfferTerms)
        .details(&[
            ("Probation period", f.text("probationPeriod", "3 months")),
            ("Working hours", f.text("workHours", "40 hours per week")),
            ("Notice period", f.text("noticePeriod", "[Notice Period]")),
        ])
        .heading(3, "This offer is conditional on")
        .list(&conditions)
        .finish()
}

pub(super) fn offer_acceptance(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::OfferAcceptance)
        .paragraph(&format!(
            "Please confirm your acceptance by signing and returning this letter by {}.",
            f.date_or("offerExpiry", "[Offer Expiry Date]")
        ))
        .paragraph(&format!(
            "We look forward to welcoming you to {}.",
            company(&f)
        ))
        .signatures(&[
            ("For the company", signatory(&f)),
            ("Accepted by", candidate(&f)),
        ])
        .finish()
}

pub(super) fn termination_notice(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let notice = format!(
        "Dear {}, this letter confirms that your employment as {} with {} will end on {}.",
        employee(&f),
        position(&f),
        company(&f),
        f.date_or("terminationDate", "[Termination Date]")
    );
    PageBuilder::new(SectionId::TerminationNotice)
        .paragraph(&notice)
        .labeled("Reason", &f.text("reason", "[Reason for Termination]"))
        .labeled("Last working day", &f.date_or("lastWorkingDay", "[Last Working Day]"))
        .labeled("Notice period", &f.text("noticePeriod", "[Notice Period]"))
        .finish()
}

pub(super) fn final_settlement(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::FinalSettlement)
        .paragraph("Your final settlement consists of the following amounts:")
        .details(&[
            ("Outstanding salary", f.currency("finalPay", "[Final Pay]")),
            ("Accrued leave", f.currency("accruedLeave", "[Accrued Leave]")),
            ("Severance", f.currency("severance", "[Severance]")),
            ("Payment date", f.date_or("settlementDate", "[Settlement Date]")),
        ])
        .paragraph("Statutory deductions apply to all amounts listed above.")
        .finish()
}

pub(super) fn return_of_property(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let items = list_or(
        &f,
        "propertyItems",
        &["Laptop and accessories", "Access cards and keys", "Company documents"],
    );
    PageBuilder::new(SectionId::ReturnOfProperty)
        .paragraph(&format!(
            "Please return the following items to {} no later than {}:",
            signatory(&f),
            f.date_or("returnDeadline", "[Return Deadline]")
        ))
        .list(&items)
        .finish()
}

pub(super) fn termination_acknowledgement(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::TerminationAcknowledgement)
        .paragraph(&format!(
            "We thank you for your contributions to {} and wish you well in the future.",
            company(&f)
        ))
        .signatures(&[
            ("For the company", signatory(&f)),
            ("Acknowledged by", employee(&f)),
        ])
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ComposeOptions;
    use serde_json::json;

    #[test]
    fn test_letterhead_recipient_depends_on_type() {
        let data = json!({ "candidateName": "Ada", "employeeName": "Bob" });
        let options = ComposeOptions::default();
        let outline = [SectionId::Letterhead];

        let offer = SectionContext::new(DocumentType::OfferLetter, &data, &options, &outline);
        assert!(letterhead(&offer).body.contains("<strong>Ada</strong>"));

        let termination =
            SectionContext::new(DocumentType::TerminationLetter, &data, &options, &outline);
        assert!(letterhead(&termination).body.contains("<strong>Bob</strong>"));
    }

    #[test]
    fn test_offer_details_and_compensation() {
        let data = json!({ "candidateName": "Ada", "position": "Engineer", "salary": 95000 });
        let options = ComposeOptions::default();
        let outline = [SectionId::OfferDetails];
        let ctx = SectionContext::new(DocumentType::OfferLetter, &data, &options, &outline);

        let details = offer_details(&ctx);
        assert!(details.body.contains("Dear Ada"));
        assert!(details.body.contains("[Start Date]"));
        assert!(compensation(&ctx).body.contains("$95,000.00"));
    }
}
