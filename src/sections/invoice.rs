//! Invoice sections.

use super::SectionContext;
use crate::invoice::InvoiceSummary;
use crate::model::{Page, SectionId};
use crate::render::markup::PageBuilder;
use std::borrow::Cow;

/// Totals computed by the composition driver.
///
/// Generators called outside a composition have no validated totals and
/// render an empty invoice.
fn summary<'a>(ctx: &SectionContext<'a>) -> Cow<'a, InvoiceSummary> {
    match ctx.invoice {
        Some(summary) => Cow::Borrowed(summary),
        None => {
            log::warn!("Invoice section rendered without computed totals");
            Cow::Owned(InvoiceSummary::default())
        }
    }
}

pub(super) fn invoice_header(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::untitled(SectionId::InvoiceHeader)
        .raw("<header class=\"invoice-header\">")
        .heading(1, "INVOICE")
        .paragraph_class("company", &f.text("companyInfo.name", "[Your Company]"))
        .raw("</header>")
        .details(&[
            ("Invoice No.", f.document_number("invoiceNumber")),
            ("Issue date", f.date("date")),
            ("Due date", f.date_or("dueDate", "[Due Date]")),
            ("Project", f.text("projectName", "[Project Name]")),
        ])
        .finish()
}

pub(super) fn bill_to(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::BillTo)
        .heading(3, "Bill To")
        .details(&[
            ("Name", f.text("clientName", "[Client Name]")),
            ("Company", f.text("clientCompany", "[Client Company]")),
            ("Address", f.text("clientAddress", "[Client Address]")),
            ("Email", f.text("clientEmail", "[Client Email]")),
        ])
        .heading(3, "From")
        .details(&[
            ("Company", f.text("companyInfo.name", "[Your Company]")),
            ("Address", f.text("companyInfo.address", "[Company Address]")),
            ("Email", f.text("companyInfo.email", "[Company Email]")),
            ("Tax ID", f.text("companyInfo.taxId", "[Tax ID]")),
        ])
        .finish()
}

pub(super) fn line_items(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let summary = summary(ctx);
    let rows: Vec<Vec<String>> = summary
        .items
        .iter()
        .map(|line| {
            let description = if line.item.description.trim().is_empty() {
                "[Description]".to_string()
            } else {
                line.item.description.clone()
            };
            if line.item.is_special && line.item.fixed_amount.is_some() {
                vec![description, "Fixed".to_string(), "Fixed".to_string(), f.money(line.total)]
            } else {
                vec![
                    description,
                    line.item.hours.normalize().to_string(),
                    f.money(line.item.rate),
                    f.money(line.total),
                ]
            }
        })
        .collect();
    PageBuilder::new(SectionId::LineItems)
        .table(&["Description", "Hours", "Rate", "Amount"], &rows)
        .finish()
}

pub(super) fn invoice_totals(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let summary = summary(ctx);
    let mut pairs = vec![
        ("Total hours", summary.total_hours.normalize().to_string()),
        ("Subtotal", f.money(summary.subtotal)),
    ];
    if let Some(rate) = summary.tax_rate {
        pairs.push(("Tax rate", format!("{}%", rate.normalize())));
        pairs.push(("Tax", f.money(summary.tax)));
    }
    PageBuilder::new(SectionId::InvoiceTotals)
        .details(&pairs)
        .callout(&format!("Amount due: {}", f.money(summary.grand_total)))
        .finish()
}

pub(super) fn payment_details(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::PaymentDetails)
        .details(&[
            ("Bank", f.text("payment.bankName", "[Bank Name]")),
            ("Account name", f.text("payment.accountName", "[Account Name]")),
            ("Account number", f.text("payment.accountNumber", "[Account Number]")),
            ("Routing / SWIFT", f.text("payment.routing", "[Routing Number]")),
            ("Reference", f.document_number("invoiceNumber")),
        ])
        .paragraph(&f.text("paymentTerms", "Payment is due within 30 days of the issue date."))
        .finish()
}

pub(super) fn invoice_notes(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::InvoiceNotes)
        .paragraph(&f.text("notes", "Thank you for your business."))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::invoice_from_data;
    use crate::model::DocumentType;
    use crate::render::ComposeOptions;
    use serde_json::json;

    #[test]
    fn test_line_items_use_computed_totals() {
        let data = json!({ "items": [
            { "description": "Development", "hours": 47, "rate": 650 },
            { "description": "Retainer", "isSpecial": true, "fixedAmount": 5000 }
        ]});
        let summary = invoice_from_data(&data).unwrap();
        let options = ComposeOptions::default();
        let outline = [SectionId::LineItems, SectionId::InvoiceTotals];
        let ctx = SectionContext::new(DocumentType::Invoice, &data, &options, &outline)
            .with_invoice(&summary);

        let items = line_items(&ctx);
        assert!(items.body.contains("<td>Development</td><td>47</td><td>$650.00</td><td>$30,550.00</td>"));
        assert!(items.body.contains("<td>Retainer</td><td>Fixed</td><td>Fixed</td><td>$5,000.00</td>"));

        let totals = invoice_totals(&ctx);
        assert!(totals.body.contains("Amount due: $35,550.00"));
        assert!(!totals.body.contains("Tax rate"));
    }

    #[test]
    fn test_sections_without_totals_render_empty_invoice() {
        let data = json!({});
        let options = ComposeOptions::default();
        let outline = [SectionId::InvoiceTotals];
        let ctx = SectionContext::new(DocumentType::Invoice, &data, &options, &outline);
        assert!(invoice_totals(&ctx).body.contains("Amount due: $0.00"));
    }
}
