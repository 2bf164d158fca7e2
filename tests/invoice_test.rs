//! Integration tests for the invoice calculator.

use docsmith::invoice::{compute_invoice_with_tax, invoice_from_data, line_items_from_value};
use docsmith::{compose, compute_invoice, Error, LineItem, SectionId};
use rust_decimal::Decimal;
use serde_json::json;

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

#[test]
fn test_hourly_item_total() {
    let summary = compute_invoice(&[LineItem::hourly("Development", dec(47), dec(650))]).unwrap();
    assert_eq!(summary.items[0].total, dec(30550));
    assert_eq!(summary.grand_total, dec(30550));
}

#[test]
fn test_special_item_uses_fixed_amount() {
    let item = LineItem {
        description: "Retainer".to_string(),
        hours: dec(10),
        rate: dec(100),
        is_special: true,
        fixed_amount: Some(dec(5000)),
    };
    let summary = compute_invoice(&[item]).unwrap();
    assert_eq!(summary.grand_total, dec(5000));
}

#[test]
fn test_special_item_without_fixed_amount_bills_hours() {
    let item = LineItem {
        description: "Support".to_string(),
        hours: dec(3),
        rate: dec(80),
        is_special: true,
        fixed_amount: None,
    };
    assert_eq!(compute_invoice(&[item]).unwrap().grand_total, dec(240));
}

#[test]
fn test_grand_total_is_additive() {
    let a = vec![
        LineItem::hourly("Design", Decimal::new(125, 1), dec(90)),
        LineItem::fixed("License", Decimal::new(49999, 2)),
    ];
    let b = vec![LineItem::hourly("QA", Decimal::new(333, 2), Decimal::new(7250, 2))];
    let joined: Vec<LineItem> = a.iter().chain(b.iter()).cloned().collect();

    let total_a = compute_invoice(&a).unwrap().grand_total;
    let total_b = compute_invoice(&b).unwrap().grand_total;
    let total = compute_invoice(&joined).unwrap().grand_total;
    assert_eq!(total, total_a + total_b);
}

#[test]
fn test_money_rounds_half_up() {
    // 0.125 * 1 = 0.125 -> 0.13
    let summary = compute_invoice(&[LineItem::hourly("x", Decimal::new(125, 3), dec(1))]).unwrap();
    assert_eq!(summary.grand_total, Decimal::new(13, 2));
}

#[test]
fn test_negative_values_are_rejected_with_index() {
    let items = vec![
        LineItem::hourly("Ok", dec(1), dec(1)),
        LineItem::hourly("Bad hours", dec(-1), dec(10)),
    ];
    match compute_invoice(&items) {
        Err(Error::InvalidLineItem { index, field, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(field, "hours");
        }
        other => panic!("expected invalid line item, got {:?}", other),
    }

    let items = vec![LineItem::hourly("Bad rate", dec(2), dec(-1))];
    let err = compute_invoice(&items).unwrap_err();
    assert_eq!(err.line_item_index(), Some(0));
}

#[test]
fn test_tax_is_added_to_subtotal() {
    let items = vec![LineItem::hourly("Work", dec(10), dec(100))];
    let summary = compute_invoice_with_tax(&items, Some(Decimal::new(75, 1))).unwrap();
    assert_eq!(summary.subtotal, dec(1000));
    assert_eq!(summary.tax, dec(75));
    assert_eq!(summary.grand_total, dec(1075));

    assert!(matches!(
        compute_invoice_with_tax(&items, Some(dec(-5))),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_items_from_json_strings_and_aliases() {
    let data = json!({ "lineItems": [
        { "description": "Consulting", "quantity": "4", "price": "125.50" },
        { "description": "Setup", "special": true, "specialAmount": 300 }
    ]});
    let items = line_items_from_value(&data).unwrap();
    assert_eq!(items[0].hours, dec(4));
    assert_eq!(items[0].rate, Decimal::new(12550, 2));
    assert!(items[1].is_special);

    let summary = invoice_from_data(&data).unwrap();
    assert_eq!(summary.grand_total, dec(802));
}

#[test]
fn test_malformed_items() {
    assert!(matches!(
        line_items_from_value(&json!({ "items": "lots" })),
        Err(Error::InvalidData(_))
    ));
    assert!(matches!(
        line_items_from_value(&json!({ "items": [{ "hours": "many" }] })),
        Err(Error::InvalidLineItem { index: 0, .. })
    ));
    assert!(line_items_from_value(&json!({})).unwrap().is_empty());
}

#[test]
fn test_invoice_document_totals() {
    let data = json!({
        "items": [
            { "description": "Development", "hours": 47, "rate": 650 },
            { "description": "Retainer", "isSpecial": true, "fixedAmount": 5000 }
        ],
        "taxRate": 10
    });
    let doc = compose("invoice", &data).unwrap();
    let totals = doc.page(SectionId::InvoiceTotals).unwrap();
    assert!(totals.body.contains("$35,550.00"));
    assert!(totals.body.contains("$3,555.00"));
    assert!(totals.body.contains("Amount due: $39,105.00"));
}
