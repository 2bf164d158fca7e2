//! Invoice line-item calculation.
//!
//! This is the only part of document assembly that validates its input
//! before rendering: every line item is checked first, and a single invalid
//! item rejects the whole invoice with an error naming its index. No partial
//! totals are ever produced.
//!
//! # Example
//!
//! ```
//! use docsmith::invoice::{compute_invoice, LineItem};
//! use rust_decimal::Decimal;
//!
//! let items = vec![
//!     LineItem::hourly("Development", Decimal::from(47), Decimal::from(650)),
//!     LineItem::fixed("Launch support", Decimal::from(5000)),
//! ];
//! let summary = compute_invoice(&items)?;
//! assert_eq!(summary.grand_total, Decimal::from(35550));
//! # Ok::<(), docsmith::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::interpolate::{is_present, lookup, value_to_decimal, value_to_text};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One billable line of an invoice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What was delivered
    #[serde(default)]
    pub description: String,

    /// Hours worked
    #[serde(default)]
    pub hours: Decimal,

    /// Hourly rate
    #[serde(default)]
    pub rate: Decimal,

    /// Billed at a fixed amount instead of hours × rate
    #[serde(default)]
    pub is_special: bool,

    /// Fixed amount for special items
    #[serde(default)]
    pub fixed_amount: Option<Decimal>,
}

impl LineItem {
    /// An item billed by the hour.
    pub fn hourly(description: impl Into<String>, hours: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            hours,
            rate,
            is_special: false,
            fixed_amount: None,
        }
    }

    /// An item billed at a fixed amount.
    pub fn fixed(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            is_special: true,
            fixed_amount: Some(amount),
            ..Default::default()
        }
    }

    /// Check that every amount on the item is non-negative.
    pub fn validate(&self, index: usize) -> Result<()> {
        let checks = [
            ("hours", Some(self.hours)),
            ("rate", Some(self.rate)),
            ("fixedAmount", self.fixed_amount),
        ];
        for (field, value) in checks {
            if let Some(value) = value {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(Error::InvalidLineItem {
                        index,
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Amount billed for this item, rounded to cents.
    ///
    /// Special items bill their fixed amount; a special item without one
    /// falls back to hours × rate. `index` names the item if hours × rate
    /// does not fit in a decimal.
    pub fn line_total(&self, index: usize) -> Result<Decimal> {
        let raw = match (self.is_special, self.fixed_amount) {
            (true, Some(amount)) => amount,
            (true, None) => {
                log::warn!(
                    "Special line item '{}' has no fixed amount, billing hours x rate",
                    self.description
                );
                self.billed_hours(index)?
            }
            (false, _) => self.billed_hours(index)?,
        };
        Ok(round_money(raw))
    }

    fn billed_hours(&self, index: usize) -> Result<Decimal> {
        self.hours
            .checked_mul(self.rate)
            .ok_or_else(|| Error::InvalidLineItem {
                index,
                field: "total",
                value: format!("{} x {}", self.hours, self.rate),
            })
    }
}

/// A line item with its computed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedLineItem {
    /// Position in the submitted list
    pub index: usize,
    /// The item as submitted
    pub item: LineItem,
    /// Computed total
    pub total: Decimal,
}

/// Sum amounts, or `None` if the sum does not fit in a decimal.
pub fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
}

/// Computed totals of an invoice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Items with totals, in submitted order
    pub items: Vec<ComputedLineItem>,
    /// Billed hours across hourly items
    pub total_hours: Decimal,
    /// Sum of line totals
    pub subtotal: Decimal,
    /// Tax rate in percent, if any
    pub tax_rate: Option<Decimal>,
    /// Tax amount
    pub tax: Decimal,
    /// Amount due
    pub grand_total: Decimal,
}

impl InvoiceSummary {
    /// Check if the invoice has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Compute line totals and the grand total.
pub fn compute_invoice(items: &[LineItem]) -> Result<InvoiceSummary> {
    compute_invoice_with_tax(items, None)
}

/// Compute totals with an optional tax rate in percent.
pub fn compute_invoice_with_tax(
    items: &[LineItem],
    tax_rate: Option<Decimal>,
) -> Result<InvoiceSummary> {
    for (index, item) in items.iter().enumerate() {
        item.validate(index)?;
    }
    if let Some(rate) = tax_rate {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(Error::InvalidData(format!(
                "taxRate must be non-negative (got {})",
                rate
            )));
        }
    }

    let items: Vec<ComputedLineItem> = items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<ComputedLineItem> {
            Ok(ComputedLineItem {
                index,
                item: item.clone(),
                total: item.line_total(index)?,
            })
        })
        .collect::<Result<_>>()?;

    let overflow = |what: &str| Error::InvalidData(format!("invoice {} is out of range", what));
    let total_hours = checked_sum(items.iter().filter(|c| !c.item.is_special).map(|c| c.item.hours))
        .ok_or_else(|| overflow("total hours"))?;
    let subtotal = checked_sum(items.iter().map(|c| c.total))
        .map(round_money)
        .ok_or_else(|| overflow("subtotal"))?;
    let tax = match tax_rate {
        Some(rate) => subtotal
            .checked_mul(rate)
            .and_then(|t| t.checked_div(Decimal::ONE_HUNDRED))
            .map(round_money)
            .ok_or_else(|| overflow("tax"))?,
        None => Decimal::ZERO,
    };
    let grand_total = subtotal
        .checked_add(tax)
        .map(round_money)
        .ok_or_else(|| overflow("grand total"))?;

    log::debug!(
        "Computed invoice: {} items, subtotal {}, grand total {}",
        items.len(),
        subtotal,
        grand_total
    );

    Ok(InvoiceSummary {
        items,
        total_hours,
        subtotal,
        tax_rate,
        tax,
        grand_total,
    })
}

/// Compute the invoice described by a data object.
///
/// Items are read from `items` (or `lineItems`), the tax rate from
/// `taxRate`. A missing item list is an empty invoice.
pub fn invoice_from_data(data: &Value) -> Result<InvoiceSummary> {
    let items = line_items_from_value(data)?;
    let tax_rate = match data.get("taxRate").filter(|v| is_present(v)) {
        Some(value) => Some(value_to_decimal(value).ok_or_else(|| {
            Error::InvalidData(format!("taxRate is not a number: {}", value_to_text(value)))
        })?),
        None => None,
    };
    compute_invoice_with_tax(&items, tax_rate)
}

/// Total investment of a proposal.
///
/// A present `totalCost` is taken as is; otherwise the readable `cost` of
/// every `pricing` entry is summed. `None` when there is nothing to total.
pub fn pricing_total(data: &Value) -> Result<Option<Decimal>> {
    if let Some(total) = lookup(data, "totalCost") {
        return Ok(value_to_decimal(total));
    }
    let entries = match lookup(data, "pricing") {
        Some(Value::Array(entries)) => entries,
        _ => return Ok(None),
    };
    checked_sum(
        entries
            .iter()
            .filter_map(|entry| lookup(entry, "cost"))
            .filter_map(value_to_decimal),
    )
    .map(Some)
    .ok_or_else(|| Error::InvalidData("pricing total is out of range".to_string()))
}

/// Read line items from a data object.
///
/// Numbers may be JSON numbers or numeric strings; missing numbers count as
/// zero. `quantity`/`price` are accepted for `hours`/`rate`.
pub fn line_items_from_value(data: &Value) -> Result<Vec<LineItem>> {
    let list = match data.get("items").or_else(|| data.get("lineItems")) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(list)) => list,
        Some(_) => return Err(Error::InvalidData("items must be an array".to_string())),
    };

    list.iter()
        .enumerate()
        .map(|(index, value)| line_item_from_value(index, value))
        .collect()
}

fn line_item_from_value(index: usize, value: &Value) -> Result<LineItem> {
    let Value::Object(map) = value else {
        return Err(Error::InvalidData(format!(
            "line item at index {} is not an object",
            index
        )));
    };

    let number = |field: &'static str, keys: &[&str]| -> Result<Option<Decimal>> {
        match keys.iter().find_map(|k| map.get(*k)).filter(|v| is_present(v)) {
            None => Ok(None),
            Some(v) => value_to_decimal(v)
                .map(Some)
                .ok_or_else(|| Error::InvalidLineItem {
                    index,
                    field,
                    value: value_to_text(v),
                }),
        }
    };

    let is_special = match map.get("isSpecial").or_else(|| map.get("special")) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    };

    Ok(LineItem {
        description: map
            .get("description")
            .map(value_to_text)
            .unwrap_or_default(),
        hours: number("hours", &["hours", "quantity"])?.unwrap_or_default(),
        rate: number("rate", &["rate", "price"])?.unwrap_or_default(),
        is_special,
        fixed_amount: number("fixedAmount", &["fixedAmount", "specialAmount", "amount"])?,
    })
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
