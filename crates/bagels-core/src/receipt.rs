//! # Receipt
//!
//! Turns a basket into the fixed-width receipt handed to the customer.
//!
//! ## Layout
//! ```text
//!      ~~~ Bob's Bagels ~~~
//!
//!       2026-10-19 08:15:02
//!
//! ------------------------------
//! Everything Bagel      1  £0.49
//! Black Coffee          1  £0.99
//! Onion Bagel           6  £2.49
//! ------------------------------
//! Total                    £3.97
//!
//!            Thank you
//!         for your order!
//! ```
//!
//! ## Bundle Pricing on Lines
//! A line shows the bundle price instead of `quantity × unit price` when its
//! quantity is exactly 6 or 12 **and** the ledger has fewer active charges
//! than the basket has units. The check does not look at which rule fired,
//! so any discount that shortened the ledger makes every 6- or 12-unit line
//! show a bundle price. Fillings are charged in the total but get no line.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::basket::Basket;
use crate::bundle::BundleRule;
use crate::money::Money;
use crate::{RECEIPT_LABEL_WIDTH, RECEIPT_RULE_WIDTH};

/// Shop details printed on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptStyle {
    pub shop_name: String,
    pub currency_symbol: String,
}

impl Default for ReceiptStyle {
    fn default() -> Self {
        ReceiptStyle {
            shop_name: "Bob's Bagels".to_string(),
            currency_symbol: "£".to_string(),
        }
    }
}

/// One line per distinct SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub sku: String,
    /// `"<variant> <name>"`
    pub label: String,
    pub quantity: usize,
    pub line_total: Money,
    /// Set when the bundle price replaced `quantity × unit price`.
    pub bundle: Option<BundleRule>,
}

/// A receipt snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub printed_at: DateTime<Local>,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl Receipt {
    /// Builds the receipt for `basket`, stamped now.
    pub fn from_basket(basket: &Basket) -> Self {
        Self::at(basket, Local::now())
    }

    /// Builds the receipt for `basket` with an explicit timestamp.
    pub fn at(basket: &Basket, printed_at: DateTime<Local>) -> Self {
        let items = basket.items();
        let ledger_short = basket.ledger().active_len() < items.len();

        let mut lines: Vec<ReceiptLine> = Vec::new();
        for unit in items {
            if lines.iter().any(|line| line.sku == unit.sku) {
                continue;
            }

            let quantity = basket.count_sku(&unit.sku);
            let bundle = BundleRule::for_line_quantity(quantity).filter(|_| ledger_short);
            let line_total = match bundle {
                Some(rule) => rule.price(),
                None => unit.unit_price * quantity,
            };

            lines.push(ReceiptLine {
                sku: unit.sku.clone(),
                label: unit.label(),
                quantity,
                line_total,
                bundle,
            });
        }

        Receipt {
            printed_at,
            lines,
            total: basket.total_cost(),
        }
    }

    /// Renders the receipt as text lines, blank lines included.
    pub fn render(&self, style: &ReceiptStyle) -> Vec<String> {
        let rule = "-".repeat(RECEIPT_RULE_WIDTH);
        let symbol = style.currency_symbol.as_str();

        let mut out = vec![
            format!("     ~~~ {} ~~~", style.shop_name),
            String::new(),
            format!("      {}", self.printed_at.format("%Y-%m-%d %H:%M:%S")),
            String::new(),
            rule.clone(),
        ];

        for line in &self.lines {
            out.push(format!(
                "{:<width$}{}  {}",
                line.label,
                line.quantity,
                line.line_total.format_with(symbol),
                width = RECEIPT_LABEL_WIDTH
            ));
        }

        out.push(rule);
        out.push(format!("Total{}{}", " ".repeat(20), self.total.format_with(symbol)));
        out.push(String::new());
        out.push("           Thank you".to_string());
        out.push("        for your order!".to_string());

        out
    }

    /// Sum of the printed line totals.
    ///
    /// Differs from `total` when fillings were added, when a unit was removed
    /// after being charged, or when bundle pricing on lines disagrees with
    /// the ledger.
    pub fn lines_total(&self) -> Money {
        self.lines.iter().map(|line| line.line_total).sum()
    }
}
