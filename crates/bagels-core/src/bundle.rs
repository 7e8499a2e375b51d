//! # Bundle Discounts
//!
//! Named quantity deals that replace several ledger charges with one price.
//!
//! ```text
//! ┌──────┬──────────────────────────────┬──────────────────────────────┬───────┐
//! │ code │ condition                    │ charges waived               │ price │
//! ├──────┼──────────────────────────────┼──────────────────────────────┼───────┤
//! │ b6   │ ≥ 6 units of first SKU       │ 6 × first unit price         │ 2.49  │
//! │ b12  │ ≥ 12 units of first SKU      │ 12 × first unit price        │ 3.99  │
//! │ bac  │ first SKU and second SKU     │ 1 × first, 1 × second price  │ 1.25  │
//! └──────┴──────────────────────────────┴──────────────────────────────┴───────┘
//! ```
//!
//! Charges are matched by amount, not by unit: the engine waives the oldest
//! active charges equal to the unit price of the first unit with the SKU.
//! Units stay in the basket. Nothing stops a rule from being applied twice;
//! a second `b6` over the same six units waives whatever matching charges
//! remain and adds another 2.49.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::basket::{Basket, ChargeSource};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// A named bundle deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleRule {
    /// Six of one bagel.
    #[serde(rename = "b6")]
    SixBagels,
    /// Twelve of one bagel.
    #[serde(rename = "b12")]
    TwelveBagels,
    /// One bagel and one coffee.
    #[serde(rename = "bac")]
    BagelAndCoffee,
}

impl BundleRule {
    pub const fn code(&self) -> &'static str {
        match self {
            BundleRule::SixBagels => "b6",
            BundleRule::TwelveBagels => "b12",
            BundleRule::BagelAndCoffee => "bac",
        }
    }

    /// Price charged in place of the waived charges.
    pub const fn price(&self) -> Money {
        match self {
            BundleRule::SixBagels => Money::from_pence(249),
            BundleRule::TwelveBagels => Money::from_pence(399),
            BundleRule::BagelAndCoffee => Money::from_pence(125),
        }
    }

    /// Units of the first SKU the rule needs and waives.
    pub const fn quantity(&self) -> usize {
        match self {
            BundleRule::SixBagels => 6,
            BundleRule::TwelveBagels => 12,
            BundleRule::BagelAndCoffee => 1,
        }
    }

    /// The single-SKU bundle whose size is exactly `quantity`, if any.
    pub fn for_line_quantity(quantity: usize) -> Option<Self> {
        match quantity {
            6 => Some(BundleRule::SixBagels),
            12 => Some(BundleRule::TwelveBagels),
            _ => None,
        }
    }
}

impl fmt::Display for BundleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BundleRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "b6" => Ok(BundleRule::SixBagels),
            "b12" => Ok(BundleRule::TwelveBagels),
            "bac" => Ok(BundleRule::BagelAndCoffee),
            other => Err(CoreError::UnknownBundle(other.to_string())),
        }
    }
}

impl Basket {
    /// Applies `rule` to the basket.
    ///
    /// `second_sku` is only read by `bac`; single-SKU rules ignore it.
    ///
    /// ## Returns
    /// - `Ok(true)` when the ledger was rewritten
    /// - `Ok(false)` when there are too few units of the first SKU
    /// - `Err(ItemNotInBasket)` when a SKU the rule prices has no unit
    pub fn apply_bundle(
        &mut self,
        rule: BundleRule,
        first_sku: &str,
        second_sku: &str,
    ) -> CoreResult<bool> {
        let first_price = self.first_unit_price(first_sku)?;

        match rule {
            BundleRule::SixBagels | BundleRule::TwelveBagels => {
                let have = self.count_sku(first_sku);
                if have < rule.quantity() {
                    debug!(rule = %rule, sku = %first_sku, have, "Bundle threshold not met");
                    return Ok(false);
                }
                self.waive_charges(first_price, rule.quantity());
            }
            BundleRule::BagelAndCoffee => {
                // Both prices resolved means both SKUs have at least one unit.
                let second_price = self.first_unit_price(second_sku)?;
                self.waive_charges(first_price, 1);
                self.waive_charges(second_price, 1);
            }
        }

        self.ledger
            .record(ChargeSource::Bundle { rule }, rule.price());
        info!(rule = %rule, sku = %first_sku, total = %self.total_cost(), "Bundle applied");

        Ok(true)
    }

    /// Parses `code` and applies the rule.
    pub fn apply_bundle_code(
        &mut self,
        code: &str,
        first_sku: &str,
        second_sku: &str,
    ) -> CoreResult<bool> {
        self.apply_bundle(code.parse()?, first_sku, second_sku)
    }

    fn first_unit_price(&self, sku: &str) -> CoreResult<Money> {
        self.items
            .iter()
            .find(|unit| unit.sku == sku)
            .map(|unit| unit.unit_price)
            .ok_or_else(|| CoreError::ItemNotInBasket(sku.to_string()))
    }

    fn waive_charges(&mut self, amount: Money, count: usize) {
        let waived = self.ledger.waive(amount, count);
        if waived < count {
            warn!(amount = %amount, wanted = count, waived, "Fewer matching charges than bundle size");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::output::MemorySink;

    fn basket_of(skus: &[&str], capacity: usize) -> Basket {
        let mut basket = Basket::with_output(Arc::new(Catalog::bobs_bagels()), MemorySink::new());
        basket.change_capacity(capacity);
        for sku in skus {
            basket.add_item(sku).unwrap();
        }
        basket
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("b6".parse::<BundleRule>().unwrap(), BundleRule::SixBagels);
        assert_eq!("B12".parse::<BundleRule>().unwrap(), BundleRule::TwelveBagels);
        assert_eq!(" bac ".parse::<BundleRule>().unwrap(), BundleRule::BagelAndCoffee);
        assert!(matches!(
            "b7".parse::<BundleRule>(),
            Err(CoreError::UnknownBundle(code)) if code == "b7"
        ));
    }

    #[test]
    fn test_discount_bagel_bundle_6() {
        let mut basket = basket_of(&["BGLE"; 6], 15);

        let applied = basket.apply_bundle(BundleRule::SixBagels, "BGLE", "BGLE").unwrap();

        assert!(applied);
        assert_eq!(basket.total_cost(), Money::from_pence(249));
        assert_eq!(basket.len(), 6);
        assert_eq!(basket.ledger().waived_len(), 6);
    }

    #[test]
    fn test_discount_bagel_bundle_12() {
        let mut basket = basket_of(&["BGLE"; 12], 15);

        basket.apply_bundle(BundleRule::TwelveBagels, "BGLE", "BGLE").unwrap();

        assert_eq!(basket.total_cost(), Money::from_pence(399));
    }

    #[test]
    fn test_discount_coffee_and_bagel() {
        let mut basket = basket_of(&["BGLE", "COFB"], 5);

        basket.apply_bundle(BundleRule::BagelAndCoffee, "BGLE", "COFB").unwrap();

        assert_eq!(basket.total_cost(), Money::from_pence(125));
    }

    #[test]
    fn test_below_threshold_changes_nothing() {
        let mut basket = basket_of(&["BGLO"; 5], 10);

        let applied = basket.apply_bundle(BundleRule::SixBagels, "BGLO", "").unwrap();

        assert!(!applied);
        assert_eq!(basket.total_cost().pence(), 49 * 5);
        assert_eq!(basket.ledger().charges().len(), 5);
    }

    #[test]
    fn test_missing_sku_is_hard_error() {
        let mut basket = basket_of(&["BGLE"], 5);

        let err = basket
            .apply_bundle(BundleRule::BagelAndCoffee, "BGLE", "COFB")
            .unwrap_err();
        assert!(matches!(err, CoreError::ItemNotInBasket(sku) if sku == "COFB"));
        assert_eq!(basket.total_cost().pence(), 49);

        assert!(basket.apply_bundle(BundleRule::SixBagels, "BGLO", "").is_err());
    }

    #[test]
    fn test_waiving_matches_by_amount_across_skus() {
        // BGLO, BGLE and BGLS all cost 0.49; a b6 on BGLO waives any of them.
        let mut basket = basket_of(&["BGLS", "BGLO", "BGLO", "BGLO", "BGLO", "BGLO", "BGLO"], 10);

        basket.apply_bundle(BundleRule::SixBagels, "BGLO", "").unwrap();

        let charges = basket.ledger().charges();
        assert!(charges[0].waived, "oldest 0.49 charge is the sesame bagel");
        assert!(!charges[6].waived);
        assert_eq!(basket.total_cost().pence(), 49 + 249);
    }

    #[test]
    fn test_reapplying_discounts_again() {
        let mut basket = basket_of(&["BGLE"; 6], 15);
        basket.add_item("BGLP").unwrap();

        assert!(basket.apply_bundle(BundleRule::SixBagels, "BGLE", "").unwrap());
        assert!(basket.apply_bundle(BundleRule::SixBagels, "BGLE", "").unwrap());

        // No 0.49 charges were left to waive, but a second 2.49 was added.
        assert_eq!(basket.total_cost().pence(), 39 + 249 + 249);
    }

    #[test]
    fn test_apply_by_code() {
        let mut basket = basket_of(&["BGLP", "COFW"], 5);

        assert!(basket.apply_bundle_code("bac", "BGLP", "COFW").unwrap());
        assert_eq!(basket.total_cost().pence(), 125);

        assert!(basket.apply_bundle_code("b99", "BGLP", "COFW").is_err());
    }

    #[test]
    fn test_bundle_charge_is_recorded_with_rule() {
        let mut basket = basket_of(&["BGLE", "COFB"], 5);
        basket.apply_bundle(BundleRule::BagelAndCoffee, "BGLE", "COFB").unwrap();

        let last = basket.ledger().charges().last().unwrap();
        assert_eq!(
            last.source,
            ChargeSource::Bundle {
                rule: BundleRule::BagelAndCoffee
            }
        );
        assert_eq!(last.amount, Money::from_pence(125));
    }
}
