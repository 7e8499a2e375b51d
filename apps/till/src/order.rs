//! # Order Script
//!
//! The till takes an order as a list of tokens, one per step at the counter.
//!
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │ Token                │ Step                                          │
//! ├──────────────────────┼───────────────────────────────────────────────┤
//! │ BGLO                 │ add one Onion Bagel                           │
//! │ BGLS+FILB+FILE       │ add a Sesame Bagel with bacon and egg         │
//! │ -COFB                │ take a Black Coffee back out                  │
//! │ @b6:BGLO             │ six-bagel deal on Onion Bagels                │
//! │ @bac:BGLE,COFB       │ bagel and coffee deal                         │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! Steps replay in order. A rejected addition writes its notice and the rest
//! of the order carries on; a bad bundle stops the order.

use bagels_core::{Basket, BundleRule};
use tracing::{debug, warn};

use crate::error::{TillError, TillResult};

/// One parsed order token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStep {
    Add { sku: String, fillings: Vec<String> },
    Remove { sku: String },
    Bundle {
        rule: BundleRule,
        first: String,
        second: String,
    },
}

impl OrderStep {
    pub fn parse(token: &str) -> TillResult<Self> {
        let token = token.trim();

        if let Some(bundle) = token.strip_prefix('@') {
            let (code, skus) = bundle
                .split_once(':')
                .ok_or_else(|| TillError::invalid_order(token, "expected @RULE:SKU[,SKU]"))?;
            let rule: BundleRule = code.parse()?;

            let mut skus = skus.split(',').map(str::trim);
            let first = skus.next().unwrap_or_default();
            if first.is_empty() {
                return Err(TillError::invalid_order(token, "bundle needs a SKU"));
            }
            let second = skus.next().unwrap_or_default();
            if skus.next().is_some() {
                return Err(TillError::invalid_order(token, "at most two SKUs per bundle"));
            }
            if rule == BundleRule::BagelAndCoffee && second.is_empty() {
                return Err(TillError::invalid_order(token, "bac needs a bagel and a coffee"));
            }

            return Ok(OrderStep::Bundle {
                rule,
                first: first.to_string(),
                second: second.to_string(),
            });
        }

        if let Some(sku) = token.strip_prefix('-') {
            if sku.is_empty() {
                return Err(TillError::invalid_order(token, "nothing to remove"));
            }
            if sku.starts_with('-') {
                return Err(TillError::invalid_order(
                    token,
                    "looks like an option; options go before the order",
                ));
            }
            return Ok(OrderStep::Remove {
                sku: sku.to_string(),
            });
        }

        let mut parts = token.split('+');
        let sku = parts.next().unwrap_or_default();
        if sku.is_empty() {
            return Err(TillError::invalid_order(token, "missing SKU"));
        }

        let fillings: Vec<String> = parts.map(str::to_string).collect();
        if fillings.iter().any(String::is_empty) {
            return Err(TillError::invalid_order(token, "empty filling"));
        }

        Ok(OrderStep::Add {
            sku: sku.to_string(),
            fillings,
        })
    }
}

/// Parses every token, failing on the first bad one.
pub fn parse_order<S: AsRef<str>>(tokens: &[S]) -> TillResult<Vec<OrderStep>> {
    tokens.iter().map(|t| OrderStep::parse(t.as_ref())).collect()
}

/// What happened while replaying an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOutcome {
    pub added: usize,
    pub rejected: usize,
    pub removed: usize,
    pub fillings: usize,
    pub bundles_applied: usize,
    pub bundles_skipped: usize,
}

/// Replays `steps` against `basket`.
pub fn run_order(basket: &mut Basket, steps: &[OrderStep]) -> TillResult<OrderOutcome> {
    let mut outcome = OrderOutcome::default();

    for step in steps {
        match step {
            OrderStep::Add { sku, fillings } => match basket.add_item(sku) {
                Ok(unit) => {
                    outcome.added += 1;
                    for filling in fillings {
                        if basket.add_filling(&unit.id, filling)?.is_some() {
                            outcome.fillings += 1;
                        }
                    }
                }
                Err(rejection) => {
                    warn!(sku = %sku, reason = %rejection, "Order step rejected");
                    outcome.rejected += 1;
                }
            },
            OrderStep::Remove { sku } => {
                if basket.remove_item(sku) {
                    outcome.removed += 1;
                }
            }
            OrderStep::Bundle {
                rule,
                first,
                second,
            } => {
                if basket.apply_bundle(*rule, first, second)? {
                    outcome.bundles_applied += 1;
                } else {
                    debug!(rule = %rule, sku = %first, "Bundle not applied");
                    outcome.bundles_skipped += 1;
                }
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bagels_core::{Catalog, CoreError, MemorySink, Money};

    use super::*;

    fn basket(capacity: usize) -> (Basket, MemorySink) {
        let sink = MemorySink::new();
        let mut basket = Basket::with_output(Arc::new(Catalog::bobs_bagels()), sink.clone());
        basket.change_capacity(capacity);
        (basket, sink)
    }

    #[test]
    fn test_parse_tokens() {
        let steps = parse_order(&["BGLS+FILB+FILE", "-COFB", "@bac:BGLS,COFW", "@B6:BGLO"]).unwrap();

        assert_eq!(
            steps,
            vec![
                OrderStep::Add {
                    sku: "BGLS".into(),
                    fillings: vec!["FILB".into(), "FILE".into()],
                },
                OrderStep::Remove { sku: "COFB".into() },
                OrderStep::Bundle {
                    rule: BundleRule::BagelAndCoffee,
                    first: "BGLS".into(),
                    second: "COFW".into(),
                },
                OrderStep::Bundle {
                    rule: BundleRule::SixBagels,
                    first: "BGLO".into(),
                    second: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert!(matches!(
            OrderStep::parse("@b6"),
            Err(TillError::InvalidOrder { .. })
        ));
        assert!(matches!(
            OrderStep::parse("@bac:BGLO"),
            Err(TillError::InvalidOrder { .. })
        ));
        assert!(matches!(
            OrderStep::parse("BGLO++FILB"),
            Err(TillError::InvalidOrder { .. })
        ));
        assert!(matches!(OrderStep::parse("-"), Err(TillError::InvalidOrder { .. })));
        assert!(matches!(
            OrderStep::parse("--colour"),
            Err(TillError::InvalidOrder { .. })
        ));
        assert!(matches!(
            OrderStep::parse("@b7:BGLO"),
            Err(TillError::Core(CoreError::UnknownBundle(_)))
        ));
    }

    #[test]
    fn test_rejections_do_not_stop_the_order() {
        let (mut basket, sink) = basket(2);
        let steps = parse_order(&["BGLO", "XXXX", "COFB", "BGLP"]).unwrap();

        let outcome = run_order(&mut basket, &steps).unwrap();

        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.rejected, 2);
        assert_eq!(sink.lines(), vec!["Basket size exceeded!"]);
        assert_eq!(basket.total_cost(), Money::from_pence(49 + 99));
    }

    #[test]
    fn test_fillings_attach_to_the_new_unit() {
        let (mut basket, _) = basket(5);
        let steps = parse_order(&["BGLP+FILC+NOPE", "BGLP"]).unwrap();

        let outcome = run_order(&mut basket, &steps).unwrap();

        assert_eq!(outcome.fillings, 1);
        assert_eq!(basket.items()[0].fillings().len(), 1);
        assert!(basket.items()[1].fillings().is_empty());
        assert_eq!(basket.total_cost(), Money::from_pence(39 + 12 + 39));
    }

    #[test]
    fn test_filling_on_coffee_is_an_error() {
        let (mut basket, _) = basket(5);
        let steps = parse_order(&["COFB+FILB"]).unwrap();

        let result = run_order(&mut basket, &steps);

        assert!(matches!(result, Err(TillError::Core(CoreError::NotComposite(_)))));
    }

    #[test]
    fn test_bundles_in_order() {
        let (mut basket, _) = basket(10);
        let mut tokens = vec!["BGLO"; 6];
        tokens.push("@b6:BGLO");
        let steps = parse_order(&tokens).unwrap();

        let outcome = run_order(&mut basket, &steps).unwrap();

        assert_eq!(outcome.bundles_applied, 1);
        assert_eq!(basket.total_cost(), Money::from_pence(249));
    }

    #[test]
    fn test_bundle_below_threshold_is_skipped() {
        let (mut basket, _) = basket(10);
        let steps = parse_order(&["BGLO", "BGLO", "@b6:BGLO"]).unwrap();

        let outcome = run_order(&mut basket, &steps).unwrap();

        assert_eq!(outcome.bundles_skipped, 1);
        assert_eq!(basket.total_cost(), Money::from_pence(98));
    }

    #[test]
    fn test_bundle_on_missing_sku_stops_the_order() {
        let (mut basket, _) = basket(10);
        let steps = parse_order(&["BGLO", "@bac:BGLO,COFB"]).unwrap();

        assert!(matches!(
            run_order(&mut basket, &steps),
            Err(TillError::Core(CoreError::ItemNotInBasket(_)))
        ));
    }

    #[test]
    fn test_remove_keeps_charge() {
        let (mut basket, sink) = basket(5);
        let steps = parse_order(&["COFB", "-COFB", "-COFB"]).unwrap();

        let outcome = run_order(&mut basket, &steps).unwrap();

        assert_eq!(outcome.removed, 1);
        assert!(basket.is_empty());
        assert_eq!(sink.lines(), vec!["Item not in basket!"]);
        assert_eq!(basket.total_cost(), Money::from_pence(99));
    }
}
