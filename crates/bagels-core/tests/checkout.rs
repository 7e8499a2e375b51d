//! End-to-end checkout: fill a basket, discount it, print the receipt.

use std::sync::Arc;

use bagels_core::{
    Basket, BundleRule, Catalog, Inventory, MemorySink, Money, ReceiptStyle, Rejection,
};
use chrono::NaiveDateTime;

fn till(capacity: usize) -> (Basket, MemorySink) {
    let sink = MemorySink::new();
    let mut basket = Basket::with_output(Arc::new(Catalog::bobs_bagels()), sink.clone());
    basket.change_capacity(capacity);
    (basket, sink)
}

#[test]
fn receipt_printed() {
    let (mut basket, sink) = till(20);

    basket.add_item("BGLE").unwrap();
    basket.add_item("COFB").unwrap();
    for _ in 0..6 {
        basket.add_item("BGLO").unwrap();
    }
    basket
        .apply_bundle(BundleRule::SixBagels, "BGLO", "BGLO")
        .unwrap();

    basket.print_receipt();

    let lines = sink.non_empty_lines();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "     ~~~ Bob's Bagels ~~~");
    assert!(
        NaiveDateTime::parse_from_str(lines[1].trim(), "%Y-%m-%d %H:%M:%S").is_ok(),
        "timestamp line was {:?}",
        lines[1]
    );
    assert_eq!(lines[2], "------------------------------");
    assert_eq!(lines[3], "Everything Bagel      1  £0.49");
    assert_eq!(lines[4], "Black Coffee          1  £0.99");
    assert_eq!(lines[5], "Onion Bagel           6  £2.49");
    assert_eq!(lines[6], "------------------------------");
    assert_eq!(lines[7], "Total                    £3.97");
    assert_eq!(lines[8], "           Thank you");
    assert_eq!(lines[9], "        for your order!");

    let receipt = basket.receipt();
    assert_eq!(receipt.lines_total(), receipt.total);
}

#[test]
fn receipt_keeps_blank_lines() {
    let (mut basket, sink) = till(5);
    basket.add_item("COFL").unwrap();

    basket.print_receipt();

    let lines = sink.lines();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[1], "");
    assert_eq!(lines[3], "");
    assert_eq!(lines[8], "");
}

#[test]
fn a_morning_order() {
    let (mut basket, sink) = till(10);
    let catalog = Catalog::bobs_bagels();

    let breakfast = basket.add_item("BGLS").unwrap();
    basket.add_filling(&breakfast.id, "FILB").unwrap();
    basket.add_filling(&breakfast.id, "FILE").unwrap();
    basket.add_item("COFW").unwrap();

    let expected = catalog.find("BGLS").unwrap().price
        + catalog.find("FILB").unwrap().price
        + catalog.find("FILE").unwrap().price
        + catalog.find("COFW").unwrap().price;
    assert_eq!(basket.total_cost(), expected);

    // Bagel and coffee deal; the fillings stay charged on top.
    basket
        .apply_bundle(BundleRule::BagelAndCoffee, "BGLS", "COFW")
        .unwrap();
    assert_eq!(basket.total_cost(), Money::from_pence(125 + 24));

    // Changing their mind about a second coffee that was never added.
    assert!(!basket.remove_item("COFB"));
    assert_eq!(sink.lines(), vec!["Item not in basket!"]);

    let receipt = basket.receipt();
    let rendered = receipt.render(&ReceiptStyle::default());
    assert_eq!(rendered[5], "Sesame Bagel          1  £0.49");
    assert_eq!(rendered[6], "White Coffee          1  £1.19");
    assert_eq!(rendered[8], "Total                    £1.49");
}

#[test]
fn full_basket_then_bigger_basket() {
    let (mut basket, sink) = till(2);

    basket.add_item("BGLO").unwrap();
    basket.add_item("BGLO").unwrap();
    assert_eq!(
        basket.add_item("BGLO"),
        Err(Rejection::CapacityExceeded { capacity: 2 })
    );
    assert_eq!(sink.non_empty_lines()[0], "Basket size exceeded!");

    basket.change_capacity(12);
    for _ in 0..10 {
        basket.add_item("BGLO").unwrap();
    }
    assert_eq!(basket.count_sku("BGLO"), 12);

    assert!(basket
        .apply_bundle(BundleRule::TwelveBagels, "BGLO", "")
        .unwrap());
    assert_eq!(basket.total_cost(), Money::from_pence(399));

    let receipt = basket.receipt();
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.lines[0].line_total, Money::from_pence(399));
}

#[test]
fn removal_leaves_charge_on_receipt_total() {
    let (mut basket, _) = till(5);
    basket.add_item("BGLO").unwrap();
    basket.add_item("COFB").unwrap();

    basket.remove_item("COFB");
    let receipt = basket.receipt();

    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.lines_total(), Money::from_pence(49));
    assert_eq!(receipt.total, Money::from_pence(148));
}
