// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use monthwise::db::Store;
use monthwise::models::CryptoAsset;
use monthwise::portfolio;
use rust_decimal::Decimal;

fn asset(id: &str, amount: i64, price: i64) -> CryptoAsset {
    CryptoAsset {
        id: id.to_string(),
        symbol: id[..3.min(id.len())].to_string(),
        name: id.to_string(),
        amount: Decimal::from(amount),
        average_buy_price: Decimal::from(price),
    }
}

#[test]
fn save_and_load_round_trip() {
    let store = Store::open_in_memory().unwrap();
    assert!(portfolio::load(&store).unwrap().is_empty());

    portfolio::save_asset(&store, asset("bitcoin", 2, 30000)).unwrap();
    portfolio::save_asset(&store, asset("ethereum", 5, 2000)).unwrap();
    let assets = portfolio::load(&store).unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].id, "bitcoin");

    // Same id replaces the holding instead of duplicating it.
    portfolio::save_asset(&store, asset("bitcoin", 3, 28000)).unwrap();
    let assets = portfolio::load(&store).unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].amount, Decimal::from(3));

    portfolio::delete_asset(&store, "bitcoin").unwrap();
    let assets = portfolio::load(&store).unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id, "ethereum");
}

#[test]
fn merge_uses_quantity_weighted_average() {
    let held = asset("bitcoin", 2, 100);
    let merged = portfolio::merge_position(Some(&held), asset("bitcoin", 2, 200));
    assert_eq!(merged.amount, Decimal::from(4));
    assert_eq!(merged.average_buy_price, Decimal::from(150));
}

#[test]
fn merge_without_existing_keeps_incoming() {
    let merged = portfolio::merge_position(None, asset("bitcoin", 1, 40000));
    assert_eq!(merged.amount, Decimal::from(1));
    assert_eq!(merged.average_buy_price, Decimal::from(40000));
}

#[test]
fn valuation_totals_and_percentage() {
    let assets = vec![asset("bitcoin", 2, 100), asset("ethereum", 10, 20)];
    let mut prices = HashMap::new();
    prices.insert("bitcoin".to_string(), Decimal::from(150));
    prices.insert("ethereum".to_string(), Decimal::from(25));

    let v = portfolio::valuation(&assets, &prices);
    assert_eq!(v.total_cost, Decimal::from(400));
    assert_eq!(v.total_value, Decimal::from(550));
    assert_eq!(v.unrealized, Decimal::from(150));
    assert_eq!(v.unrealized_pct, Decimal::new(375, 1));
}

#[test]
fn valuation_handles_missing_quotes_and_zero_cost() {
    let assets = vec![asset("bitcoin", 2, 100)];
    let v = portfolio::valuation(&assets, &HashMap::new());
    assert_eq!(v.total_value, Decimal::ZERO);
    assert_eq!(v.unrealized, Decimal::from(-200));

    let free = vec![asset("airdrop", 10, 0)];
    let v = portfolio::valuation(&free, &HashMap::new());
    assert_eq!(v.unrealized_pct, Decimal::ZERO);
}
