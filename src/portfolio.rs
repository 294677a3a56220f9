// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::db::Store;
use crate::models::CryptoAsset;

const PORTFOLIO_KEY: &str = "crypto_portfolio";

pub fn load(store: &Store) -> Result<Vec<CryptoAsset>> {
    match store.get(PORTFOLIO_KEY)? {
        Some(blob) => serde_json::from_str(&blob).context("failed to fetch data"),
        None => Ok(Vec::new()),
    }
}

fn save(store: &Store, assets: &[CryptoAsset]) -> Result<()> {
    let blob = serde_json::to_string(assets).context("failed to save data")?;
    store.set(PORTFOLIO_KEY, &blob)?;
    Ok(())
}

/// Replace the holding with the same id, or append a new one.
pub fn save_asset(store: &Store, asset: CryptoAsset) -> Result<()> {
    let mut assets = load(store)?;
    match assets.iter().position(|a| a.id == asset.id) {
        Some(index) => assets[index] = asset,
        None => assets.push(asset),
    }
    save(store, &assets)
}

pub fn delete_asset(store: &Store, id: &str) -> Result<()> {
    let mut assets = load(store)?;
    assets.retain(|a| a.id != id);
    save(store, &assets)
}

/// Fold a new buy into an existing holding: quantities add, the average
/// buy price becomes the quantity-weighted mean.
pub fn merge_position(existing: Option<&CryptoAsset>, incoming: CryptoAsset) -> CryptoAsset {
    match existing {
        Some(held) => {
            let total_amount = held.amount + incoming.amount;
            let average_buy_price = if total_amount.is_zero() {
                incoming.average_buy_price
            } else {
                (held.average_buy_price * held.amount
                    + incoming.average_buy_price * incoming.amount)
                    / total_amount
            };
            CryptoAsset {
                amount: total_amount,
                average_buy_price,
                ..incoming
            }
        }
        None => incoming,
    }
}

#[derive(Debug, Clone)]
pub struct Valuation {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub unrealized: Decimal,
    pub unrealized_pct: Decimal,
}

/// Portfolio totals at the given prices; assets without a quote count as
/// worthless rather than failing.
pub fn valuation(assets: &[CryptoAsset], prices: &HashMap<String, Decimal>) -> Valuation {
    let mut total_value = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    for asset in assets {
        let price = prices.get(&asset.id).copied().unwrap_or(Decimal::ZERO);
        total_value += asset.amount * price;
        total_cost += asset.amount * asset.average_buy_price;
    }
    let unrealized = total_value - total_cost;
    let unrealized_pct = if total_cost > Decimal::ZERO {
        unrealized / total_cost * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    Valuation {
        total_value,
        total_cost,
        unrealized,
        unrealized_pct,
    }
}
