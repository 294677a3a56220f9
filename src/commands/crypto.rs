// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::market;
use crate::models::CryptoAsset;
use crate::portfolio;
use crate::state::App;
use crate::utils::{parse_amount, parse_decimal, pretty_table};

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        Some(("search", sub)) => search(sub)?,
        Some(("chart", sub)) => chart(sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim().to_lowercase();
    let symbol = sub.get_one::<String>("symbol").unwrap().trim().to_lowercase();
    let name = sub
        .get_one::<String>("name")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| id.clone());
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    let price = parse_decimal(sub.get_one::<String>("price").unwrap().trim())?;

    let incoming = CryptoAsset {
        id: id.clone(),
        symbol,
        name,
        amount,
        average_buy_price: price,
    };
    let assets = portfolio::load(app.store())?;
    let existing = assets.iter().find(|a| a.id == id);
    let merged = portfolio::merge_position(existing, incoming);
    println!(
        "Holding {}: {} @ avg {}",
        merged.id, merged.amount, merged.average_buy_price
    );
    portfolio::save_asset(app.store(), merged)?;
    Ok(())
}

fn live_prices(ids: &[String]) -> HashMap<String, Decimal> {
    let mut out = HashMap::new();
    match market::fetch_prices(ids) {
        Ok(quotes) => {
            for quote in quotes {
                if let Some(px) = quote.current_price.and_then(Decimal::from_f64_retain) {
                    out.insert(quote.id, px);
                }
            }
        }
        Err(err) => eprintln!("Price fetch failed, showing holdings only: {err:#}"),
    }
    out
}

fn list(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let assets = portfolio::load(app.store())?;
    if assets.is_empty() {
        println!("No holdings");
        return Ok(());
    }

    if sub.get_flag("live") {
        let mut ids: Vec<String> = assets.iter().map(|a| a.id.clone()).collect();
        ids.dedup();
        let prices = live_prices(&ids);
        let rows = assets
            .iter()
            .map(|a| {
                let price = prices.get(&a.id).copied().unwrap_or(Decimal::ZERO);
                let value = a.amount * price;
                let cost = a.amount * a.average_buy_price;
                vec![
                    a.name.clone(),
                    a.symbol.to_uppercase(),
                    format!("{:.4}", a.amount),
                    format!("{:.2}", a.average_buy_price),
                    format!("{:.2}", price),
                    format!("{:.2}", value),
                    format!("{:.2}", value - cost),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Symbol", "Amount", "Avg Buy", "Price", "Value", "P/L"],
                rows,
            )
        );
        let totals = portfolio::valuation(&assets, &prices);
        println!(
            "Total {:.2} USD, cost {:.2}, P/L {:.2} ({:.2}%)",
            totals.total_value, totals.total_cost, totals.unrealized, totals.unrealized_pct
        );
    } else {
        let rows = assets
            .iter()
            .map(|a| {
                vec![
                    a.name.clone(),
                    a.symbol.to_uppercase(),
                    format!("{:.4}", a.amount),
                    format!("{:.2}", a.average_buy_price),
                    format!("{:.2}", a.amount * a.average_buy_price),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Symbol", "Amount", "Avg Buy", "Cost"], rows)
        );
    }
    Ok(())
}

fn rm(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim().to_lowercase();
    portfolio::delete_asset(app.store(), &id)?;
    println!("Removed holding {}", id);
    Ok(())
}

fn search(sub: &clap::ArgMatches) -> Result<()> {
    let query = sub.get_one::<String>("query").unwrap().trim();
    let outcome = market::search(query);
    if let Some(message) = outcome.error {
        println!("{}", message);
        return Ok(());
    }
    if outcome.results.is_empty() {
        println!("No coins matched '{}'", query);
        return Ok(());
    }
    let rows = outcome
        .results
        .iter()
        .map(|hit| {
            vec![
                hit.id.clone(),
                hit.name.clone(),
                hit.symbol.to_uppercase(),
                hit.market_cap_rank
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Name", "Symbol", "Rank"], rows));
    Ok(())
}

fn chart(sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim().to_lowercase();
    let days: u32 = *sub.get_one::<u32>("days").unwrap();
    let points = match market::market_chart(&id, days) {
        Ok(points) => points,
        Err(err) => {
            eprintln!("Chart fetch failed: {err:#}");
            return Ok(());
        }
    };
    if points.is_empty() {
        println!("No chart data for '{}'", id);
        return Ok(());
    }
    let rows = points
        .iter()
        .filter_map(|(ts_ms, price)| {
            let when = chrono::DateTime::<Utc>::from_timestamp_millis(*ts_ms as i64)?;
            Some(vec![
                when.format("%Y-%m-%d %H:%M").to_string(),
                format!("{:.2}", price),
            ])
        })
        .collect();
    println!("{}", pretty_table(&["Time (UTC)", "Price (USD)"], rows));
    Ok(())
}
