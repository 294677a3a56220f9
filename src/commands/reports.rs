// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger;
use crate::models::TransactionType;
use crate::month::YearMonth;
use crate::state::App;
use crate::utils::{maybe_print_json, parse_month, pretty_table};

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month_summary(app, sub)?,
        Some(("categories", sub)) => categories(app, sub)?,
        Some(("trend", sub)) => trend(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn switch_to_arg_month(app: &mut App, sub: &clap::ArgMatches) -> Result<YearMonth> {
    let month = match sub.get_one::<String>("month") {
        Some(raw) => parse_month(raw.trim())?,
        None => app.current_month(),
    };
    app.switch_month(month)?;
    Ok(month)
}

fn month_summary(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let month = switch_to_arg_month(app, sub)?;
    let income: Decimal = app
        .transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Income)
        .map(|t| t.amount)
        .sum();
    let rows = vec![vec![
        month.to_string(),
        format!("{:.2}", income),
        format!("{:.2}", app.total_spent()),
        format!("{:.2}", app.budget),
        format!("{:.2}", app.remaining_balance()),
    ]];
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expenses", "Budget", "Remaining"],
            rows,
        )
    );
    Ok(())
}

#[derive(Serialize)]
struct CategoryRow {
    category: String,
    total: String,
    percent: String,
}

fn categories(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    switch_to_arg_month(app, sub)?;

    let mut grouped: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for t in app
        .transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
    {
        *grouped.entry(t.category.clone()).or_default() += t.amount;
        total += t.amount;
    }

    let mut by_spend: Vec<(String, Decimal)> = grouped.into_iter().collect();
    by_spend.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<CategoryRow> = by_spend
        .into_iter()
        .map(|(category, amount)| {
            let percent = if total > Decimal::ZERO {
                amount / total * Decimal::from(100)
            } else {
                Decimal::ZERO
            };
            CategoryRow {
                category,
                total: format!("{:.2}", amount),
                percent: format!("{:.1}", percent),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.category.clone(), r.total.clone(), format!("{}%", r.percent)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

/// Reads the trailing months as stored; no materialization happens for
/// months that were never activated.
fn trend(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let months: u32 = *sub.get_one::<u32>("months").unwrap();
    let mut month = app.current_month();
    let mut window = Vec::new();
    for _ in 0..months {
        window.push(month);
        month = month.prev();
    }
    window.reverse();

    let mut rows = Vec::new();
    for month in window {
        let transactions = ledger::list(app.store(), month)?;
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for t in &transactions {
            match t.r#type {
                TransactionType::Income => income += t.amount,
                TransactionType::Expense => expenses += t.amount,
            }
        }
        rows.push(vec![
            month.to_string(),
            format!("{:.2}", income),
            format!("{:.2}", expenses),
        ]);
    }
    println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
    Ok(())
}
