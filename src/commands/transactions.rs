// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Datelike;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Transaction, TransactionType};
use crate::month::YearMonth;
use crate::state::App;
use crate::utils::{fmt_date, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_or_current(app: &App, sub: &clap::ArgMatches) -> Result<YearMonth> {
    match sub.get_one::<String>("month") {
        Some(raw) => parse_month(raw.trim()),
        None => Ok(app.current_month()),
    }
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    if category.is_empty() {
        bail!("Category must not be empty");
    }
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let r#type = if sub.get_flag("income") {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let recurring = sub.get_flag("recurring");

    let transaction = Transaction {
        id: Uuid::new_v4().to_string(),
        amount,
        category: category.clone(),
        date,
        note,
        r#type,
        recurring_rule_id: None,
    };
    let day = date.day();
    app.add_transaction(transaction, recurring)?;

    println!(
        "Recorded {} {} '{}' on {}",
        r#type.as_str(),
        amount,
        category,
        fmt_date(date)
    );
    if recurring {
        println!("Repeats monthly on day {}", day);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub note: String,
    pub recurring: bool,
}

pub fn query_rows(app: &mut App, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = month_or_current(app, sub)?;
    app.switch_month(month)?;

    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(usize::MAX);
    Ok(app
        .transactions
        .iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: fmt_date(t.date),
            r#type: t.r#type.as_str().to_string(),
            amount: t.amount.to_string(),
            category: t.category.clone(),
            note: t.note.clone().unwrap_or_default(),
            recurring: t.recurring_rule_id.is_some(),
        })
        .collect())
}

fn list(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                    if r.recurring { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Note", "Recurring"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(app, sub)?;
    app.switch_month(month)?;

    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    let Some(existing) = app.transactions.iter().find(|t| t.id == id).cloned() else {
        bail!("Transaction '{}' not found in {}", id, month);
    };

    let old_date = existing.date;
    let mut transaction = existing;
    if let Some(raw) = sub.get_one::<String>("date") {
        transaction.date = parse_date(raw.trim())?;
    }
    if let Some(raw) = sub.get_one::<String>("amount") {
        transaction.amount = parse_amount(raw.trim())?;
    }
    if let Some(raw) = sub.get_one::<String>("category") {
        let category = raw.trim().to_string();
        if category.is_empty() {
            bail!("Category must not be empty");
        }
        transaction.category = category;
    }
    if let Some(raw) = sub.get_one::<String>("note") {
        let note = raw.trim().to_string();
        transaction.note = (!note.is_empty()).then_some(note);
    }

    let recurring = if sub.get_flag("recurring") {
        true
    } else if sub.get_flag("no-recurring") {
        false
    } else {
        transaction.recurring_rule_id.is_some()
    };

    let new_month = transaction.month();
    app.update_transaction(transaction, Some(old_date), recurring)?;

    if new_month != month {
        println!("Updated transaction {} (moved {} -> {})", id, month, new_month);
    } else {
        println!("Updated transaction {}", id);
    }
    Ok(())
}

fn rm(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(app, sub)?;
    app.switch_month(month)?;
    let id = sub.get_one::<String>("id").unwrap().trim();
    app.delete_transaction(id)?;
    println!("Deleted transaction {} from {}", id, month);
    Ok(())
}
