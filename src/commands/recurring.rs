// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::state::App;
use crate::utils::{maybe_print_json, parse_date, pretty_table};

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct RuleRow {
    id: String,
    day_of_month: u32,
    r#type: String,
    amount: String,
    category: String,
    note: String,
    last_generated_month: String,
}

fn list(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<RuleRow> = app
        .rules
        .iter()
        .map(|r| RuleRow {
            id: r.id.clone(),
            day_of_month: r.day_of_month,
            r#type: r.r#type.as_str().to_string(),
            amount: r.amount.to_string(),
            category: r.category.clone(),
            note: r.note.clone().unwrap_or_default(),
            last_generated_month: r.last_generated_month.to_string(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.day_of_month.to_string(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                    r.last_generated_month.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Day", "Type", "Amount", "Category", "Note", "Last Generated"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let anchor = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s.trim()))
        .transpose()?;
    app.delete_recurring_rule(id, anchor)?;
    match anchor {
        Some(date) => println!(
            "Removed rule {} and its generated instances after {}",
            id,
            date.format("%Y-%m-%d")
        ),
        None => println!("Removed rule {}", id),
    }
    Ok(())
}
