// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::ledger;
use crate::state::App;
use crate::utils::fmt_date;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(app, sub),
        _ => Ok(()),
    }
}

fn export_transactions(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut all = Vec::new();
    for month in ledger::partition_months(app.store())? {
        for transaction in ledger::list(app.store(), month)? {
            all.push((month, transaction));
        }
    }

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "month",
                "id",
                "date",
                "type",
                "amount",
                "category",
                "note",
                "recurring_rule_id",
            ])?;
            for (month, t) in &all {
                wtr.write_record([
                    month.to_string(),
                    t.id.clone(),
                    fmt_date(t.date),
                    t.r#type.as_str().to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.note.clone().unwrap_or_default(),
                    t.recurring_rule_id.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = all.into_iter().map(|(_, t)| t).collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
