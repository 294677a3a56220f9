// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::month::YearMonth;
use crate::state::App;
use crate::utils::{parse_amount, parse_month, pretty_table};

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(app, sub)?,
        Some(("show", sub)) => show(app, sub)?,
        Some(("status", sub)) => status(app, sub)?,
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

fn set(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let month = switch_to_arg_month(app, sub)?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    app.set_budget(amount)?;
    println!("Budget set for {} = {}", month, amount);
    Ok(())
}

fn show(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let month = switch_to_arg_month(app, sub)?;
    println!("Budget for {} is {}", month, app.budget);
    Ok(())
}

fn status(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let month = switch_to_arg_month(app, sub)?;
    let rows = vec![vec![
        month.to_string(),
        format!("{:.2}", app.budget),
        format!("{:.2}", app.total_spent()),
        format!("{:.2}", app.remaining_balance()),
    ]];
    println!(
        "{}",
        pretty_table(&["Month", "Budget", "Spent", "Remaining"], rows)
    );
    Ok(())
}
