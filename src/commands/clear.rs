// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::state::App;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", _)) => {
            app.clear_transactions()?;
            println!("Cleared all transactions (rules, budgets and portfolio kept)");
        }
        Some(("all", _)) => {
            app.clear_all()?;
            println!("Cleared all data");
        }
        _ => {}
    }
    Ok(())
}
