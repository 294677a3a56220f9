// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use monthwise::{cli, commands, db, month::YearMonth, state::App};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = db::open_or_init()?;
    let mut app = App::open(store, YearMonth::now())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut app, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut app, sub)?,
        Some(("crypto", sub)) => commands::crypto::handle(&mut app, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&app, sub)?,
        Some(("clear", sub)) => commands::clear::handle(&mut app, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&app)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
