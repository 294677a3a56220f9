// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthwise::db::Store;
use monthwise::ledger;
use monthwise::models::{Transaction, TransactionType};
use monthwise::month::YearMonth;
use monthwise::state::App;
use monthwise::utils::parse_date;
use monthwise::{cli, commands::transactions};
use rust_decimal::Decimal;

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn setup() -> App {
    let store = Store::open_in_memory().unwrap();
    for i in 1..=3 {
        let t = Transaction {
            id: format!("t{}", i),
            amount: Decimal::from(10),
            category: "Cat1".to_string(),
            date: parse_date(&format!("2025-01-0{}", i)).unwrap(),
            note: None,
            r#type: TransactionType::Expense,
            recurring_rule_id: None,
        };
        ledger::upsert(&store, ym("2025-01"), &t).unwrap();
    }
    App::open(store, ym("2025-01")).unwrap()
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let mut app = setup();
    let m = list_matches(&[
        "monthwise", "tx", "list", "--month", "2025-01", "--limit", "2",
    ]);
    let rows = transactions::query_rows(&mut app, &m).unwrap();
    assert_eq!(rows.len(), 2);
    // Newest insert sits at the head of the partition.
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_defaults_to_the_current_month() {
    let mut app = setup();
    let m = list_matches(&["monthwise", "tx", "list"]);
    let rows = transactions::query_rows(&mut app, &m).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.date.starts_with("2025-01")));
}
