// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthwise::db::Store;
use monthwise::ledger;
use monthwise::models::{Transaction, TransactionType};
use monthwise::month::YearMonth;
use monthwise::recurring;
use monthwise::utils::parse_date;
use rust_decimal::Decimal;

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn tx(id: &str, date: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: Decimal::from(amount),
        category: "Groceries".to_string(),
        date: parse_date(date).unwrap(),
        note: None,
        r#type: TransactionType::Expense,
        recurring_rule_id: None,
    }
}

#[test]
fn upsert_then_list_round_trip() {
    let store = Store::open_in_memory().unwrap();
    let month = ym("2024-05");
    assert!(ledger::list(&store, month).unwrap().is_empty());

    let t = tx("t1", "2024-05-03", 25);
    ledger::upsert(&store, month, &t).unwrap();

    let listed = ledger::list(&store, month).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "t1");
    assert_eq!(listed[0].amount, Decimal::from(25));
    assert_eq!(listed[0].date, t.date);

    ledger::remove(&store, month, "t1").unwrap();
    assert!(ledger::list(&store, month).unwrap().is_empty());
}

#[test]
fn new_transactions_are_prepended() {
    let store = Store::open_in_memory().unwrap();
    let month = ym("2024-05");
    for (id, day) in [("a", "2024-05-01"), ("b", "2024-05-02"), ("c", "2024-05-03")] {
        ledger::upsert(&store, month, &tx(id, day, 10)).unwrap();
    }
    let ids: Vec<String> = ledger::list(&store, month)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
}

#[test]
fn upsert_existing_replaces_in_place() {
    let store = Store::open_in_memory().unwrap();
    let month = ym("2024-05");
    for id in ["a", "b", "c"] {
        ledger::upsert(&store, month, &tx(id, "2024-05-01", 10)).unwrap();
    }

    let mut edited = tx("b", "2024-05-01", 99);
    edited.note = Some("fixed".to_string());
    ledger::upsert(&store, month, &edited).unwrap();

    let listed = ledger::list(&store, month).unwrap();
    let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
    assert_eq!(listed[1].amount, Decimal::from(99));
    assert_eq!(listed[1].note.as_deref(), Some("fixed"));
}

#[test]
fn remove_without_match_is_a_persisted_noop() {
    let store = Store::open_in_memory().unwrap();
    let month = ym("2024-05");
    ledger::upsert(&store, month, &tx("a", "2024-05-01", 10)).unwrap();

    ledger::remove(&store, month, "does-not-exist").unwrap();
    let listed = ledger::list(&store, month).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "a");

    // Removing from an absent partition writes an empty one.
    ledger::remove(&store, ym("2024-09"), "x").unwrap();
    assert!(ledger::list(&store, ym("2024-09")).unwrap().is_empty());
    assert!(
        ledger::partition_months(&store)
            .unwrap()
            .contains(&ym("2024-09"))
    );
}

#[test]
fn partition_months_are_sorted_ascending() {
    let store = Store::open_in_memory().unwrap();
    for (id, date) in [
        ("a", "2024-06-01"),
        ("b", "2024-05-01"),
        ("c", "2023-12-31"),
    ] {
        let t = tx(id, date, 10);
        ledger::upsert(&store, t.month(), &t).unwrap();
    }
    assert_eq!(
        ledger::partition_months(&store).unwrap(),
        vec![ym("2023-12"), ym("2024-05"), ym("2024-06")]
    );
}

#[test]
fn interleaved_read_modify_writes_lose_the_first_update() {
    // There is no locking: two logical operations that read the same
    // partition snapshot clobber each other, and the second write wins.
    let store = Store::open_in_memory().unwrap();
    let month = ym("2024-05");
    ledger::upsert(&store, month, &tx("base", "2024-05-01", 10)).unwrap();

    let snapshot_a = ledger::list(&store, month).unwrap();
    let snapshot_b = ledger::list(&store, month).unwrap();

    let mut with_a = snapshot_a.clone();
    with_a.insert(0, tx("a", "2024-05-02", 11));
    ledger::write(&store, month, &with_a).unwrap();

    let mut with_b = snapshot_b.clone();
    with_b.insert(0, tx("b", "2024-05-03", 12));
    ledger::write(&store, month, &with_b).unwrap();

    let ids: Vec<String> = ledger::list(&store, month)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["b", "base"]);
}

#[test]
fn clear_transactions_spares_rules_and_budgets() {
    let store = Store::open_in_memory().unwrap();
    let t = tx("a", "2024-05-01", 10);
    ledger::upsert(&store, t.month(), &t).unwrap();
    monthwise::budget::set_budget(&store, ym("2024-05"), Decimal::from(800)).unwrap();
    recurring::add_rule(
        &store,
        monthwise::models::RecurringRule {
            id: "r1".to_string(),
            amount: Decimal::from(12),
            category: "Rent".to_string(),
            note: None,
            r#type: TransactionType::Expense,
            day_of_month: 1,
            last_generated_month: ym("2024-05"),
        },
    )
    .unwrap();

    ledger::clear_transactions(&store).unwrap();

    assert!(ledger::partition_months(&store).unwrap().is_empty());
    assert_eq!(
        monthwise::budget::get_budget(&store, ym("2024-05")).unwrap(),
        Decimal::from(800)
    );
    assert_eq!(recurring::list_rules(&store).unwrap().len(), 1);
}
