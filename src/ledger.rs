// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Store;
use crate::models::Transaction;
use crate::month::YearMonth;

const PARTITION_PREFIX: &str = "txns:";

pub fn partition_key(month: YearMonth) -> String {
    format!("{}{}", PARTITION_PREFIX, month)
}

fn month_of_key(key: &str) -> Option<YearMonth> {
    key.strip_prefix(PARTITION_PREFIX)?.parse().ok()
}

/// All transactions in a month partition, in stored order (newest manual
/// inserts first). An absent partition is an empty one.
pub fn list(store: &Store, month: YearMonth) -> Result<Vec<Transaction>> {
    match store.get(&partition_key(month))? {
        Some(blob) => serde_json::from_str(&blob).context("failed to fetch data"),
        None => Ok(Vec::new()),
    }
}

pub fn write(store: &Store, month: YearMonth, transactions: &[Transaction]) -> Result<()> {
    let blob = serde_json::to_string(transactions).context("failed to save data")?;
    store.set(&partition_key(month), &blob)?;
    Ok(())
}

/// Add or update a transaction in a month partition. An existing id is
/// replaced in place (position preserved); a new one is prepended. The
/// partition blob is rewritten whole either way.
pub fn upsert(store: &Store, month: YearMonth, transaction: &Transaction) -> Result<()> {
    let mut transactions = list(store, month)?;
    match transactions.iter().position(|t| t.id == transaction.id) {
        Some(index) => transactions[index] = transaction.clone(),
        None => transactions.insert(0, transaction.clone()),
    }
    write(store, month, &transactions)
}

/// Remove a transaction by id. The partition is written back even when
/// nothing matched.
pub fn remove(store: &Store, month: YearMonth, id: &str) -> Result<()> {
    let mut transactions = list(store, month)?;
    transactions.retain(|t| t.id != id);
    write(store, month, &transactions)
}

/// Months that currently have a partition, ascending.
pub fn partition_months(store: &Store) -> Result<Vec<YearMonth>> {
    let keys = store.keys(PARTITION_PREFIX)?;
    Ok(keys.iter().filter_map(|k| month_of_key(k)).collect())
}

/// Remove every month partition, leaving rules, budgets and the portfolio
/// in place.
pub fn clear_transactions(store: &Store) -> Result<()> {
    let keys = store.keys(PARTITION_PREFIX)?;
    store.remove_many(&keys)?;
    Ok(())
}
