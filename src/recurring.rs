// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::db::Store;
use crate::ledger;
use crate::models::{RecurringRule, Transaction};
use crate::month::YearMonth;

const RULES_KEY: &str = "recurring_rules";

pub fn list_rules(store: &Store) -> Result<Vec<RecurringRule>> {
    match store.get(RULES_KEY)? {
        Some(blob) => serde_json::from_str(&blob).context("failed to fetch data"),
        None => Ok(Vec::new()),
    }
}

pub fn save_rules(store: &Store, rules: &[RecurringRule]) -> Result<()> {
    let blob = serde_json::to_string(rules).context("failed to save data")?;
    store.set(RULES_KEY, &blob)?;
    Ok(())
}

/// Appends; the caller guarantees id uniqueness (ids are uuids).
pub fn add_rule(store: &Store, rule: RecurringRule) -> Result<()> {
    let mut rules = list_rules(store)?;
    rules.push(rule);
    save_rules(store, &rules)
}

pub fn remove_rule(store: &Store, id: &str) -> Result<()> {
    let mut rules = list_rules(store)?;
    rules.retain(|r| r.id != id);
    save_rules(store, &rules)
}

/// Generate the missing instance for every rule whose watermark is behind
/// `month`, then advance the watermarks with one batch write.
///
/// Months that were never activated are not back-filled: the watermark
/// jumps straight to `month`. Re-running for an already-processed month is
/// a no-op because no watermark compares below it. A failure between the
/// instance write and the watermark write leaves the two out of step;
/// there is no rollback.
pub fn materialize(store: &Store, month: YearMonth) -> Result<usize> {
    let mut rules = list_rules(store)?;
    let mut generated = 0;

    for rule in rules.iter_mut() {
        if rule.last_generated_month >= month {
            continue;
        }
        let date = month
            .day(rule.day_of_month)
            .and_time(NaiveTime::MIN)
            .and_utc();
        let instance = Transaction {
            id: Uuid::new_v4().to_string(),
            amount: rule.amount,
            category: rule.category.clone(),
            date,
            note: rule.note.clone(),
            r#type: rule.r#type,
            recurring_rule_id: Some(rule.id.clone()),
        };
        ledger::upsert(store, month, &instance)?;
        rule.last_generated_month = month;
        generated += 1;
    }

    if generated > 0 {
        save_rules(store, &rules)?;
    }
    Ok(generated)
}

/// Remove every generated instance of a rule dated strictly after
/// `from_date`. Within `from_date`'s own month only later-dated instances
/// go; in every later month any instance of the rule goes. Each touched
/// partition is rewritten at most once, and only when its content changed.
pub fn delete_future_instances(
    store: &Store,
    rule_id: &str,
    from_date: DateTime<Utc>,
) -> Result<()> {
    let from_month = YearMonth::containing(from_date);
    for month in ledger::partition_months(store)? {
        if month < from_month {
            continue;
        }
        let transactions = ledger::list(store, month)?;
        let kept: Vec<Transaction> = transactions
            .iter()
            .filter(|t| {
                let generated_by_rule = t.recurring_rule_id.as_deref() == Some(rule_id);
                !(generated_by_rule && (month > from_month || t.date > from_date))
            })
            .cloned()
            .collect();
        if kept.len() != transactions.len() {
            ledger::write(store, month, &kept)?;
        }
    }
    Ok(())
}
