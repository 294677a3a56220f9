// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::ledger;
use crate::recurring;
use crate::state::App;
use crate::utils::pretty_table;

pub fn handle(app: &App) -> Result<()> {
    let mut rows = Vec::new();
    let store = app.store();

    let rule_ids: HashSet<String> = recurring::list_rules(store)?
        .into_iter()
        .map(|r| r.id)
        .collect();

    for month in ledger::partition_months(store)? {
        let transactions = ledger::list(store, month)?;

        // 1) Transactions filed under a partition that doesn't match their date
        for t in &transactions {
            if t.month() != month {
                rows.push(vec![
                    "partition_mismatch".into(),
                    format!("{} dated {} stored in {}", t.id, t.date, month),
                ]);
            }
        }

        // 2) More than one generated instance of a rule in one month
        let mut per_rule: HashMap<&str, usize> = HashMap::new();
        for t in &transactions {
            if let Some(rule_id) = t.recurring_rule_id.as_deref() {
                *per_rule.entry(rule_id).or_default() += 1;
            }
        }
        for (rule_id, count) in per_rule {
            if count > 1 {
                rows.push(vec![
                    "duplicate_rule_instance".into(),
                    format!("rule {} has {} instances in {}", rule_id, count, month),
                ]);
            }
        }

        // 3) Back-references to rules that no longer exist
        for t in &transactions {
            if let Some(rule_id) = t.recurring_rule_id.as_deref() {
                if !rule_ids.contains(rule_id) {
                    rows.push(vec![
                        "orphan_rule_reference".into(),
                        format!("{} in {} references missing rule {}", t.id, month, rule_id),
                    ]);
                }
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
