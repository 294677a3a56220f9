// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::Store;
use crate::month::YearMonth;

const BUDGET_PREFIX: &str = "budget:";

pub fn default_budget() -> Decimal {
    Decimal::from(5000)
}

pub fn budget_key(month: YearMonth) -> String {
    format!("{}{}", BUDGET_PREFIX, month)
}

/// Monthly spending ceiling. Absent or unparseable values fall back to the
/// default; storage failures propagate.
pub fn get_budget(store: &Store, month: YearMonth) -> Result<Decimal> {
    let value = store.get(&budget_key(month))?;
    Ok(value
        .and_then(|s| s.parse::<Decimal>().ok())
        .unwrap_or_else(default_budget))
}

pub fn set_budget(store: &Store, month: YearMonth, amount: Decimal) -> Result<()> {
    store.set(&budget_key(month), &amount.to_string())?;
    Ok(())
}
