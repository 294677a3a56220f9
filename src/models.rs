// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

/// A single financial event. Lives in exactly one month partition, keyed by
/// the year-month of `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub r#type: TransactionType,
    /// Back-reference to the rule that generated this instance; absent for
    /// manually entered transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_rule_id: Option<String>,
}

impl Transaction {
    pub fn month(&self) -> YearMonth {
        YearMonth::containing(self.date)
    }
}

/// A declarative monthly repeat instruction. `last_generated_month` is the
/// watermark: the most recent month an instance exists for. It only moves
/// forward, and at most one instance exists per rule per month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub r#type: TransactionType,
    pub day_of_month: u32,
    pub last_generated_month: YearMonth,
}

/// A crypto holding; `id` is the market data provider's coin id
/// (e.g. "bitcoin").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub amount: Decimal,
    pub average_buy_price: Decimal,
}
