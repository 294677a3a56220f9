// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budget;
use crate::db::Store;
use crate::ledger;
use crate::models::{RecurringRule, Transaction, TransactionType};
use crate::month::YearMonth;
use crate::recurring;

/// Application state for one viewing session: the store plus a cached view
/// of the currently displayed month. All mutations go through here so the
/// cache never drifts from storage. Passed explicitly; there is no global.
pub struct App {
    store: Store,
    current_month: YearMonth,
    pub transactions: Vec<Transaction>,
    pub rules: Vec<RecurringRule>,
    pub budget: Decimal,
}

impl App {
    pub fn open(store: Store, month: YearMonth) -> Result<Self> {
        let mut app = App {
            store,
            current_month: month,
            transactions: Vec::new(),
            rules: Vec::new(),
            budget: budget::default_budget(),
        };
        app.reload()?;
        Ok(app)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    /// Refresh the cached view. Materialization runs first so recurring
    /// instances exist for the month before it is read.
    pub fn reload(&mut self) -> Result<()> {
        recurring::materialize(&self.store, self.current_month)?;
        self.transactions = ledger::list(&self.store, self.current_month)?;
        self.budget = budget::get_budget(&self.store, self.current_month)?;
        self.rules = recurring::list_rules(&self.store)?;
        Ok(())
    }

    pub fn switch_month(&mut self, month: YearMonth) -> Result<()> {
        self.current_month = month;
        self.reload()
    }

    /// Record a new transaction; with `recurring` set, also create the
    /// monthly rule seeded from it. The rule's watermark starts at the
    /// transaction's own month and the transaction carries the rule's id.
    pub fn add_transaction(&mut self, transaction: Transaction, recurring: bool) -> Result<()> {
        let month = transaction.month();
        let mut transaction = transaction;
        let rule = recurring.then(|| self.rule_from(&transaction));
        if let Some(ref rule) = rule {
            transaction.recurring_rule_id = Some(rule.id.clone());
        }

        ledger::upsert(&self.store, month, &transaction)?;
        if let Some(rule) = rule {
            recurring::add_rule(&self.store, rule)?;
        }

        if month == self.current_month {
            self.reload()?;
        }
        Ok(())
    }

    /// Save an edited transaction, moving it between partitions when the
    /// date changed month, and reconcile its recurrence state:
    /// off->on creates a rule bound to it, on->off retracts the rule and
    /// purges its future instances, on->on leaves the rule alone.
    pub fn update_transaction(
        &mut self,
        transaction: Transaction,
        old_date: Option<DateTime<Utc>>,
        recurring: bool,
    ) -> Result<()> {
        let new_month = transaction.month();
        let old_month = old_date.map(YearMonth::containing).unwrap_or(new_month);

        let mut transaction = transaction;
        let previous_rule_id = transaction.recurring_rule_id.clone();
        let mut new_rule = None;
        match (&previous_rule_id, recurring) {
            (Some(_), true) => {}
            (Some(_), false) => transaction.recurring_rule_id = None,
            (None, true) => {
                let rule = self.rule_from(&transaction);
                transaction.recurring_rule_id = Some(rule.id.clone());
                new_rule = Some(rule);
            }
            (None, false) => {}
        }

        if old_month != new_month {
            ledger::remove(&self.store, old_month, &transaction.id)?;
        }
        ledger::upsert(&self.store, new_month, &transaction)?;

        if let Some(rule) = new_rule {
            recurring::add_rule(&self.store, rule)?;
        } else if let (Some(rule_id), false) = (&previous_rule_id, recurring) {
            recurring::remove_rule(&self.store, rule_id)?;
            recurring::delete_future_instances(&self.store, rule_id, transaction.date)?;
        }

        if new_month == self.current_month || old_month == self.current_month {
            self.reload()?;
        }
        Ok(())
    }

    /// Delete a transaction from the currently displayed month.
    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        ledger::remove(&self.store, self.current_month, id)?;
        self.reload()
    }

    /// Retract a rule. With an anchor date, also purge the instances it
    /// generated after that date; the view reloads when the purge could
    /// have touched the displayed month.
    pub fn delete_recurring_rule(
        &mut self,
        id: &str,
        anchor_date: Option<DateTime<Utc>>,
    ) -> Result<()> {
        recurring::remove_rule(&self.store, id)?;
        if let Some(date) = anchor_date {
            recurring::delete_future_instances(&self.store, id, date)?;
            if YearMonth::containing(date) <= self.current_month {
                self.reload()?;
            }
        } else {
            self.rules = recurring::list_rules(&self.store)?;
        }
        Ok(())
    }

    pub fn set_budget(&mut self, amount: Decimal) -> Result<()> {
        budget::set_budget(&self.store, self.current_month, amount)?;
        self.budget = amount;
        Ok(())
    }

    pub fn clear_transactions(&mut self) -> Result<()> {
        ledger::clear_transactions(&self.store)?;
        self.reload()
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.reload()
    }

    pub fn total_spent(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.r#type == TransactionType::Expense)
            .map(|t| t.amount)
            .sum()
    }

    pub fn remaining_balance(&self) -> Decimal {
        self.budget - self.total_spent()
    }

    fn rule_from(&self, transaction: &Transaction) -> RecurringRule {
        RecurringRule {
            id: Uuid::new_v4().to_string(),
            amount: transaction.amount,
            category: transaction.category.clone(),
            note: transaction.note.clone(),
            r#type: transaction.r#type,
            day_of_month: transaction.date.day(),
            last_generated_month: transaction.month(),
        }
    }
}
