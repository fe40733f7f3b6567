// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Period;
use super::calendar::{DateWindow, short_label};
use crate::models::{Transaction, TxnKind};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl Totals {
    pub fn savings(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }
}

/// Sums income and expenses dated inside `window`. Undated records are skipped
/// and totals clamp at the `Decimal` bounds.
pub fn totals_in(txns: &[Transaction], window: &DateWindow) -> Totals {
    let mut totals = Totals::default();
    for t in txns.iter().filter(|t| window.holds(t.occurred_on)) {
        match t.kind {
            TxnKind::Income => totals.income = totals.income.saturating_add(t.amount),
            TxnKind::Expense => totals.expenses = totals.expenses.saturating_add(t.amount),
        }
    }
    totals
}

/// One point per calendar month, oldest first, ending with the month of `today`.
///
/// Every month in the window gets a point even when it has no transactions.
pub fn monthly_series(txns: &[Transaction], period: Period, today: NaiveDate) -> Vec<MonthlyPoint> {
    trailing_months(txns, period.months_back(), today)
}

pub fn trailing_months(txns: &[Transaction], months: u32, today: NaiveDate) -> Vec<MonthlyPoint> {
    (0..months)
        .rev()
        .map(|back| {
            let window = DateWindow::months_before(today, back);
            let totals = totals_in(txns, &window);
            MonthlyPoint {
                month: short_label(window.start),
                income: totals.income,
                expenses: totals.expenses,
                savings: totals.savings(),
            }
        })
        .collect()
}
