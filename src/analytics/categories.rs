// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::DateWindow;
use crate::models::Transaction;

pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9",
];

pub const NO_EXPENSES: &str = "No Expenses";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
    #[serde(skip)]
    pub color_index: usize,
    pub color: String,
}

impl CategorySlice {
    fn new(name: String, value: Decimal, position: usize) -> Self {
        let color_index = position % PALETTE.len();
        Self {
            name,
            value,
            color_index,
            color: PALETTE[color_index].to_string(),
        }
    }
}

/// Running totals keyed case-insensitively, kept in first-seen order.
#[derive(Debug, Default)]
pub struct CategoryTotals {
    order: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn add(&mut self, label: &str, amount: Decimal) {
        let key = label.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.order[i].1 = self.order[i].1.saturating_add(amount),
            None => {
                self.index.insert(key, self.order.len());
                self.order.push((display_name(label), amount));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, Decimal)> {
        self.order
    }
}

fn display_name(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Expense totals by category for the calendar month of `today`.
///
/// Only expenses with a positive amount count. When nothing qualifies the
/// result is a single zero-valued "No Expenses" slice.
pub fn category_breakdown(txns: &[Transaction], today: NaiveDate) -> Vec<CategorySlice> {
    let window = DateWindow::month_of(today);
    let mut totals = CategoryTotals::default();
    for t in txns
        .iter()
        .filter(|t| t.is_expense() && window.holds(t.occurred_on))
        .filter(|t| t.amount > Decimal::ZERO)
    {
        totals.add(t.category_or_other(), t.amount);
    }
    if totals.is_empty() {
        totals.add(NO_EXPENSES, Decimal::ZERO);
    }
    totals
        .into_vec()
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| CategorySlice::new(name, value, i))
        .collect()
}
