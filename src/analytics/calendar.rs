// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar-month arithmetic on plain dates. Nothing here looks at a clock or
//! a timezone; callers pass the reference date in.

use chrono::{Datelike, Days, Months, NaiveDate};

pub fn month_start(d: NaiveDate) -> NaiveDate {
    d - Days::new(u64::from(d.day0()))
}

/// First day of the month `back` months before the month containing `d`.
pub fn month_start_before(d: NaiveDate, back: u32) -> NaiveDate {
    month_start(d)
        .checked_sub_months(Months::new(back))
        .unwrap_or(NaiveDate::MIN)
}

pub fn add_months(d: NaiveDate, n: u32) -> NaiveDate {
    d.checked_add_months(Months::new(n))
        .unwrap_or(NaiveDate::MAX)
}

/// Last day of the month containing `d`.
pub fn month_end(d: NaiveDate) -> NaiveDate {
    add_months(month_start(d), 1)
        .pred_opt()
        .unwrap_or(NaiveDate::MAX)
}

pub fn quarter_start(d: NaiveDate) -> NaiveDate {
    month_start_before(d, d.month0() % 3)
}

pub fn year_start(d: NaiveDate) -> NaiveDate {
    month_start_before(d, d.month0())
}

/// An inclusive `[start, end]` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The whole calendar month containing `d`.
    pub fn month_of(d: NaiveDate) -> Self {
        Self::new(month_start(d), month_end(d))
    }

    /// The whole calendar month `back` months before the one containing `d`.
    pub fn months_before(d: NaiveDate, back: u32) -> Self {
        Self::month_of(month_start_before(d, back))
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    /// `true` when `d` is present and inside the window.
    pub fn holds(&self, d: Option<NaiveDate>) -> bool {
        d.is_some_and(|d| self.contains(d))
    }
}

/// `Jan 24`
pub fn short_label(d: NaiveDate) -> String {
    d.format("%b %y").to_string()
}

/// `Jan`
pub fn month_label(d: NaiveDate) -> String {
    d.format("%b").to_string()
}

/// `January 2024`
pub fn long_label(d: NaiveDate) -> String {
    d.format("%B %Y").to_string()
}
