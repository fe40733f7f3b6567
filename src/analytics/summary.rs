// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Period;
use super::calendar::{DateWindow, add_months, long_label, month_end, quarter_start, year_start};
use super::categories::CategoryTotals;
use super::funds::total_current_value;
use super::monthly::totals_in;
use crate::errors::PeriodError;
use crate::models::{FundPosition, Transaction, TxnKind, UserProfile};
use crate::utils::capped_percent;

pub const ROLLOVER_CATEGORY: &str = "savings rollover";
pub const ROLLOVER_SOURCE: &str = "automatic rollover";

/// Headline figures for the current month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub net_savings: Decimal,
    pub mutual_fund_value: Decimal,
    pub savings_goal: Decimal,
    pub savings_progress: Decimal,
    pub total_transactions: usize,
    pub total_funds: usize,
}

pub fn dashboard(
    txns: &[Transaction],
    funds: &[FundPosition],
    profile: &UserProfile,
    today: NaiveDate,
) -> Dashboard {
    let totals = totals_in(txns, &DateWindow::month_of(today));
    let net_savings = totals.savings();
    // an unset (zero) target falls back to the default goal
    let savings_goal = if profile.savings_target > Decimal::ZERO {
        profile.savings_target
    } else {
        UserProfile::default().savings_target
    };
    let savings_progress =
        capped_percent(net_savings, savings_goal).min(Decimal::ONE_HUNDRED);
    Dashboard {
        monthly_income: totals.income,
        monthly_expenses: totals.expenses,
        net_savings,
        mutual_fund_value: total_current_value(funds),
        savings_goal,
        savings_progress,
        total_transactions: txns.len(),
        total_funds: funds.len(),
    }
}

/// Date range covered by a printable report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub period: Period,
    pub window: DateWindow,
}

impl ReportRange {
    /// Explicit `start`/`end` win; otherwise the calendar month, quarter or
    /// year containing `today`.
    pub fn resolve(
        period: Period,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, PeriodError> {
        let window = match (start, end) {
            (Some(s), Some(e)) if s > e => {
                return Err(PeriodError::Inverted {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
            (Some(s), Some(e)) => DateWindow::new(s, e),
            (None, None) => match period {
                Period::Monthly => DateWindow::month_of(today),
                Period::Quarterly => {
                    let start = quarter_start(today);
                    DateWindow::new(start, month_end(add_months(start, 2)))
                }
                Period::Yearly => {
                    let start = year_start(today);
                    DateWindow::new(start, month_end(add_months(start, 11)))
                }
            },
            _ => return Err(PeriodError::HalfOpenRange),
        };
        Ok(Self { period, window })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    pub total_mutual_fund_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundHolding {
    pub name: String,
    pub fund_type: String,
    pub invested: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    pub return_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: ReportSummary,
    pub category_breakdown: Vec<CategoryAmount>,
    pub transactions: Vec<Transaction>,
    pub funds: Vec<FundHolding>,
}

/// Everything a printed report shows for `range`. Fund figures are the
/// latest known values, not values as of the range end.
pub fn period_report(
    txns: &[Transaction],
    funds: &[FundPosition],
    range: &ReportRange,
) -> PeriodReport {
    let window = range.window;
    let mut in_range: Vec<Transaction> = txns
        .iter()
        .filter(|t| window.holds(t.occurred_on))
        .cloned()
        .collect();
    in_range.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));

    let totals = totals_in(&in_range, &window);

    let mut by_category = CategoryTotals::default();
    for t in in_range.iter().filter(|t| t.is_expense()) {
        by_category.add(t.category_or_other(), t.amount);
    }

    PeriodReport {
        period: range.period,
        start: window.start,
        end: window.end,
        summary: ReportSummary {
            total_income: totals.income,
            total_expenses: totals.expenses,
            net_savings: totals.savings(),
            total_mutual_fund_value: total_current_value(funds),
        },
        category_breakdown: by_category
            .into_vec()
            .into_iter()
            .map(|(category, amount)| CategoryAmount { category, amount })
            .collect(),
        transactions: in_range,
        funds: funds
            .iter()
            .map(|f| FundHolding {
                name: f.name.clone(),
                fund_type: f.category.as_str().to_string(),
                invested: f.initial_investment,
                current_value: f.current_value_or_zero(),
                gain: f.gain(),
                return_pct: f.return_pct().round_dp(2),
            })
            .collect(),
    }
}

/// The income entry that carries last month's positive savings into the
/// current month, dated on the first of the month. `None` when last month
/// saved nothing.
pub fn savings_rollover(txns: &[Transaction], today: NaiveDate) -> Option<Transaction> {
    let last_month = DateWindow::months_before(today, 1);
    let savings = totals_in(txns, &last_month).savings();
    if savings <= Decimal::ZERO {
        return None;
    }
    let mut t = Transaction::new(
        TxnKind::Income,
        savings,
        ROLLOVER_CATEGORY,
        DateWindow::month_of(today).start,
    );
    t.description = format!(
        "Previous month savings rollover from {}",
        long_label(last_month.start)
    );
    t.payment_source = ROLLOVER_SOURCE.to_string();
    Some(t)
}

/// `true` if a rollover entry already exists for the month of `today`.
pub fn rollover_recorded(txns: &[Transaction], today: NaiveDate) -> bool {
    let first = DateWindow::month_of(today).start;
    txns.iter().any(|t| {
        t.is_income()
            && t.occurred_on == Some(first)
            && t.category.eq_ignore_ascii_case(ROLLOVER_CATEGORY)
            && t.payment_source == ROLLOVER_SOURCE
    })
}
