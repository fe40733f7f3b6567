// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial health score.
//!
//! Four independent sub-scores are added up to a 0–100 score:
//!
//! | metric              | max | measure                                    |
//! |---------------------|-----|--------------------------------------------|
//! | expense ratio       | 25  | expenses / income                          |
//! | savings rate        | 30  | savings / income × 100                     |
//! | investment ratio    | 25  | (investments / 12) / income × 100          |
//! | expense consistency | 20  | coefficient of variation of prior expenses |
//!
//! The ratio metrics score nothing when there is no income.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Serialize, Serializer};

use super::calendar::{DateWindow, long_label};
use super::funds::total_current_value;
use super::monthly::totals_in;
use crate::models::{FundPosition, Transaction};
use crate::utils::{capped_percent, capped_ratio};

/// Months looked at for expense consistency, counted back from the
/// evaluated month.
const CONSISTENCY_MONTHS: u32 = 3;
const MIN_CONSISTENCY_MONTHS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            Grade::APlus
        } else if score >= 80 {
            Grade::A
        } else if score >= 70 {
            Grade::B
        } else if score >= 60 {
            Grade::C
        } else if score >= 50 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Grade::APlus => "Excellent",
            Grade::A => "Very Good",
            Grade::B => "Good",
            Grade::C => "Fair",
            Grade::D => "Poor",
            Grade::F => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Grade::APlus => "#22c55e",
            Grade::A => "#16a34a",
            Grade::B => "#65a30d",
            Grade::C => "#ca8a04",
            Grade::D => "#ea580c",
            Grade::F => "#ef4444",
        }
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

/// Figures the score is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthInputs {
    pub income: Decimal,
    pub expenses: Decimal,
    pub total_investments: Decimal,
    /// Expense totals of the consistency window, zero for months without
    /// any expense.
    pub prior_expenses: Vec<Decimal>,
    /// How many months of the window had at least one dated expense.
    pub months_with_expenses: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub total_investments: Decimal,
    pub income_to_expense_ratio: Decimal,
    pub savings_rate: Decimal,
    pub investment_ratio: Decimal,
    pub expense_variability: Option<f64>,
}

/// Points awarded per metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub expense_ratio: u32,
    pub savings_rate: u32,
    pub investment_ratio: u32,
    pub expense_consistency: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.expense_ratio + self.savings_rate + self.investment_ratio + self.expense_consistency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub score: u32,
    pub grade: Grade,
    pub status: &'static str,
    pub color: &'static str,
    pub month: String,
    pub metrics: HealthMetrics,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<String>,
}

fn pct(n: i64) -> Decimal {
    Decimal::from(n)
}

fn tenths(n: i64) -> Decimal {
    Decimal::new(n, 1)
}

fn expense_ratio_points(ratio: Decimal) -> u32 {
    if ratio <= tenths(5) {
        25
    } else if ratio <= tenths(7) {
        20
    } else if ratio <= tenths(9) {
        15
    } else if ratio <= Decimal::ONE {
        10
    } else {
        0
    }
}

fn savings_rate_points(rate: Decimal) -> u32 {
    if rate >= pct(20) {
        30
    } else if rate >= pct(15) {
        25
    } else if rate >= pct(10) {
        20
    } else if rate >= pct(5) {
        15
    } else if rate >= Decimal::ZERO {
        10
    } else {
        0
    }
}

fn investment_ratio_points(ratio: Decimal) -> u32 {
    if ratio >= pct(15) {
        25
    } else if ratio >= pct(10) {
        20
    } else if ratio >= pct(5) {
        15
    } else if ratio >= pct(1) {
        10
    } else {
        5
    }
}

fn consistency_points(cv: f64) -> u32 {
    if cv <= 10.0 {
        20
    } else if cv <= 20.0 {
        15
    } else if cv <= 30.0 {
        10
    } else if cv <= 50.0 {
        5
    } else {
        0
    }
}

/// Population coefficient of variation in percent; 100 when the mean is zero.
pub fn coefficient_of_variation(values: &[Decimal]) -> f64 {
    if values.is_empty() {
        return 100.0;
    }
    let xs: Vec<f64> = values.iter().map(|v| v.to_f64().unwrap_or(0.0)).collect();
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 100.0;
    }
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean * 100.0
}

/// Scores `inputs` without looking at any dates.
pub fn evaluate(inputs: &HealthInputs, month: &str) -> HealthReport {
    let savings = inputs.income.saturating_sub(inputs.expenses);
    let mut metrics = HealthMetrics {
        income: inputs.income,
        expenses: inputs.expenses,
        savings,
        total_investments: inputs.total_investments,
        ..Default::default()
    };
    let mut breakdown = ScoreBreakdown::default();

    if inputs.income > Decimal::ZERO {
        metrics.income_to_expense_ratio = capped_ratio(inputs.expenses, inputs.income);
        breakdown.expense_ratio = expense_ratio_points(metrics.income_to_expense_ratio);

        metrics.savings_rate = capped_percent(savings, inputs.income);
        breakdown.savings_rate = savings_rate_points(metrics.savings_rate);

        let monthly_equivalent = inputs.total_investments / Decimal::from(12);
        metrics.investment_ratio = capped_percent(monthly_equivalent, inputs.income);
        breakdown.investment_ratio = investment_ratio_points(metrics.investment_ratio);
    }

    if inputs.months_with_expenses >= MIN_CONSISTENCY_MONTHS {
        let cv = coefficient_of_variation(&inputs.prior_expenses);
        metrics.expense_variability = Some(cv);
        breakdown.expense_consistency = consistency_points(cv);
    }

    let score = breakdown.total().min(100);
    let grade = Grade::from_score(score);
    HealthReport {
        score,
        grade,
        status: grade.status(),
        color: grade.color(),
        month: month.to_string(),
        recommendations: recommendations(score, &metrics),
        metrics,
        breakdown,
    }
}

fn recommendations(score: u32, metrics: &HealthMetrics) -> Vec<String> {
    let mut out = Vec::new();
    if metrics.savings_rate < pct(10) {
        out.push("Try to save at least 10% of your income each month".to_string());
    }
    if metrics.income_to_expense_ratio > tenths(8) {
        out.push(
            "Consider reducing unnecessary expenses to improve your financial cushion".to_string(),
        );
    }
    if metrics.investment_ratio < pct(5) {
        out.push(
            "Consider investing in mutual funds or other investment vehicles for long-term growth"
                .to_string(),
        );
    }
    if score < 60 {
        out.push("Create a detailed budget to track and control your spending".to_string());
        out.push("Set specific financial goals to improve your financial health".to_string());
    }
    if score >= 80 {
        out.push("Great job! Keep maintaining your excellent financial habits".to_string());
        out.push("Consider exploring advanced investment strategies".to_string());
    }
    out
}

/// Gathers the score inputs for the month before the month of `today`.
pub fn health_inputs(
    txns: &[Transaction],
    funds: &[FundPosition],
    today: NaiveDate,
) -> HealthInputs {
    let evaluated = totals_in(txns, &DateWindow::months_before(today, 1));

    let mut prior_expenses = Vec::with_capacity(CONSISTENCY_MONTHS as usize);
    let mut months_with_expenses = 0;
    for back in 2..2 + CONSISTENCY_MONTHS {
        let window = DateWindow::months_before(today, back);
        if txns
            .iter()
            .any(|t| t.is_expense() && window.holds(t.occurred_on))
        {
            months_with_expenses += 1;
        }
        prior_expenses.push(totals_in(txns, &window).expenses);
    }

    HealthInputs {
        income: evaluated.income,
        expenses: evaluated.expenses,
        total_investments: total_current_value(funds),
        prior_expenses,
        months_with_expenses,
    }
}

/// Health report for the calendar month preceding `today`'s month.
pub fn financial_health(
    txns: &[Transaction],
    funds: &[FundPosition],
    today: NaiveDate,
) -> HealthReport {
    let inputs = health_inputs(txns, funds, today);
    let month = long_label(DateWindow::months_before(today, 1).start);
    evaluate(&inputs, &month)
}

/// Converts a float percentage for display next to decimal metrics.
pub fn variability_decimal(metrics: &HealthMetrics) -> Option<Decimal> {
    metrics
        .expense_variability
        .and_then(Decimal::from_f64)
        .map(|d| d.round_dp(1))
}
