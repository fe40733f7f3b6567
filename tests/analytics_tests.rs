// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::analytics::categories::{NO_EXPENSES, PALETTE, category_breakdown};
use financeflow::analytics::funds::{fund_value_as_of, fund_value_series};
use financeflow::analytics::health::{
    Grade, HealthInputs, coefficient_of_variation, evaluate, financial_health,
};
use financeflow::analytics::monthly::monthly_series;
use financeflow::analytics::net_worth::net_worth_series;
use financeflow::analytics::{self, AnalyticsPayload, Period};
use financeflow::models::{
    FundCategory, FundPosition, InvestmentKind, Transaction, TxnKind, ValuationEntry,
};
use rust_decimal::Decimal;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn income(amount: i64, on: NaiveDate) -> Transaction {
    Transaction::new(TxnKind::Income, dec(amount), "salary", on)
}

fn expense(amount: i64, category: &str, on: NaiveDate) -> Transaction {
    Transaction::new(TxnKind::Expense, dec(amount), category, on)
}

fn fund(initial: i64, current: Option<i64>, on: NaiveDate) -> FundPosition {
    FundPosition {
        id: None,
        name: "Index Growth".into(),
        investment_kind: InvestmentKind::Sip,
        category: FundCategory::Index,
        initial_investment: dec(initial),
        current_value: current.map(dec),
        invested_on: Some(on),
        valuation_history: None,
        notes: None,
    }
}

#[test]
fn monthly_series_has_one_point_per_month_even_when_empty() {
    let today = ymd(2024, 6, 15);
    let monthly = monthly_series(&[], Period::Monthly, today);
    assert_eq!(monthly.len(), 6);
    assert_eq!(monthly[0].month, "Jan 24");
    assert_eq!(monthly[5].month, "Jun 24");
    assert!(monthly.iter().all(|m| m.income.is_zero() && m.expenses.is_zero()));

    assert_eq!(monthly_series(&[], Period::Quarterly, today).len(), 6);
    let yearly = monthly_series(&[], Period::Yearly, today);
    assert_eq!(yearly.len(), 12);
    assert_eq!(yearly[0].month, "Jul 23");
}

#[test]
fn monthly_totals_conserve_amounts_inside_the_window() {
    let today = ymd(2024, 6, 15);
    let txns = vec![
        income(5000, ymd(2024, 6, 1)),
        expense(1200, "rent", ymd(2024, 6, 30)),
        expense(300, "food", ymd(2024, 4, 10)),
        income(999, ymd(2023, 12, 31)),
        Transaction {
            occurred_on: None,
            ..income(777, today)
        },
    ];
    let monthly = monthly_series(&txns, Period::Monthly, today);
    let total_income: Decimal = monthly.iter().map(|m| m.income).sum();
    let total_expenses: Decimal = monthly.iter().map(|m| m.expenses).sum();
    assert_eq!(total_income, dec(5000));
    assert_eq!(total_expenses, dec(1500));

    let june = &monthly[5];
    assert_eq!(june.savings, dec(3800));
    assert_eq!(monthly[3].expenses, dec(300));
}

#[test]
fn month_boundaries_are_inclusive() {
    let today = ymd(2024, 3, 10);
    let txns = vec![
        expense(10, "a", ymd(2024, 2, 1)),
        expense(20, "a", ymd(2024, 2, 29)),
        expense(40, "a", ymd(2024, 3, 1)),
    ];
    let monthly = monthly_series(&txns, Period::Monthly, today);
    assert_eq!(monthly[4].month, "Feb 24");
    assert_eq!(monthly[4].expenses, dec(30));
    assert_eq!(monthly[5].expenses, dec(40));
}

#[test]
fn category_breakdown_groups_case_insensitively_and_defaults_to_other() {
    let today = ymd(2024, 6, 15);
    let txns = vec![
        expense(100, "food", ymd(2024, 6, 2)),
        expense(50, "Food", ymd(2024, 6, 3)),
        expense(70, "", ymd(2024, 6, 4)),
        expense(0, "ignored", ymd(2024, 6, 5)),
        expense(999, "food", ymd(2024, 5, 31)),
        income(5000, ymd(2024, 6, 1)),
    ];
    let slices = category_breakdown(&txns, today);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].name, "Food");
    assert_eq!(slices[0].value, dec(150));
    assert_eq!(slices[0].color, PALETTE[0]);
    assert_eq!(slices[1].name, "Other");
    assert_eq!(slices[1].value, dec(70));
    assert_eq!(slices[1].color, PALETTE[1]);
}

#[test]
fn category_breakdown_without_expenses_is_a_single_placeholder() {
    let slices = category_breakdown(&[income(10, ymd(2024, 6, 1))], ymd(2024, 6, 15));
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].name, NO_EXPENSES);
    assert!(slices[0].value.is_zero());
}

#[test]
fn palette_cycles_after_ten_categories() {
    let today = ymd(2024, 6, 15);
    let txns: Vec<Transaction> = (0..11)
        .map(|i| expense(10, &format!("cat{}", i), ymd(2024, 6, 1)))
        .collect();
    let slices = category_breakdown(&txns, today);
    assert_eq!(slices.len(), 11);
    assert_eq!(slices[10].color, PALETTE[0]);
}

#[test]
fn fund_value_uses_latest_entry_on_or_before_target() {
    let mut f = fund(50000, Some(50000), ymd(2023, 6, 1));
    f.valuation_history = Some(vec![ValuationEntry::new(
        ymd(2023, 6, 1),
        dec(50000),
        "Initial investment",
    )]);
    assert_eq!(fund_value_as_of(&f, ymd(2023, 5, 1)), Decimal::ZERO);
    assert_eq!(fund_value_as_of(&f, ymd(2023, 7, 1)), dec(50000));

    f.valuation_history
        .as_mut()
        .unwrap()
        .push(ValuationEntry::new(ymd(2023, 9, 15), dec(56000), ""));
    assert_eq!(fund_value_as_of(&f, ymd(2023, 9, 14)), dec(50000));
    assert_eq!(fund_value_as_of(&f, ymd(2023, 9, 15)), dec(56000));
}

#[test]
fn fund_with_empty_history_counts_initial_investment_after_purchase() {
    let mut f = fund(20000, Some(25000), ymd(2024, 2, 10));
    f.valuation_history = Some(Vec::new());
    assert_eq!(fund_value_as_of(&f, ymd(2024, 2, 1)), Decimal::ZERO);
    assert_eq!(fund_value_as_of(&f, ymd(2024, 3, 1)), dec(20000));
}

#[test]
fn fund_without_history_falls_back_to_current_value() {
    let f = fund(20000, Some(25000), ymd(2024, 2, 10));
    assert_eq!(fund_value_as_of(&f, ymd(2024, 3, 1)), dec(25000));
    let no_value = fund(20000, None, ymd(2024, 2, 10));
    assert_eq!(fund_value_as_of(&no_value, ymd(2024, 3, 1)), dec(20000));
}

#[test]
fn fund_series_samples_first_of_each_month() {
    let mut f = fund(10000, Some(12000), ymd(2024, 3, 1));
    f.valuation_history = Some(vec![
        ValuationEntry::new(ymd(2024, 3, 1), dec(10000), "Initial investment"),
        ValuationEntry::new(ymd(2024, 5, 20), dec(12000), ""),
    ]);
    let series = fund_value_series(&[f], ymd(2024, 6, 15));
    let months: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
    let values: Vec<Decimal> = series.iter().map(|p| p.value).collect();
    assert_eq!(
        values,
        [dec(0), dec(0), dec(10000), dec(10000), dec(10000), dec(12000)]
    );
}

#[test]
fn net_worth_never_subtracts_negative_savings() {
    let today = ymd(2024, 6, 15);
    let txns = vec![
        income(1000, ymd(2024, 5, 1)),
        expense(3000, "rent", ymd(2024, 5, 2)),
        income(4000, ymd(2024, 6, 1)),
        expense(1000, "rent", ymd(2024, 6, 2)),
    ];
    let monthly = monthly_series(&txns, Period::Monthly, today);
    let funds = fund_value_series(&[fund(500, Some(500), ymd(2024, 1, 1))], today);
    let nw = net_worth_series(&monthly, &funds);
    assert_eq!(nw.len(), 6);
    assert!(nw.iter().all(|p| p.cash >= Decimal::ZERO));
    assert_eq!(nw[4].cash, Decimal::ZERO);
    assert_eq!(nw[4].total, dec(500));
    assert_eq!(nw[5].cash, dec(3000));
    assert_eq!(nw[5].total, dec(3500));
}

#[test]
fn yearly_payload_keeps_six_month_net_worth() {
    let payload = AnalyticsPayload::compute(&[], &[], Period::Yearly, ymd(2024, 6, 15));
    assert!(payload.is_available());
    assert_eq!(payload.monthly_data.len(), 12);
    assert_eq!(payload.mutual_fund_data.len(), 6);
    assert_eq!(payload.net_worth_data.len(), 6);
    assert_eq!(payload.net_worth_data[0].month, "Jan 24");
}

#[test]
fn health_scenario_scores_excellent() {
    let inputs = HealthInputs {
        income: dec(100000),
        expenses: dec(60000),
        total_investments: dec(120000),
        prior_expenses: vec![dec(50000), dec(52000), dec(48000)],
        months_with_expenses: 3,
    };
    let report = evaluate(&inputs, "May 2024");
    assert_eq!(report.breakdown.expense_ratio, 20);
    assert_eq!(report.breakdown.savings_rate, 30);
    assert_eq!(report.breakdown.investment_ratio, 20);
    assert_eq!(report.breakdown.expense_consistency, 20);
    assert_eq!(report.score, 90);
    assert_eq!(report.grade, Grade::APlus);
    assert_eq!(report.status, "Excellent");
}

#[test]
fn health_without_income_scores_only_consistency() {
    let inputs = HealthInputs {
        income: Decimal::ZERO,
        expenses: dec(500),
        total_investments: dec(100000),
        prior_expenses: vec![dec(100), Decimal::ZERO, Decimal::ZERO],
        months_with_expenses: 1,
    };
    let report = evaluate(&inputs, "May 2024");
    assert_eq!(report.score, 0);
    assert_eq!(report.grade, Grade::F);
    assert!(report.metrics.expense_variability.is_none());
    assert!(!report.recommendations.is_empty());
}

#[test]
fn grade_thresholds() {
    let cases = [
        (100, "A+"),
        (90, "A+"),
        (89, "A"),
        (80, "A"),
        (79, "B"),
        (70, "B"),
        (60, "C"),
        (50, "D"),
        (49, "F"),
        (0, "F"),
    ];
    for (score, label) in cases {
        assert_eq!(Grade::from_score(score).label(), label, "score {}", score);
    }
}

#[test]
fn coefficient_of_variation_is_population_based() {
    let cv = coefficient_of_variation(&[dec(50000), dec(52000), dec(48000)]);
    assert!((cv - 3.265).abs() < 0.01, "cv = {}", cv);
    assert_eq!(coefficient_of_variation(&[dec(0), dec(0)]), 100.0);
}

#[test]
fn financial_health_evaluates_previous_month() {
    let today = ymd(2024, 6, 15);
    let txns = vec![
        income(100000, ymd(2024, 5, 1)),
        expense(60000, "rent", ymd(2024, 5, 3)),
        expense(50000, "rent", ymd(2024, 4, 3)),
        expense(52000, "rent", ymd(2024, 3, 3)),
        expense(48000, "rent", ymd(2024, 2, 3)),
        // current month is ignored
        expense(90000, "rent", ymd(2024, 6, 3)),
    ];
    let funds = vec![fund(100000, Some(120000), ymd(2023, 1, 1))];
    let report = financial_health(&txns, &funds, today);
    assert_eq!(report.month, "May 2024");
    assert_eq!(report.metrics.expenses, dec(60000));
    assert_eq!(report.score, 90);

    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["grade"], "A+");
    assert_eq!(v["metrics"]["totalInvestments"], 120000.0);
}

#[test]
fn score_never_exceeds_bounds() {
    let inputs = HealthInputs {
        income: dec(1000),
        expenses: Decimal::ZERO,
        total_investments: dec(1_000_000),
        prior_expenses: vec![dec(10), dec(10), dec(10)],
        months_with_expenses: 3,
    };
    let report = evaluate(&inputs, "x");
    assert!(report.score <= 100);
    assert_eq!(report.score, 100);
}

#[test]
fn tiny_income_against_huge_expenses_caps_ratios() {
    let inputs = HealthInputs {
        income: Decimal::new(1, 10),
        expenses: Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0),
        ..Default::default()
    };
    let report = evaluate(&inputs, "x");
    assert_eq!(report.metrics.income_to_expense_ratio, Decimal::MAX);
    assert_eq!(report.metrics.savings_rate, Decimal::MIN);
    assert_eq!(report.breakdown.expense_ratio, 0);
    assert_eq!(report.breakdown.savings_rate, 0);
    assert_eq!(report.score, 5);
}

#[test]
fn totals_clamp_instead_of_overflowing() {
    let today = ymd(2024, 6, 15);
    let txns = vec![
        Transaction::new(TxnKind::Income, Decimal::MAX, "salary", ymd(2024, 6, 1)),
        Transaction::new(TxnKind::Income, Decimal::MAX, "bonus", ymd(2024, 6, 2)),
        Transaction::new(TxnKind::Expense, Decimal::MAX, "rent", ymd(2024, 6, 3)),
        Transaction::new(TxnKind::Expense, Decimal::MAX, "Rent", ymd(2024, 6, 4)),
        Transaction::new(TxnKind::Income, Decimal::MAX, "salary", ymd(2024, 5, 1)),
    ];
    let monthly = monthly_series(&txns, Period::Monthly, today);
    assert_eq!(monthly[5].income, Decimal::MAX);
    assert_eq!(monthly[5].expenses, Decimal::MAX);

    let categories = category_breakdown(&txns, today);
    assert_eq!(categories[0].value, Decimal::MAX);

    let mut rich = fund(1, None, ymd(2024, 1, 1));
    rich.current_value = Some(Decimal::MAX);
    let funds = vec![rich.clone(), rich];
    let payload = AnalyticsPayload::compute(&txns, &funds, Period::Monthly, today);
    assert_eq!(payload.net_worth_data[5].total, Decimal::MAX);
    let health = payload.health_data.unwrap();
    assert_eq!(health.metrics.total_investments, Decimal::MAX);
    assert_eq!(health.metrics.savings_rate, Decimal::ONE_HUNDRED);
}

#[test]
fn consistency_counts_gap_months_as_zero_spend() {
    // March has no expenses but April and February do
    let today = ymd(2024, 6, 15);
    let txns = vec![
        income(100000, ymd(2024, 5, 1)),
        expense(50000, "rent", ymd(2024, 4, 3)),
        expense(50000, "rent", ymd(2024, 2, 3)),
    ];
    let report = financial_health(&txns, &[], today);
    let cv = report.metrics.expense_variability.unwrap();
    assert!((cv - 70.71).abs() < 0.01, "cv = {}", cv);
    assert_eq!(report.breakdown.expense_consistency, 0);

    let only_one = vec![expense(50000, "rent", ymd(2024, 4, 3))];
    let report = financial_health(&only_one, &[], today);
    assert!(report.metrics.expense_variability.is_none());
    assert_eq!(report.breakdown.expense_consistency, 0);
}

#[test]
fn load_degrades_when_records_cannot_be_read() {
    // no schema: every query fails
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let payload = analytics::load(&conn, Period::Monthly, ymd(2024, 6, 15));
    assert!(!payload.is_available());
    assert!(payload.monthly_data.is_empty());
    assert!(payload.health_data.is_none());
    let v = serde_json::to_value(&payload).unwrap();
    assert_eq!(v["error"], "Failed to fetch analytics data");
    assert_eq!(v["netWorthData"], serde_json::json!([]));
}

#[test]
fn period_parsing() {
    assert_eq!("Yearly".parse::<Period>().unwrap(), Period::Yearly);
    assert!("weekly".parse::<Period>().is_err());
}
