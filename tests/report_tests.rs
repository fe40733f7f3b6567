// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::analytics::Period;
use financeflow::analytics::summary::{
    ROLLOVER_CATEGORY, ReportRange, dashboard, period_report, rollover_recorded, savings_rollover,
};
use financeflow::commands::{reports, rollover};
use financeflow::errors::PeriodError;
use financeflow::models::{FundCategory, FundPosition, InvestmentKind, Transaction, TxnKind, UserProfile};
use financeflow::store::transactions;
use financeflow::{cli, db};
use rust_decimal::Decimal;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(kind: TxnKind, amount: i64, category: &str, on: NaiveDate) -> Transaction {
    Transaction::new(kind, Decimal::from(amount), category, on)
}

fn holding(initial: i64, current: i64) -> FundPosition {
    FundPosition {
        id: None,
        name: "Balanced Advantage".into(),
        investment_kind: InvestmentKind::Sip,
        category: FundCategory::Hybrid,
        initial_investment: Decimal::from(initial),
        current_value: Some(Decimal::from(current)),
        invested_on: Some(ymd(2023, 1, 1)),
        valuation_history: None,
        notes: None,
    }
}

#[test]
fn report_range_follows_calendar_periods() {
    let today = ymd(2024, 8, 20);
    let m = ReportRange::resolve(Period::Monthly, None, None, today).unwrap();
    assert_eq!((m.window.start, m.window.end), (ymd(2024, 8, 1), ymd(2024, 8, 31)));

    let q = ReportRange::resolve(Period::Quarterly, None, None, today).unwrap();
    assert_eq!((q.window.start, q.window.end), (ymd(2024, 7, 1), ymd(2024, 9, 30)));

    let y = ReportRange::resolve(Period::Yearly, None, None, today).unwrap();
    assert_eq!((y.window.start, y.window.end), (ymd(2024, 1, 1), ymd(2024, 12, 31)));

    let custom =
        ReportRange::resolve(Period::Yearly, Some(ymd(2024, 2, 1)), Some(ymd(2024, 2, 10)), today)
            .unwrap();
    assert_eq!(custom.window.end, ymd(2024, 2, 10));
}

#[test]
fn report_range_rejects_half_open_and_inverted_ranges() {
    let today = ymd(2024, 8, 20);
    assert_eq!(
        ReportRange::resolve(Period::Monthly, Some(today), None, today),
        Err(PeriodError::HalfOpenRange)
    );
    assert!(matches!(
        ReportRange::resolve(Period::Monthly, Some(ymd(2024, 3, 1)), Some(ymd(2024, 2, 1)), today),
        Err(PeriodError::Inverted { .. })
    ));
}

#[test]
fn period_report_summarises_range() {
    let txns = vec![
        txn(TxnKind::Income, 4000, "salary", ymd(2024, 8, 1)),
        txn(TxnKind::Expense, 300, "food", ymd(2024, 8, 5)),
        txn(TxnKind::Expense, 200, "Food", ymd(2024, 8, 9)),
        txn(TxnKind::Expense, 100, "", ymd(2024, 8, 31)),
        txn(TxnKind::Expense, 999, "food", ymd(2024, 9, 1)),
    ];
    let range = ReportRange::resolve(Period::Monthly, None, None, ymd(2024, 8, 20)).unwrap();
    let report = period_report(&txns, &[holding(1000, 1250)], &range);

    assert_eq!(report.transactions.len(), 4);
    assert_eq!(report.transactions[0].occurred_on, Some(ymd(2024, 8, 31)));
    assert_eq!(report.summary.total_income, Decimal::from(4000));
    assert_eq!(report.summary.total_expenses, Decimal::from(600));
    assert_eq!(report.summary.net_savings, Decimal::from(3400));
    assert_eq!(report.summary.total_mutual_fund_value, Decimal::from(1250));

    let cats: Vec<(&str, Decimal)> = report
        .category_breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();
    assert_eq!(
        cats,
        [("Food", Decimal::from(500)), ("Other", Decimal::from(100))]
    );
    assert_eq!(report.funds[0].gain, Decimal::from(250));
    assert_eq!(report.funds[0].return_pct, Decimal::from(25));
}

#[test]
fn report_command_resolves_explicit_range() {
    let conn = db::open_in_memory().unwrap();
    transactions::insert(&conn, &txn(TxnKind::Income, 10, "x", ymd(2024, 1, 15))).unwrap();
    transactions::insert(&conn, &txn(TxnKind::Income, 20, "x", ymd(2024, 2, 15))).unwrap();

    let matches = cli::build_cli().get_matches_from([
        "financeflow",
        "report",
        "--start",
        "2024-01-01",
        "--end",
        "2024-01-31",
    ]);
    let Some(("report", sub)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let report = reports::build(&conn, sub).unwrap();
    assert_eq!(report.period, Period::Monthly);
    assert_eq!(report.summary.total_income, Decimal::from(10));

    let half_open =
        cli::build_cli().get_matches_from(["financeflow", "report", "--start", "2024-01-01"]);
    let Some(("report", sub)) = half_open.subcommand() else {
        panic!("no report subcommand");
    };
    assert!(reports::build(&conn, sub).is_err());
}

#[test]
fn dashboard_caps_savings_progress() {
    let today = ymd(2024, 8, 20);
    let txns = vec![
        txn(TxnKind::Income, 90000, "salary", ymd(2024, 8, 1)),
        txn(TxnKind::Expense, 10000, "rent", ymd(2024, 8, 2)),
        txn(TxnKind::Income, 5000, "old", ymd(2024, 7, 2)),
    ];
    let view = dashboard(&txns, &[holding(100, 150)], &UserProfile::default(), today);
    assert_eq!(view.monthly_income, Decimal::from(90000));
    assert_eq!(view.net_savings, Decimal::from(80000));
    assert_eq!(view.savings_progress, Decimal::ONE_HUNDRED);
    assert_eq!(view.mutual_fund_value, Decimal::from(150));
    assert_eq!(view.total_transactions, 3);
}

#[test]
fn dashboard_falls_back_to_default_goal_without_target() {
    let today = ymd(2024, 8, 20);
    let txns = vec![
        txn(TxnKind::Income, 30000, "salary", ymd(2024, 8, 1)),
        txn(TxnKind::Expense, 5000, "rent", ymd(2024, 8, 2)),
    ];
    let mut profile = UserProfile::default();
    profile.savings_target = Decimal::ZERO;
    let view = dashboard(&txns, &[], &profile, today);
    assert_eq!(view.savings_goal, Decimal::from(50000));
    assert_eq!(view.savings_progress, Decimal::from(50));

    profile.savings_target = Decimal::from(-10);
    let view = dashboard(&txns, &[], &profile, today);
    assert_eq!(view.savings_goal, Decimal::from(50000));
}

#[test]
fn rollover_carries_positive_savings_only() {
    let today = ymd(2024, 8, 20);
    let txns = vec![
        txn(TxnKind::Income, 5000, "salary", ymd(2024, 7, 1)),
        txn(TxnKind::Expense, 1500, "rent", ymd(2024, 7, 3)),
    ];
    let entry = savings_rollover(&txns, today).unwrap();
    assert_eq!(entry.amount, Decimal::from(3500));
    assert_eq!(entry.occurred_on, Some(ymd(2024, 8, 1)));
    assert_eq!(entry.category, ROLLOVER_CATEGORY);
    assert_eq!(entry.description, "Previous month savings rollover from July 2024");

    let deficit = vec![txn(TxnKind::Expense, 10, "x", ymd(2024, 7, 3))];
    assert!(savings_rollover(&deficit, today).is_none());

    let mut with_entry = txns.clone();
    with_entry.push(entry);
    assert!(rollover_recorded(&with_entry, today));
    assert!(!rollover_recorded(&txns, today));
}

#[test]
fn rollover_is_recorded_once() {
    let conn = db::open_in_memory().unwrap();
    let today = ymd(2024, 8, 20);
    transactions::insert(&conn, &txn(TxnKind::Income, 800, "salary", ymd(2024, 7, 1))).unwrap();

    let dry = rollover::apply(&conn, today, true).unwrap().unwrap();
    assert!(dry.id.is_none());
    assert_eq!(transactions::count(&conn).unwrap(), 1);

    let first = rollover::apply(&conn, today, false).unwrap().unwrap();
    assert!(first.id.is_some());
    assert!(rollover::apply(&conn, today, false).unwrap().is_none());
    assert_eq!(transactions::count(&conn).unwrap(), 2);
}
