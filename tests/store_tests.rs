// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::commands::doctor;
use financeflow::db;
use financeflow::errors::StoreError;
use financeflow::models::{FundCategory, FundPosition, InvestmentKind, Transaction, TxnKind};
use financeflow::store::{funds, profile, transactions};
use financeflow::store::transactions::TransactionFilter;
use rust_decimal::Decimal;
use rusqlite::params;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_fund() -> FundPosition {
    FundPosition {
        id: None,
        name: "Bluechip Equity".into(),
        investment_kind: InvestmentKind::LumpSum,
        category: FundCategory::Equity,
        initial_investment: Decimal::from(10000),
        current_value: None,
        invested_on: Some(ymd(2024, 1, 15)),
        valuation_history: None,
        notes: None,
    }
}

#[test]
fn transactions_round_trip_and_filter() {
    let conn = db::open_in_memory().unwrap();
    let mut salary = Transaction::new(TxnKind::Income, Decimal::from(5000), "Salary", ymd(2024, 1, 1));
    salary.payment_source = "bank transfer".into();
    let id = transactions::insert(&conn, &salary).unwrap();
    transactions::insert(
        &conn,
        &Transaction::new(TxnKind::Expense, Decimal::new(1250, 2), "food", ymd(2024, 1, 5)),
    )
    .unwrap();
    transactions::insert(
        &conn,
        &Transaction::new(TxnKind::Expense, Decimal::from(40), "FOOD", ymd(2024, 2, 5)),
    )
    .unwrap();

    let stored = transactions::find(&conn, id).unwrap();
    assert_eq!(stored.amount, Decimal::from(5000));
    assert_eq!(stored.payment_source, "bank transfer");
    assert_eq!(stored.occurred_on, Some(ymd(2024, 1, 1)));

    let all = transactions::find_all(&conn).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].occurred_on, Some(ymd(2024, 2, 5)));

    let jan = transactions::find_by_date_range(&conn, ymd(2024, 1, 1), ymd(2024, 1, 31)).unwrap();
    assert_eq!(jan.len(), 2);

    let food = transactions::find_by_category(&conn, "Food").unwrap();
    assert_eq!(food.len(), 2);

    let expenses = transactions::query(
        &conn,
        &TransactionFilter {
            kind: Some(TxnKind::Expense),
            limit: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, Decimal::from(40));
}

#[test]
fn update_and_delete_report_missing_records() {
    let conn = db::open_in_memory().unwrap();
    let t = Transaction::new(TxnKind::Expense, Decimal::ONE, "x", ymd(2024, 1, 1));
    assert!(matches!(
        transactions::update(&conn, 42, &t),
        Err(StoreError::NotFound { id: 42, .. })
    ));
    assert!(matches!(
        transactions::delete(&conn, 42),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        funds::find(&conn, 7),
        Err(StoreError::NotFound { id: 7, .. })
    ));
}

#[test]
fn unreadable_stored_values_degrade_instead_of_failing() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO transactions(kind, amount, category, date) VALUES ('expense', 'abc', '', 'not a date')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(kind, amount, category, date) VALUES ('income', '10', 'x', '2024-03-04T23:30:00Z')",
        [],
    )
    .unwrap();
    let all = transactions::find_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    let bad = all.iter().find(|t| t.is_expense()).unwrap();
    assert!(bad.amount.is_zero());
    assert!(bad.occurred_on.is_none());
    assert_eq!(bad.category_or_other(), "Other");
    let ts = all.iter().find(|t| t.is_income()).unwrap();
    assert_eq!(ts.occurred_on, Some(ymd(2024, 3, 4)));
}

#[test]
fn create_seeds_valuation_history() {
    let conn = db::open_in_memory().unwrap();
    let id = funds::create(&conn, &sample_fund()).unwrap();
    let f = funds::find(&conn, id).unwrap();
    let history = f.valuation_history.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].on, Some(ymd(2024, 1, 15)));
    assert_eq!(history[0].value, Decimal::from(10000));
    assert_eq!(history[0].note.as_deref(), Some("Initial investment"));
}

#[test]
fn insert_keeps_missing_history_missing() {
    let conn = db::open_in_memory().unwrap();
    let id = funds::insert(&conn, &sample_fund()).unwrap();
    assert!(funds::find(&conn, id).unwrap().valuation_history.is_none());

    let mut empty = sample_fund();
    empty.valuation_history = Some(Vec::new());
    let id = funds::insert(&conn, &empty).unwrap();
    assert_eq!(funds::find(&conn, id).unwrap().valuation_history, Some(Vec::new()));
}

#[test]
fn record_value_and_additional_investment_extend_history() {
    let conn = db::open_in_memory().unwrap();
    let id = funds::create(&conn, &sample_fund()).unwrap();

    let f = funds::record_value(&conn, id, Decimal::from(11000), Some("Q1 NAV"), ymd(2024, 3, 31))
        .unwrap();
    assert_eq!(f.current_value, Some(Decimal::from(11000)));

    let f = funds::add_investment(&conn, id, Decimal::from(2000), ymd(2024, 4, 2)).unwrap();
    assert_eq!(f.initial_investment, Decimal::from(12000));
    assert_eq!(f.current_value, Some(Decimal::from(13000)));

    let stored = funds::find(&conn, id).unwrap();
    let history = stored.valuation_history.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].note.as_deref(), Some("Q1 NAV"));
    assert_eq!(history[2].value, Decimal::from(13000));
    assert_eq!(
        history[2].note.as_deref(),
        Some("Additional investment of 2000.00")
    );
}

#[test]
fn funds_by_date_range_uses_investment_date() {
    let conn = db::open_in_memory().unwrap();
    funds::create(&conn, &sample_fund()).unwrap();
    let mut later = sample_fund();
    later.invested_on = Some(ymd(2024, 6, 1));
    funds::create(&conn, &later).unwrap();

    let q1 = funds::find_by_date_range(&conn, ymd(2024, 1, 1), ymd(2024, 3, 31)).unwrap();
    assert_eq!(q1.len(), 1);
    assert_eq!(funds::find_all(&conn).unwrap()[0].invested_on, Some(ymd(2024, 6, 1)));
    assert_eq!(funds::count(&conn).unwrap(), 2);
}

#[test]
fn profile_defaults_are_written_once() {
    let conn = db::open_in_memory().unwrap();
    assert!(profile::load(&conn).unwrap().is_none());

    let p = profile::load_or_init(&conn).unwrap();
    assert_eq!(p.monthly_income_goal, Decimal::from(100000));
    assert_eq!(p.savings_target, Decimal::from(50000));
    assert_eq!(p.preferred_currency, "PKR");
    assert!(p.motivational_quotes);

    let mut changed = p.clone();
    changed.preferred_currency = "USD".into();
    changed.motivational_quotes = false;
    profile::save(&conn, &changed).unwrap();
    assert_eq!(profile::load_or_init(&conn).unwrap(), changed);

    assert_eq!(profile::clear(&conn).unwrap(), 4);
    assert!(profile::load(&conn).unwrap().is_none());
}

#[test]
fn doctor_flags_bad_dates_and_missing_history() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO transactions(kind, amount, date) VALUES ('expense', '5', ?1)",
        params!["31/12/2024"],
    )
    .unwrap();
    conn.execute("INSERT INTO transactions(kind, amount) VALUES ('income', '5')", [])
        .unwrap();
    funds::insert(&conn, &sample_fund()).unwrap();
    funds::create(&conn, &sample_fund()).unwrap();

    let issues: Vec<String> = doctor::findings(&conn)
        .unwrap()
        .into_iter()
        .map(|(issue, _)| issue)
        .collect();
    assert_eq!(issues, ["txn_bad_date", "txn_missing_date", "fund_no_history"]);
}
