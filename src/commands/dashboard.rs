// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::summary::dashboard;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txns = store::transactions::find_all(conn)?;
    let funds = store::funds::find_all(conn)?;
    let profile = store::profile::load_or_init(conn)?;
    let view = dashboard(&txns, &funds, &profile, today());

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let ccy = &profile.preferred_currency;
    let rows = vec![
        vec!["Income".to_string(), fmt_money(&view.monthly_income, ccy)],
        vec!["Expenses".to_string(), fmt_money(&view.monthly_expenses, ccy)],
        vec!["Net savings".to_string(), fmt_money(&view.net_savings, ccy)],
        vec![
            "Savings goal".to_string(),
            format!(
                "{} ({:.0}%)",
                fmt_money(&view.savings_goal, ccy),
                view.savings_progress
            ),
        ],
        vec![
            "Mutual funds".to_string(),
            fmt_money(&view.mutual_fund_value, ccy),
        ],
        vec![
            "Records".to_string(),
            format!("{} transactions, {} funds", view.total_transactions, view.total_funds),
        ],
    ];
    println!("{}", pretty_table(&["This month", "Amount"], rows));
    Ok(())
}
