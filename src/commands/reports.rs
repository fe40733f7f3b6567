// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::Period;
use crate::analytics::summary::{PeriodReport, ReportRange, period_report};
use crate::store;
use crate::utils::{date_arg, maybe_print_json, pretty_table, required_arg, today};
use anyhow::Result;
use rusqlite::Connection;

/// Builds the report selected by `report` arguments.
pub fn build(conn: &Connection, sub: &clap::ArgMatches) -> Result<PeriodReport> {
    let period: Period = required_arg(sub, "type")?.parse()?;
    let range = ReportRange::resolve(
        period,
        date_arg(sub, "start")?,
        date_arg(sub, "end")?,
        today(),
    )?;
    let txns =
        store::transactions::find_by_date_range(conn, range.window.start, range.window.end)?;
    let funds = store::funds::find_all(conn)?;
    Ok(period_report(&txns, &funds, &range))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = build(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!(
        "{} report, {} to {}",
        report.period, report.start, report.end
    );
    let s = &report.summary;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net savings", "Fund value"],
            vec![vec![
                format!("{:.2}", s.total_income),
                format!("{:.2}", s.total_expenses),
                format!("{:.2}", s.net_savings),
                format!("{:.2}", s.total_mutual_fund_value),
            ]],
        )
    );

    let categories: Vec<Vec<String>> = report
        .category_breakdown
        .iter()
        .map(|c| vec![c.category.clone(), format!("{:.2}", c.amount)])
        .collect();
    if !categories.is_empty() {
        println!("{}", pretty_table(&["Category", "Spent"], categories));
    }

    let funds: Vec<Vec<String>> = report
        .funds
        .iter()
        .map(|f| {
            vec![
                f.name.clone(),
                f.fund_type.clone(),
                format!("{:.2}", f.invested),
                format!("{:.2}", f.current_value),
                format!("{:.2}", f.gain),
                format!("{:.2}%", f.return_pct),
            ]
        })
        .collect();
    if !funds.is_empty() {
        println!(
            "{}",
            pretty_table(
                &["Fund", "Type", "Invested", "Value", "Gain", "Return"],
                funds
            )
        );
    }
    Ok(())
}
