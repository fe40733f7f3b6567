// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, AnalyticsPayload, Period};
use crate::utils::{maybe_print_json, pretty_table, required_arg, today};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period: Period = required_arg(sub, "period")?.parse()?;
    let payload = analytics::load(conn, period, today());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        return Ok(());
    }
    if let Some(err) = &payload.error {
        return Err(anyhow!("{}", err));
    }
    print_tables(&payload);
    Ok(())
}

fn print_tables(payload: &AnalyticsPayload) {
    let monthly: Vec<Vec<String>> = payload
        .monthly_data
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                format!("{:.2}", m.income),
                format!("{:.2}", m.expenses),
                format!("{:.2}", m.savings),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Savings"], monthly)
    );

    let categories: Vec<Vec<String>> = payload
        .category_data
        .iter()
        .map(|c| vec![c.name.clone(), format!("{:.2}", c.value), c.color.clone()])
        .collect();
    println!(
        "{}",
        pretty_table(&["Category (this month)", "Spent", "Color"], categories)
    );

    let net_worth: Vec<Vec<String>> = payload
        .net_worth_data
        .iter()
        .map(|n| {
            vec![
                n.month.clone(),
                format!("{:.2}", n.cash),
                format!("{:.2}", n.investments),
                format!("{:.2}", n.total),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Cash", "Funds", "Net worth"], net_worth)
    );

    if let Some(health) = &payload.health_data {
        println!(
            "Health ({}): {}/100 grade {} ({})",
            health.month,
            health.score,
            health.grade.label(),
            health.status
        );
    }
}
