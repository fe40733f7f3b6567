// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::health::{HealthReport, financial_health, variability_decimal};
use crate::store;
use crate::utils::{maybe_print_json, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

/// Health report for the month before today's month.
pub fn report(conn: &Connection) -> Result<HealthReport> {
    let txns = store::transactions::find_all(conn)?;
    let funds = store::funds::find_all(conn)?;
    Ok(financial_health(&txns, &funds, today()))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let health = report(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &health)? {
        return Ok(());
    }

    println!(
        "{}: {}/100, grade {} ({})",
        health.month,
        health.score,
        health.grade.label(),
        health.status
    );

    let m = &health.metrics;
    let b = &health.breakdown;
    let variability = variability_decimal(m)
        .map(|v| format!("{}%", v))
        .unwrap_or_else(|| "n/a".to_string());
    let rows = vec![
        vec![
            "Expense ratio".to_string(),
            format!("{:.2}", m.income_to_expense_ratio),
            format!("{}/25", b.expense_ratio),
        ],
        vec![
            "Savings rate".to_string(),
            format!("{:.1}%", m.savings_rate),
            format!("{}/30", b.savings_rate),
        ],
        vec![
            "Investment ratio".to_string(),
            format!("{:.1}%", m.investment_ratio),
            format!("{}/25", b.investment_ratio),
        ],
        vec![
            "Expense variability".to_string(),
            variability,
            format!("{}/20", b.expense_consistency),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value", "Points"], rows));

    for r in &health.recommendations {
        println!("- {}", r);
    }
    Ok(())
}
