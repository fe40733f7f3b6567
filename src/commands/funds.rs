// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FundCategory, FundPosition, InvestmentKind};
use crate::store::funds as store;
use crate::utils::{
    date_arg, maybe_print_json, parse_amount, pretty_table, record_id, required_arg, today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update-value", sub)) => update_value(conn, sub)?,
        Some(("invest", sub)) => invest(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn non_empty(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Builds a new position from `fund add` arguments without storing it.
pub fn position_from_args(sub: &clap::ArgMatches) -> Result<FundPosition> {
    let initial = parse_amount(required_arg(sub, "initial")?)?;
    let current = sub
        .get_one::<String>("current")
        .map(|s| parse_amount(s))
        .transpose()?;
    Ok(FundPosition {
        id: None,
        name: required_arg(sub, "name")?.trim().to_string(),
        investment_kind: required_arg(sub, "investment-type")?.parse::<InvestmentKind>()?,
        category: required_arg(sub, "fund-type")?.parse::<FundCategory>()?,
        initial_investment: initial,
        current_value: Some(current.unwrap_or(initial)),
        invested_on: Some(date_arg(sub, "date")?.unwrap_or_else(today)),
        valuation_history: None,
        notes: non_empty(sub, "notes"),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fund = position_from_args(sub)?;
    let id = store::create(conn, &fund)?;
    tracing::info!(id, name = %fund.name, "fund position added");
    println!(
        "Added {} ({}, {}) with {:.2} invested (id {})",
        fund.name,
        fund.category.as_str(),
        fund.investment_kind.as_str(),
        fund.initial_investment,
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = store::find_all(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|f| {
                vec![
                    f.id.map(|i| i.to_string()).unwrap_or_default(),
                    f.name.clone(),
                    f.category.as_str().to_string(),
                    f.investment_kind.as_str().to_string(),
                    f.invested_on.map(|d| d.to_string()).unwrap_or_default(),
                    format!("{:.2}", f.initial_investment),
                    format!("{:.2}", f.current_value_or_zero()),
                    format!("{:.2}", f.gain()),
                    format!("{:.2}%", f.return_pct()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Fund", "Type", "Plan", "Since", "Invested", "Value", "Gain", "Return",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn update_value(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    let value = parse_amount(required_arg(sub, "value")?)?;
    let on = date_arg(sub, "date")?.unwrap_or_else(today);
    let note = sub.get_one::<String>("note").map(|s| s.trim());
    let fund = store::record_value(conn, id, value, note, on)?;
    println!(
        "{} valued at {:.2} on {} ({:+.2})",
        fund.name,
        value,
        on,
        fund.gain()
    );
    Ok(())
}

fn invest(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    let amount = parse_amount(required_arg(sub, "amount")?)?;
    let on = date_arg(sub, "date")?.unwrap_or_else(today);
    let fund = store::add_investment(conn, id, amount, on)?;
    println!(
        "Added {:.2} to {}; invested {:.2}, value {:.2}",
        amount,
        fund.name,
        fund.initial_investment,
        fund.current_value_or_zero()
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    let mut fund = store::find(conn, id)?;

    if let Some(name) = non_empty(sub, "name") {
        fund.name = name;
    }
    if let Some(kind) = sub.get_one::<String>("investment-type") {
        fund.investment_kind = kind.parse()?;
    }
    if let Some(cat) = sub.get_one::<String>("fund-type") {
        fund.category = cat.parse()?;
    }
    if let Some(initial) = sub.get_one::<String>("initial") {
        fund.initial_investment = parse_amount(initial)?;
    }
    if let Some(current) = sub.get_one::<String>("current") {
        fund.current_value = Some(parse_amount(current)?);
    }
    if let Some(date) = date_arg(sub, "date")? {
        fund.invested_on = Some(date);
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        fund.notes = Some(notes.trim().to_string()).filter(|s| !s.is_empty());
    }
    store::update(conn, id, &fund)?;
    println!("Updated fund {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    store::delete(conn, id)?;
    tracing::info!(id, "fund position deleted");
    println!("Deleted fund {}", id);
    Ok(())
}
