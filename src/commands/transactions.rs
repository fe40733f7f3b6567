// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxnKind};
use crate::store::transactions::{self as store, TransactionFilter};
use crate::utils::{
    date_arg, maybe_print_json, parse_amount, pretty_table, record_id, required_arg, today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxnKind = required_arg(sub, "type")?.parse()?;
    let amount = parse_amount(required_arg(sub, "amount")?)?;
    let date = date_arg(sub, "date")?.unwrap_or_else(today);
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim())
        .unwrap_or_default();

    let mut t = Transaction::new(kind, amount, category, date);
    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("source") {
        t.payment_source = s.trim().to_string();
    }
    let id = store::insert(conn, &t)?;
    tracing::info!(id, kind = %kind, "transaction recorded");
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        kind,
        amount,
        date,
        t.category_or_other(),
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.map(|i| i.to_string()).unwrap_or_default(),
                    t.occurred_on.map(|d| d.to_string()).unwrap_or_default(),
                    t.kind.to_string(),
                    format!("{:.2}", t.amount),
                    t.category_or_other().to_string(),
                    t.description.clone(),
                    t.payment_source.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Description", "Source"],
                rows,
            )
        );
    }
    Ok(())
}

/// Transactions matching the `tx list` filters, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter {
        start: date_arg(sub, "start")?,
        end: date_arg(sub, "end")?,
        category: sub.get_one::<String>("category").cloned(),
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxnKind>())
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    Ok(store::query(conn, &filter)?)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    let mut t = store::find(conn, id)?;

    if let Some(kind) = sub.get_one::<String>("type") {
        t.kind = kind.parse()?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        t.amount = parse_amount(amount)?;
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        t.category = cat.trim().to_string();
    }
    if let Some(date) = date_arg(sub, "date")? {
        t.occurred_on = Some(date);
    }
    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("source") {
        t.payment_source = s.trim().to_string();
    }
    store::update(conn, id, &t)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    store::delete(conn, id)?;
    tracing::info!(id, "transaction deleted");
    println!("Deleted transaction {}", id);
    Ok(())
}
