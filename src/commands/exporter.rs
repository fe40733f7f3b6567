// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::transactions as store;
use crate::utils::required_arg;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required_arg(sub, "format")?.to_lowercase();
    let out = required_arg(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut rows = store::find_all(conn)?;
    // oldest first reads better in a spreadsheet
    rows.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "amount",
                "category",
                "description",
                "source",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.occurred_on.map(|d| d.to_string()).unwrap_or_default(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category_or_other().to_string(),
                    t.description.clone(),
                    t.payment_source.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.occurred_on.map(|d| d.to_string()),
                        "type": t.kind.as_str(),
                        "amount": t.amount.to_string(),
                        "category": t.category_or_other(),
                        "description": t.description,
                        "source": t.payment_source,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    tracing::info!(count = rows.len(), format = %fmt, "transactions exported");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
