// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{parse_lenient_date, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

/// Data-quality findings as `(issue, detail)` pairs.
pub fn findings(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();

    // 1) Transactions whose date is missing or cannot be read; they never land in a month
    let mut stmt = conn.prepare("SELECT id, date FROM transactions ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: Option<String> = r.get(1)?;
        match date {
            None => out.push(("txn_missing_date".into(), format!("id {}", id))),
            Some(d) if parse_lenient_date(&d).is_none() => {
                out.push(("txn_bad_date".into(), format!("id {}: '{}'", id, d)))
            }
            Some(_) => {}
        }
    }

    // 2) Funds without a valuation timeline fall back to their current value
    let mut stmt2 = conn.prepare(
        "SELECT id, name FROM mutual_funds WHERE update_history IS NULL ORDER BY id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        out.push(("fund_no_history".into(), format!("id {}: {}", id, name)));
    }
    Ok(out)
}

pub fn handle(conn: &Connection) -> Result<()> {
    conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))
        .context("Database connection check failed")?;

    let txns = store::transactions::count(conn)?;
    let funds = store::funds::count(conn)?;
    let invoices = store::invoices::count(conn)?;
    let profile = store::profile::load(conn)?.is_some();
    println!(
        "{}",
        pretty_table(
            &["Collection", "Records"],
            vec![
                vec!["transactions".into(), txns.to_string()],
                vec!["mutual funds".into(), funds.to_string()],
                vec!["invoices".into(), invoices.to_string()],
                vec!["user profile".into(), (profile as u8).to_string()],
            ],
        )
    );

    let rows: Vec<Vec<String>> = findings(conn)?
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
