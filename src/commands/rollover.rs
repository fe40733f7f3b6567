// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::summary::{rollover_recorded, savings_rollover};
use crate::models::Transaction;
use crate::store::transactions as store;
use crate::utils::today;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Records last month's positive savings as income on the first of the month
/// of `on`. Returns the stored entry, or `None` when there was nothing to
/// carry or the carry was already recorded.
pub fn apply(conn: &Connection, on: NaiveDate, dry_run: bool) -> Result<Option<Transaction>> {
    let txns = store::find_all(conn)?;
    if rollover_recorded(&txns, on) {
        tracing::info!(%on, "savings rollover already recorded");
        return Ok(None);
    }
    let Some(mut entry) = savings_rollover(&txns, on) else {
        return Ok(None);
    };
    if !dry_run {
        entry.id = Some(store::insert(conn, &entry)?);
        tracing::info!(amount = %entry.amount, "savings rollover recorded");
    }
    Ok(Some(entry))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let dry_run = sub.get_flag("dry-run");
    match apply(conn, today(), dry_run)? {
        Some(entry) if dry_run => println!("Would record: {} ({:.2})", entry.description, entry.amount),
        Some(entry) => println!("Recorded: {} ({:.2})", entry.description, entry.amount),
        None => println!("No savings to roll over"),
    }
    Ok(())
}
