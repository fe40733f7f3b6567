// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-database JSON backup and restore.
//!
//! The document layout is
//! `{timestamp, version, data: {transactions, mutualFunds, userProfiles, invoices}, metadata}`.
//! Restore replaces every collection inside a single SQLite transaction, so a
//! rejected document leaves the database untouched.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{FundPosition, Invoice, Transaction, UserProfile};
use crate::store::{self, StoreError, StoreResult};
use crate::utils::required_arg;

pub const BACKUP_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub transactions: Vec<Transaction>,
    pub mutual_funds: Vec<FundPosition>,
    #[serde(default)]
    pub user_profiles: Vec<UserProfile>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCounts {
    pub transaction_count: usize,
    pub mutual_fund_count: usize,
    pub user_profile_count: usize,
    pub invoice_count: usize,
}

impl BackupCounts {
    fn of(data: &BackupData) -> Self {
        Self {
            transaction_count: data.transactions.len(),
            mutual_fund_count: data.mutual_funds.len(),
            user_profile_count: data.user_profiles.len(),
            invoice_count: data.invoices.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupDocument {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub data: BackupData,
    pub metadata: BackupCounts,
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("export", sub)) => {
            let out = required_arg(sub, "out")?;
            let counts = write_backup(conn, Path::new(out))?;
            println!(
                "Backed up {} transactions, {} funds, {} invoices and {} profiles to {}",
                counts.transaction_count,
                counts.mutual_fund_count,
                counts.invoice_count,
                counts.user_profile_count,
                out
            );
        }
        Some(("restore", sub)) => {
            let path = required_arg(sub, "path")?;
            let counts = restore_file(conn, Path::new(path))?;
            println!(
                "Restored {} transactions, {} funds, {} invoices and {} profiles from {}",
                counts.transaction_count,
                counts.mutual_fund_count,
                counts.invoice_count,
                counts.user_profile_count,
                path
            );
        }
        _ => {}
    }
    Ok(())
}

/// Snapshot of every collection. Record ids are left out.
pub fn snapshot(conn: &Connection) -> StoreResult<BackupDocument> {
    let mut transactions = store::transactions::find_all(conn)?;
    transactions.iter_mut().for_each(|t| t.id = None);
    let mut mutual_funds = store::funds::find_all(conn)?;
    mutual_funds.iter_mut().for_each(|f| f.id = None);
    let user_profiles = store::profile::load(conn)?.into_iter().collect();
    let mut invoices = store::invoices::find_all(conn)?;
    invoices.iter_mut().for_each(|i| i.id = None);

    let data = BackupData {
        transactions,
        mutual_funds,
        user_profiles,
        invoices,
    };
    Ok(BackupDocument {
        timestamp: Utc::now(),
        version: BACKUP_VERSION,
        metadata: BackupCounts::of(&data),
        data,
    })
}

pub fn write_backup(conn: &Connection, out: &Path) -> Result<BackupCounts> {
    let doc = snapshot(conn)?;
    let body = serde_json::to_string_pretty(&doc)?;
    fs::write(out, body).with_context(|| format!("Write backup to {}", out.display()))?;
    tracing::info!(path = %out.display(), "backup written");
    Ok(doc.metadata)
}

fn validate(doc: &Value) -> StoreResult<BackupData> {
    let data = doc
        .get("data")
        .ok_or_else(|| StoreError::InvalidBackup("missing 'data' section".into()))?;
    for key in ["transactions", "mutualFunds"] {
        if !data.get(key).is_some_and(Value::is_array) {
            return Err(StoreError::InvalidBackup(format!(
                "'data.{}' must be an array",
                key
            )));
        }
    }
    serde_json::from_value(data.clone()).map_err(|e| StoreError::InvalidBackup(e.to_string()))
}

/// Replaces all records with the contents of `doc`.
pub fn restore(conn: &mut Connection, doc: &Value) -> StoreResult<BackupCounts> {
    let data = validate(doc)?;

    let tx = conn.transaction()?;
    store::transactions::delete_all(&tx)?;
    store::funds::delete_all(&tx)?;
    store::invoices::delete_all(&tx)?;
    store::profile::clear(&tx)?;
    for t in &data.transactions {
        store::transactions::insert(&tx, t)?;
    }
    for f in &data.mutual_funds {
        store::funds::insert(&tx, f)?;
    }
    for i in &data.invoices {
        store::invoices::insert(&tx, i)?;
    }
    if let Some(p) = data.user_profiles.first() {
        store::profile::save(&tx, p)?;
    }
    tx.commit()?;

    let counts = BackupCounts::of(&data);
    tracing::info!(
        transactions = counts.transaction_count,
        funds = counts.mutual_fund_count,
        invoices = counts.invoice_count,
        "backup restored"
    );
    Ok(counts)
}

pub fn restore_file(conn: &mut Connection, path: &Path) -> Result<BackupCounts> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read backup from {}", path.display()))?;
    let doc: Value = serde_json::from_str(&raw)
        .map_err(|e| StoreError::InvalidBackup(e.to_string()))?;
    Ok(restore(conn, &doc)?)
}
