// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{StoreError, StoreResult, text_conversion_error};
use crate::models::{Transaction, TxnKind};
use crate::utils::{decimal_or_zero, parse_lenient_date};

const COLLECTION: &str = "transaction";

const SELECT_COLUMNS: &str =
    "SELECT id, kind, amount, category, date, description, source FROM transactions";

/// Optional constraints for [`query`]. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TxnKind>,
    pub limit: Option<usize>,
}

fn from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind_s: String = r.get(1)?;
    let kind = kind_s
        .parse::<TxnKind>()
        .map_err(|e| text_conversion_error(1, e))?;
    let amount: Option<String> = r.get(2)?;
    let date: Option<String> = r.get(4)?;
    Ok(Transaction {
        id: Some(r.get(0)?),
        kind,
        amount: decimal_or_zero(amount.as_deref(), "amount"),
        category: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
        occurred_on: date.as_deref().and_then(parse_lenient_date),
        description: r.get::<_, Option<String>>(5)?.unwrap_or_default(),
        payment_source: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}

/// All transactions, newest first. Undated rows come last.
pub fn find_all(conn: &Connection) -> StoreResult<Vec<Transaction>> {
    query(conn, &TransactionFilter::default())
}

/// Transactions dated within `[start, end]`, newest first.
pub fn find_by_date_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> StoreResult<Vec<Transaction>> {
    query(
        conn,
        &TransactionFilter {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        },
    )
}

pub fn find_by_category(conn: &Connection, category: &str) -> StoreResult<Vec<Transaction>> {
    query(
        conn,
        &TransactionFilter {
            category: Some(category.to_string()),
            ..Default::default()
        },
    )
}

pub fn find(conn: &Connection, id: i64) -> StoreResult<Transaction> {
    let sql = format!("{} WHERE id=?1", SELECT_COLUMNS);
    conn.query_row(&sql, params![id], from_row)
        .optional()?
        .ok_or(StoreError::NotFound {
            collection: COLLECTION,
            id,
        })
}

pub fn query(conn: &Connection, filter: &TransactionFilter) -> StoreResult<Vec<Transaction>> {
    let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(start) = filter.start {
        sql.push_str(" AND date >= ?");
        params_vec.push(start.to_string());
    }
    if let Some(end) = filter.end {
        sql.push_str(" AND date <= ?");
        params_vec.push(end.to_string());
    }
    if let Some(cat) = &filter.category {
        sql.push_str(" AND category = ? COLLATE NOCASE");
        params_vec.push(cat.trim().to_string());
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind = ?");
        params_vec.push(kind.as_str().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    tracing::debug!(count = data.len(), "loaded transactions");
    Ok(data)
}

pub fn insert(conn: &Connection, t: &Transaction) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO transactions(kind, amount, category, date, description, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            t.kind.as_str(),
            t.amount.to_string(),
            t.category.trim(),
            t.occurred_on.map(|d| d.to_string()),
            t.description,
            t.payment_source
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, t: &Transaction) -> StoreResult<()> {
    let changed = conn.execute(
        "UPDATE transactions
         SET kind=?1, amount=?2, category=?3, date=?4, description=?5, source=?6,
             updated_at=datetime('now')
         WHERE id=?7",
        params![
            t.kind.as_str(),
            t.amount.to_string(),
            t.category.trim(),
            t.occurred_on.map(|d| d.to_string()),
            t.description,
            t.payment_source,
            id
        ],
    )?;
    if changed == 0 {
        return Err(StoreError::NotFound {
            collection: COLLECTION,
            id,
        });
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> StoreResult<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound {
            collection: COLLECTION,
            id,
        });
    }
    Ok(())
}

pub fn delete_all(conn: &Connection) -> StoreResult<usize> {
    Ok(conn.execute("DELETE FROM transactions", [])?)
}

pub fn count(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?)
}
