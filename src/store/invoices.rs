// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{StoreError, StoreResult, text_conversion_error};
use crate::models::{Invoice, InvoiceItem, InvoiceStatus};
use crate::utils::{decimal_or_zero, parse_lenient_date};

const COLLECTION: &str = "invoice";

const SELECT_COLUMNS: &str = "SELECT id, invoice_number, from_name, from_email, from_address, \
     from_phone, to_name, to_email, to_address, to_phone, date, due_date, items, tax_rate, \
     notes, status, created_at FROM invoices";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Invoice> {
    let id: i64 = r.get(0)?;
    let date: Option<String> = r.get(10)?;
    let due_date: Option<String> = r.get(11)?;
    let items_raw: String = r.get(12)?;
    let tax_rate: Option<String> = r.get(13)?;
    let status = r
        .get::<_, String>(15)?
        .parse::<InvoiceStatus>()
        .map_err(|e| text_conversion_error(15, e))?;
    let created_raw: String = r.get(16)?;

    let items = serde_json::from_str::<Vec<InvoiceItem>>(&items_raw).unwrap_or_else(|err| {
        tracing::warn!(invoice = id, %err, "unreadable invoice items, ignoring them");
        Vec::new()
    });
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok();

    Ok(Invoice {
        id: Some(id),
        invoice_number: r.get(1)?,
        from_name: r.get(2)?,
        from_email: r.get(3)?,
        from_address: r.get(4)?,
        from_phone: r.get(5)?,
        to_name: r.get(6)?,
        to_email: r.get(7)?,
        to_address: r.get(8)?,
        to_phone: r.get(9)?,
        date: date.as_deref().and_then(parse_lenient_date),
        due_date: due_date.as_deref().and_then(parse_lenient_date),
        items,
        tax_rate: decimal_or_zero(tax_rate.as_deref(), "tax_rate"),
        notes: r.get(14)?,
        status,
        created_at,
    })
}

/// All invoices, most recently created first.
pub fn find_all(conn: &Connection) -> StoreResult<Vec<Invoice>> {
    let sql = format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    tracing::debug!(count = data.len(), "loaded invoices");
    Ok(data)
}

pub fn find(conn: &Connection, id: i64) -> StoreResult<Invoice> {
    let sql = format!("{} WHERE id=?1", SELECT_COLUMNS);
    conn.query_row(&sql, params![id], from_row)
        .optional()?
        .ok_or(StoreError::NotFound {
            collection: COLLECTION,
            id,
        })
}

/// Stores the invoice exactly as given. A missing creation time is set to now.
pub fn insert(conn: &Connection, invoice: &Invoice) -> StoreResult<i64> {
    let created_at = invoice.created_at.unwrap_or_else(Utc::now);
    conn.execute(
        "INSERT INTO invoices(invoice_number, from_name, from_email, from_address, from_phone,
             to_name, to_email, to_address, to_phone, date, due_date, items, tax_rate, notes,
             status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            invoice.invoice_number,
            invoice.from_name.trim(),
            invoice.from_email.trim(),
            invoice.from_address,
            invoice.from_phone.trim(),
            invoice.to_name.trim(),
            invoice.to_email.trim(),
            invoice.to_address,
            invoice.to_phone.trim(),
            invoice.date.map(|d| d.to_string()),
            invoice.due_date.map(|d| d.to_string()),
            serde_json::to_string(&invoice.items)?,
            invoice.tax_rate.to_string(),
            invoice.notes,
            invoice.status.as_str(),
            created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Records a new draft invoice numbered after the creation time.
pub fn create(conn: &Connection, invoice: &Invoice) -> StoreResult<Invoice> {
    let now = Utc::now();
    let mut invoice = invoice.clone();
    invoice.invoice_number = format!("INV-{}", now.timestamp_millis());
    invoice.status = InvoiceStatus::Draft;
    invoice.created_at = Some(now);
    let id = insert(conn, &invoice)?;
    invoice.id = Some(id);
    tracing::info!(id, number = %invoice.invoice_number, "invoice created");
    Ok(invoice)
}

pub fn set_status(conn: &Connection, id: i64, status: InvoiceStatus) -> StoreResult<()> {
    let changed = conn.execute(
        "UPDATE invoices SET status=?1, updated_at=datetime('now') WHERE id=?2",
        params![status.as_str(), id],
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
    let changed = conn.execute("DELETE FROM invoices WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound {
            collection: COLLECTION,
            id,
        });
    }
    Ok(())
}

pub fn delete_all(conn: &Connection) -> StoreResult<usize> {
    Ok(conn.execute("DELETE FROM invoices", [])?)
}

pub fn count(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM invoices", [], |r| r.get(0))?)
}
