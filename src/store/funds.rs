// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use super::{StoreError, StoreResult, text_conversion_error};
use crate::models::{FundCategory, FundPosition, InvestmentKind, ValuationEntry};
use crate::utils::{decimal_or_zero, parse_lenient_date};

const COLLECTION: &str = "mutual fund";

const SELECT_COLUMNS: &str = "SELECT id, name, investment_type, fund_type, initial_investment, \
     current_value, investment_date, update_history, notes FROM mutual_funds";

fn from_row(r: &Row<'_>) -> rusqlite::Result<FundPosition> {
    let id: i64 = r.get(0)?;
    let investment_kind = r
        .get::<_, String>(2)?
        .parse::<InvestmentKind>()
        .map_err(|e| text_conversion_error(2, e))?;
    let category = r
        .get::<_, String>(3)?
        .parse::<FundCategory>()
        .map_err(|e| text_conversion_error(3, e))?;
    let initial: Option<String> = r.get(4)?;
    let current: Option<String> = r.get(5)?;
    let invested_on: Option<String> = r.get(6)?;
    let history_raw: Option<String> = r.get(7)?;

    let valuation_history = history_raw.and_then(|raw| {
        match serde_json::from_str::<Vec<ValuationEntry>>(&raw) {
            Ok(h) => Some(h),
            Err(err) => {
                tracing::warn!(fund = id, %err, "unreadable valuation history, ignoring it");
                None
            }
        }
    });

    Ok(FundPosition {
        id: Some(id),
        name: r.get(1)?,
        investment_kind,
        category,
        initial_investment: decimal_or_zero(initial.as_deref(), "initial_investment"),
        current_value: current
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| decimal_or_zero(Some(s), "current_value")),
        invested_on: invested_on.as_deref().and_then(parse_lenient_date),
        valuation_history,
        notes: r.get(8)?,
    })
}

fn history_json(fund: &FundPosition) -> StoreResult<Option<String>> {
    Ok(match &fund.valuation_history {
        Some(h) => Some(serde_json::to_string(h)?),
        None => None,
    })
}

/// All positions, most recent investment first.
pub fn find_all(conn: &Connection) -> StoreResult<Vec<FundPosition>> {
    let sql = format!("{} ORDER BY investment_date DESC, id DESC", SELECT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    tracing::debug!(count = data.len(), "loaded mutual funds");
    Ok(data)
}

/// Positions whose investment date falls within `[start, end]`.
pub fn find_by_date_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> StoreResult<Vec<FundPosition>> {
    let sql = format!(
        "{} WHERE investment_date >= ?1 AND investment_date <= ?2 \
         ORDER BY investment_date DESC, id DESC",
        SELECT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![start.to_string(), end.to_string()], from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn find(conn: &Connection, id: i64) -> StoreResult<FundPosition> {
    let sql = format!("{} WHERE id=?1", SELECT_COLUMNS);
    conn.query_row(&sql, params![id], from_row)
        .optional()?
        .ok_or(StoreError::NotFound {
            collection: COLLECTION,
            id,
        })
}

/// Stores the position exactly as given, including a missing history.
pub fn insert(conn: &Connection, fund: &FundPosition) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO mutual_funds(name, investment_type, fund_type, initial_investment,
             current_value, investment_date, update_history, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            fund.name.trim(),
            fund.investment_kind.as_str(),
            fund.category.as_str(),
            fund.initial_investment.to_string(),
            fund.current_value.map(|v| v.to_string()),
            fund.invested_on.map(|d| d.to_string()),
            history_json(fund)?,
            fund.notes
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Records a newly opened position.
///
/// When no history is supplied the timeline is seeded with the opening
/// valuation on the investment date.
pub fn create(conn: &Connection, fund: &FundPosition) -> StoreResult<i64> {
    let mut fund = fund.clone();
    if fund.valuation_history.is_none() {
        let opening = fund.current_value.unwrap_or(fund.initial_investment);
        fund.valuation_history = Some(vec![ValuationEntry {
            on: fund.invested_on,
            value: opening,
            note: Some("Initial investment".to_string()),
        }]);
    }
    insert(conn, &fund)
}

pub fn update(conn: &Connection, id: i64, fund: &FundPosition) -> StoreResult<()> {
    let changed = conn.execute(
        "UPDATE mutual_funds
         SET name=?1, investment_type=?2, fund_type=?3, initial_investment=?4,
             current_value=?5, investment_date=?6, update_history=?7, notes=?8,
             updated_at=datetime('now')
         WHERE id=?9",
        params![
            fund.name.trim(),
            fund.investment_kind.as_str(),
            fund.category.as_str(),
            fund.initial_investment.to_string(),
            fund.current_value.map(|v| v.to_string()),
            fund.invested_on.map(|d| d.to_string()),
            history_json(fund)?,
            fund.notes,
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

/// Sets a new current value and appends it to the valuation timeline.
pub fn record_value(
    conn: &Connection,
    id: i64,
    value: Decimal,
    note: Option<&str>,
    on: NaiveDate,
) -> StoreResult<FundPosition> {
    let mut fund = find(conn, id)?;
    fund.current_value = Some(value);
    fund.valuation_history
        .get_or_insert_with(Vec::new)
        .push(ValuationEntry::new(on, value, note.unwrap_or_default()));
    update(conn, id, &fund)?;
    Ok(fund)
}

/// Adds fresh money to a position: both the invested amount and the current
/// value grow by `amount`, and the new value is appended to the timeline.
pub fn add_investment(
    conn: &Connection,
    id: i64,
    amount: Decimal,
    on: NaiveDate,
) -> StoreResult<FundPosition> {
    let mut fund = find(conn, id)?;
    let new_value = fund
        .current_value
        .unwrap_or(fund.initial_investment)
        .saturating_add(amount);
    fund.initial_investment = fund.initial_investment.saturating_add(amount);
    fund.current_value = Some(new_value);
    fund.valuation_history
        .get_or_insert_with(Vec::new)
        .push(ValuationEntry::new(
            on,
            new_value,
            format!("Additional investment of {:.2}", amount),
        ));
    update(conn, id, &fund)?;
    Ok(fund)
}

pub fn delete(conn: &Connection, id: i64) -> StoreResult<()> {
    let changed = conn.execute("DELETE FROM mutual_funds WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound {
            collection: COLLECTION,
            id,
        });
    }
    Ok(())
}

pub fn delete_all(conn: &Connection) -> StoreResult<usize> {
    Ok(conn.execute("DELETE FROM mutual_funds", [])?)
}

pub fn count(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM mutual_funds", [], |r| r.get(0))?)
}
