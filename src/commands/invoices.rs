// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Invoice, InvoiceItem, InvoiceStatus, Transaction, TxnKind};
use crate::store::{invoices as store, transactions};
use crate::utils::{
    date_arg, maybe_print_json, parse_amount, parse_decimal, pretty_table, record_id,
    required_arg, today,
};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("book", sub)) => {
            book(conn, sub)?;
        }
        Some(("status", sub)) => set_status(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn text(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Parses `description:quantity:rate`. The description may itself contain
/// colons.
pub fn parse_item(raw: &str) -> Result<InvoiceItem> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(rate), Some(quantity), Some(description)) = (parts.next(), parts.next(), parts.next())
    else {
        bail!("Invalid item '{}', expected description:quantity:rate", raw);
    };
    let description = description.trim();
    if description.is_empty() {
        bail!("Invalid item '{}', description is empty", raw);
    }
    Ok(InvoiceItem {
        description: description.to_string(),
        quantity: parse_amount(quantity).with_context(|| format!("Item '{}'", raw))?,
        rate: parse_amount(rate).with_context(|| format!("Item '{}'", raw))?,
    })
}

/// Builds a draft invoice from `invoice add` arguments without storing it.
pub fn invoice_from_args(sub: &clap::ArgMatches) -> Result<Invoice> {
    let from_name = required_arg(sub, "from-name")?.trim().to_string();
    let to_name = required_arg(sub, "to-name")?.trim().to_string();
    if from_name.is_empty() || to_name.is_empty() {
        bail!("Both --from-name and --to-name must be non-empty");
    }
    let items = sub
        .get_many::<String>("item")
        .into_iter()
        .flatten()
        .map(String::as_str)
        .map(parse_item)
        .collect::<Result<Vec<_>>>()?;
    if items.is_empty() {
        bail!("An invoice needs at least one --item");
    }
    let tax_rate = parse_decimal(required_arg(sub, "tax-rate")?)?;
    if tax_rate.is_sign_negative() && !tax_rate.is_zero() {
        bail!("Tax rate must not be negative");
    }
    Ok(Invoice {
        from_name,
        from_email: text(sub, "from-email"),
        from_address: text(sub, "from-address"),
        from_phone: text(sub, "from-phone"),
        to_name,
        to_email: text(sub, "to-email"),
        to_address: text(sub, "to-address"),
        to_phone: text(sub, "to-phone"),
        date: Some(date_arg(sub, "date")?.unwrap_or_else(today)),
        due_date: date_arg(sub, "due-date")?,
        items,
        tax_rate,
        notes: text(sub, "notes"),
        ..Default::default()
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let invoice = store::create(conn, &invoice_from_args(sub)?)?;
    println!(
        "Created {} for {} totalling {:.2} (id {})",
        invoice.invoice_number,
        invoice.to_name,
        invoice.total(),
        invoice.id.unwrap_or_default()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = store::find_all(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|inv| {
                vec![
                    inv.id.map(|i| i.to_string()).unwrap_or_default(),
                    inv.invoice_number.clone(),
                    inv.to_name.clone(),
                    inv.date.map(|d| d.to_string()).unwrap_or_default(),
                    inv.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    format!("{:.2}", inv.total()),
                    inv.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Number", "Client", "Date", "Due", "Total", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

/// Records the invoice total as a transaction and returns it.
pub fn book(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = record_id(sub)?;
    let kind = required_arg(sub, "type")?.parse::<TxnKind>()?;
    let on = date_arg(sub, "date")?.unwrap_or_else(today);
    let invoice = store::find(conn, id)?;
    let mut txn = invoice.to_transaction(kind, on);
    txn.id = Some(transactions::insert(conn, &txn)?);
    tracing::info!(invoice = id, kind = %kind, amount = %txn.amount, "invoice booked");
    println!(
        "Booked {} as {} of {:.2}",
        invoice.invoice_number, kind, txn.amount
    );
    Ok(txn)
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    let status = required_arg(sub, "set")?.parse::<InvoiceStatus>()?;
    store::set_status(conn, id, status)?;
    println!("Invoice {} is now {}", id, status.as_str());
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    store::delete(conn, id)?;
    tracing::info!(id, "invoice deleted");
    println!("Deleted invoice {}", id);
    Ok(())
}
