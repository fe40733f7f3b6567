// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

/// Today's calendar date. All bucketing works on UTC calendar dates.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s.trim()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s.trim()))
}

/// Parses a monetary amount that must not be negative.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(anyhow!("Amount must not be negative, got '{}'", s.trim()));
    }
    Ok(d)
}

/// Best-effort date parsing for stored and restored records.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (normalised to UTC) and naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` timestamps. Anything else yields `None`.
pub fn parse_lenient_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Reads a stored decimal column, treating missing or unreadable values as zero.
pub fn decimal_or_zero(raw: Option<&str>, what: &str) -> Decimal {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Decimal::ZERO,
        Some(s) => s.parse::<Decimal>().unwrap_or_else(|_| {
            tracing::warn!(value = s, field = what, "unreadable decimal, using 0");
            Decimal::ZERO
        }),
    }
}

/// Sum that clamps at the `Decimal` bounds instead of panicking.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// `num / den`, clamped to the `Decimal` bounds when the quotient overflows.
/// Callers guard against a zero `den`.
pub fn capped_ratio(num: Decimal, den: Decimal) -> Decimal {
    num.checked_div(den)
        .unwrap_or(if num.is_sign_negative() != den.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// `num / den × 100`, clamped like [`capped_ratio`].
pub fn capped_percent(num: Decimal, den: Decimal) -> Decimal {
    let ratio = capped_ratio(num, den);
    ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(if ratio.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Serde adapter for optional dates that never fails on malformed input.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(d)?;
        Ok(raw
            .as_ref()
            .and_then(|v| v.as_str())
            .and_then(super::parse_lenient_date))
    }
}

/// Deserializer for amounts in imported records. `null`, missing and
/// unreadable values become zero; numbers and numeric strings are accepted.
pub fn lenient_decimal<'de, D>(d: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let raw = Option::<serde_json::Value>::deserialize(d)?;
    let text = match &raw {
        None | Some(serde_json::Value::Null) => return Ok(Decimal::ZERO),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    };
    if text.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Ok(text
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or_else(|_| {
            tracing::warn!(value = %text, "unreadable amount, using 0");
            Decimal::ZERO
        }))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// A required string argument. Clap enforces presence, this only guards
/// against a mismatched command definition.
pub fn required_arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing required argument --{}", name))
}

/// An optional date argument, parsed strictly.
pub fn date_arg(m: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name).map(|s| parse_date(s)).transpose()
}

pub fn record_id(m: &clap::ArgMatches) -> Result<i64> {
    m.get_one::<i64>("id")
        .copied()
        .context("Missing required argument --id")
}
