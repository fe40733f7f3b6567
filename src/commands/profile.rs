// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::profile as store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = store::load_or_init(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &profile)? {
        return Ok(());
    }
    let ccy = &profile.preferred_currency;
    let rows = vec![
        vec![
            "Monthly income goal".to_string(),
            fmt_money(&profile.monthly_income_goal, ccy),
        ],
        vec![
            "Savings target".to_string(),
            fmt_money(&profile.savings_target, ccy),
        ],
        vec!["Currency".to_string(), ccy.clone()],
        vec![
            "Motivational quotes".to_string(),
            if profile.motivational_quotes { "on" } else { "off" }.to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut profile = store::load_or_init(conn)?;
    let mut changed = false;

    if let Some(goal) = sub.get_one::<String>("income-goal") {
        profile.monthly_income_goal = parse_amount(goal)?;
        changed = true;
    }
    if let Some(target) = sub.get_one::<String>("savings-target") {
        profile.savings_target = parse_amount(target)?;
        changed = true;
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        let ccy = ccy.trim().to_uppercase();
        if ccy.is_empty() {
            bail!("Currency must not be empty");
        }
        profile.preferred_currency = ccy;
        changed = true;
    }
    if let Some(quotes) = sub.get_one::<bool>("quotes") {
        profile.motivational_quotes = *quotes;
        changed = true;
    }

    if !changed {
        println!("Nothing to update");
        return Ok(());
    }
    store::save(conn, &profile)?;
    println!("Profile updated");
    Ok(())
}
