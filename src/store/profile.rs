// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rusqlite::{Connection, params};

use super::StoreResult;
use crate::models::UserProfile;
use crate::utils::decimal_or_zero;

const KEYS: [&str; 4] = [
    "monthly_income_goal",
    "savings_target",
    "preferred_currency",
    "motivational_quotes",
];

fn read_settings(conn: &Connection) -> StoreResult<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = HashMap::new();
    for row in rows {
        let (k, v) = row?;
        out.insert(k, v);
    }
    Ok(out)
}

/// The stored profile, or `None` if it has never been written.
pub fn load(conn: &Connection) -> StoreResult<Option<UserProfile>> {
    let settings = read_settings(conn)?;
    if !KEYS.iter().any(|k| settings.contains_key(*k)) {
        return Ok(None);
    }
    let defaults = UserProfile::default();
    let profile = UserProfile {
        monthly_income_goal: settings
            .get("monthly_income_goal")
            .map(|v| decimal_or_zero(Some(v.as_str()), "monthly_income_goal"))
            .unwrap_or(defaults.monthly_income_goal),
        savings_target: settings
            .get("savings_target")
            .map(|v| decimal_or_zero(Some(v.as_str()), "savings_target"))
            .unwrap_or(defaults.savings_target),
        preferred_currency: settings
            .get("preferred_currency")
            .cloned()
            .unwrap_or(defaults.preferred_currency),
        motivational_quotes: settings
            .get("motivational_quotes")
            .map(|v| v == "true")
            .unwrap_or(defaults.motivational_quotes),
    };
    Ok(Some(profile))
}

/// Returns the profile, writing the defaults first if none exists yet.
pub fn load_or_init(conn: &Connection) -> StoreResult<UserProfile> {
    if let Some(p) = load(conn)? {
        return Ok(p);
    }
    let profile = UserProfile::default();
    save(conn, &profile)?;
    tracing::info!("created default user profile");
    Ok(profile)
}

pub fn save(conn: &Connection, profile: &UserProfile) -> StoreResult<()> {
    let values = [
        profile.monthly_income_goal.to_string(),
        profile.savings_target.to_string(),
        profile.preferred_currency.clone(),
        profile.motivational_quotes.to_string(),
    ];
    for (key, value) in KEYS.iter().zip(values) {
        conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> StoreResult<usize> {
    let mut removed = 0;
    for key in KEYS {
        removed += conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    }
    Ok(removed)
}
