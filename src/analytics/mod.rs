// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived analytics over transactions and fund positions.
//!
//! All functions here are pure: they take the records and the reference date
//! and recompute everything on each call. Records with missing dates or
//! amounts degrade to "not counted" or zero instead of failing.

pub mod calendar;
pub mod categories;
pub mod funds;
pub mod health;
pub mod monthly;
pub mod net_worth;
pub mod summary;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::errors::PeriodError;
use crate::models::{FundPosition, Transaction};
use crate::store::{self, StoreResult};

use categories::CategorySlice;
use funds::FundPoint;
use health::HealthReport;
use monthly::MonthlyPoint;
use net_worth::NetWorthPoint;

/// Reporting period selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// Number of monthly buckets shown for this period.
    pub fn months_back(&self) -> u32 {
        match self {
            Period::Monthly | Period::Quarterly => 6,
            Period::Yearly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Period::Monthly),
            "quarterly" => Ok(Period::Quarterly),
            "yearly" => Ok(Period::Yearly),
            other => Err(PeriodError::Unknown(other.to_string())),
        }
    }
}

/// The full analytics bundle served to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPayload {
    pub monthly_data: Vec<MonthlyPoint>,
    pub category_data: Vec<CategorySlice>,
    pub mutual_fund_data: Vec<FundPoint>,
    pub net_worth_data: Vec<NetWorthPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_data: Option<HealthReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyticsPayload {
    pub fn compute(
        txns: &[Transaction],
        funds: &[FundPosition],
        period: Period,
        today: NaiveDate,
    ) -> Self {
        let monthly_data = monthly::monthly_series(txns, period, today);
        let mutual_fund_data = funds::fund_value_series(funds, today);

        // net worth pairs with the fund series, so it always uses six months
        let net_worth_data = if period.months_back() == funds::FUND_SERIES_MONTHS {
            net_worth::net_worth_series(&monthly_data, &mutual_fund_data)
        } else {
            let six = monthly::trailing_months(txns, funds::FUND_SERIES_MONTHS, today);
            net_worth::net_worth_series(&six, &mutual_fund_data)
        };

        Self {
            monthly_data,
            category_data: categories::category_breakdown(txns, today),
            mutual_fund_data,
            net_worth_data,
            health_data: Some(health::financial_health(txns, funds, today)),
            error: None,
        }
    }

    /// The "no data" shape returned when the records could not be loaded.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            monthly_data: Vec::new(),
            category_data: Vec::new(),
            mutual_fund_data: Vec::new(),
            net_worth_data: Vec::new(),
            health_data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }
}

fn load_records(conn: &Connection) -> StoreResult<(Vec<Transaction>, Vec<FundPosition>)> {
    let txns = store::transactions::find_all(conn)?;
    let funds = store::funds::find_all(conn)?;
    Ok((txns, funds))
}

/// Loads all records and computes the analytics bundle.
///
/// Any load failure yields [`AnalyticsPayload::unavailable`]; partial
/// results are never returned.
pub fn load(conn: &Connection, period: Period, today: NaiveDate) -> AnalyticsPayload {
    match load_records(conn) {
        Ok((txns, funds)) => AnalyticsPayload::compute(&txns, &funds, period, today),
        Err(err) => {
            tracing::error!(%err, "failed to load records for analytics");
            AnalyticsPayload::unavailable("Failed to fetch analytics data")
        }
    }
}
