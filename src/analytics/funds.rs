// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::{month_label, month_start_before};
use crate::models::FundPosition;
use crate::utils::saturating_sum;

pub const FUND_SERIES_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundPoint {
    pub month: String,
    pub value: Decimal,
}

/// Value of a single position as of `target`.
///
/// Uses the latest valuation recorded on or before `target`. Between
/// valuations the value is held flat; it is not interpolated. A position with
/// no valuation yet counts at its invested amount from the investment date
/// onwards, and as zero before it.
pub fn fund_value_as_of(fund: &FundPosition, target: NaiveDate) -> Decimal {
    let invested = fund.invested_on.is_some_and(|d| d <= target);
    match &fund.valuation_history {
        Some(history) => {
            let latest = history
                .iter()
                .filter_map(|e| e.on.filter(|on| *on <= target).map(|on| (on, e.value)))
                .max_by_key(|(on, _)| *on);
            match latest {
                Some((_, value)) => value,
                None if invested => fund.initial_investment,
                None => Decimal::ZERO,
            }
        }
        // records without any history fall back to the latest known value
        None if invested => fund.current_value.unwrap_or(fund.initial_investment),
        None => Decimal::ZERO,
    }
}

pub fn portfolio_value_as_of(funds: &[FundPosition], target: NaiveDate) -> Decimal {
    saturating_sum(funds.iter().map(|f| fund_value_as_of(f, target)))
}

/// Portfolio value on the first day of each of the trailing six months,
/// oldest first, ending with the month of `today`.
pub fn fund_value_series(funds: &[FundPosition], today: NaiveDate) -> Vec<FundPoint> {
    (0..FUND_SERIES_MONTHS)
        .rev()
        .map(|back| {
            let target = month_start_before(today, back);
            FundPoint {
                month: month_label(target),
                value: portfolio_value_as_of(funds, target),
            }
        })
        .collect()
}

/// Sum of the latest known values, missing values counting as zero.
pub fn total_current_value(funds: &[FundPosition]) -> Decimal {
    saturating_sum(funds.iter().map(FundPosition::current_value_or_zero))
}
