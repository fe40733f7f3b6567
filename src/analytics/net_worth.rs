// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::funds::FundPoint;
use super::monthly::MonthlyPoint;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWorthPoint {
    pub month: String,
    pub cash: Decimal,
    pub investments: Decimal,
    pub total: Decimal,
}

/// Pairs monthly savings with the fund valuation at the same index.
///
/// A month with negative savings contributes no cash; it is not subtracted.
pub fn net_worth_series(monthly: &[MonthlyPoint], funds: &[FundPoint]) -> Vec<NetWorthPoint> {
    monthly
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let cash = m.savings.max(Decimal::ZERO);
            let investments = funds.get(i).map(|f| f.value).unwrap_or(Decimal::ZERO);
            NetWorthPoint {
                month: m.month.clone(),
                cash,
                investments,
                total: cash.saturating_add(investments),
            }
        })
        .collect()
}
