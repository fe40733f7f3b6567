// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{capped_percent, capped_ratio, lenient_date, lenient_decimal, saturating_sum};

pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Income => "income",
            TxnKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxnKind::Income),
            "expense" => Ok(TxnKind::Expense),
            other => Err(anyhow!(
                "Invalid transaction type '{}', expected income or expense",
                other
            )),
        }
    }
}

/// A single income or expense entry.
///
/// Field names on the wire follow the backup document format (`type`,
/// `date`, `source`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "date", default, with = "lenient_date")]
    pub occurred_on: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "source", default)]
    pub payment_source: String,
}

impl Transaction {
    pub fn new(kind: TxnKind, amount: Decimal, category: &str, occurred_on: NaiveDate) -> Self {
        Self {
            id: None,
            kind,
            amount,
            category: category.to_string(),
            occurred_on: Some(occurred_on),
            description: String::new(),
            payment_source: String::new(),
        }
    }

    /// Category label with blanks mapped to [`DEFAULT_CATEGORY`].
    pub fn category_or_other(&self) -> &str {
        let c = self.category.trim();
        if c.is_empty() { DEFAULT_CATEGORY } else { c }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentKind {
    #[serde(rename = "sip")]
    Sip,
    #[serde(rename = "lump sum")]
    LumpSum,
    #[serde(rename = "additional investment")]
    AdditionalInvestment,
}

impl InvestmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentKind::Sip => "sip",
            InvestmentKind::LumpSum => "lump sum",
            InvestmentKind::AdditionalInvestment => "additional investment",
        }
    }
}

impl FromStr for InvestmentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "sip" => Ok(InvestmentKind::Sip),
            "lump sum" | "lumpsum" => Ok(InvestmentKind::LumpSum),
            "additional investment" => Ok(InvestmentKind::AdditionalInvestment),
            _ => Err(anyhow!(
                "Invalid investment type '{}', expected sip, lump-sum or additional-investment",
                s.trim()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundCategory {
    Equity,
    Debt,
    Hybrid,
    Index,
    Elss,
}

impl FundCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundCategory::Equity => "equity",
            FundCategory::Debt => "debt",
            FundCategory::Hybrid => "hybrid",
            FundCategory::Index => "index",
            FundCategory::Elss => "elss",
        }
    }
}

impl FromStr for FundCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equity" => Ok(FundCategory::Equity),
            "debt" => Ok(FundCategory::Debt),
            "hybrid" => Ok(FundCategory::Hybrid),
            "index" => Ok(FundCategory::Index),
            "elss" => Ok(FundCategory::Elss),
            other => Err(anyhow!(
                "Invalid fund type '{}', expected equity, debt, hybrid, index or elss",
                other
            )),
        }
    }
}

/// One recorded valuation of a fund position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationEntry {
    #[serde(rename = "date", default, with = "lenient_date")]
    pub on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(rename = "notes", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ValuationEntry {
    pub fn new(on: NaiveDate, value: Decimal, note: impl Into<String>) -> Self {
        let note = note.into();
        Self {
            on: Some(on),
            value,
            note: if note.is_empty() { None } else { Some(note) },
        }
    }
}

/// A mutual fund holding.
///
/// `valuation_history` is `None` when the record carries no history at all,
/// which is distinct from an empty history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "fundName", default)]
    pub name: String,
    #[serde(rename = "investmentType")]
    pub investment_kind: InvestmentKind,
    #[serde(rename = "fundType")]
    pub category: FundCategory,
    #[serde(rename = "initialInvestment", default, deserialize_with = "lenient_decimal")]
    pub initial_investment: Decimal,
    #[serde(rename = "currentValue", default)]
    pub current_value: Option<Decimal>,
    #[serde(rename = "investmentDate", default, with = "lenient_date")]
    pub invested_on: Option<NaiveDate>,
    #[serde(rename = "updateHistory", default)]
    pub valuation_history: Option<Vec<ValuationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FundPosition {
    pub fn current_value_or_zero(&self) -> Decimal {
        self.current_value.unwrap_or(Decimal::ZERO)
    }

    pub fn gain(&self) -> Decimal {
        self.current_value_or_zero()
            .saturating_sub(self.initial_investment)
    }

    /// Gain as a percentage of the invested amount; zero when nothing was invested.
    pub fn return_pct(&self) -> Decimal {
        if self.initial_investment.is_zero() {
            return Decimal::ZERO;
        }
        capped_percent(self.gain(), self.initial_investment)
    }
}

/// Singleton preferences record. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub monthly_income_goal: Decimal,
    pub savings_target: Decimal,
    pub preferred_currency: String,
    #[serde(rename = "motivationalQuotesPreference")]
    pub motivational_quotes: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            monthly_income_goal: Decimal::from(100_000),
            savings_target: Decimal::from(50_000),
            preferred_currency: "PKR".to_string(),
            motivational_quotes: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" | "canceled" => Ok(InvoiceStatus::Cancelled),
            other => Err(anyhow!(
                "Invalid invoice status '{}', expected draft, sent, paid or cancelled",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
}

impl InvoiceItem {
    pub fn amount(&self) -> Decimal {
        self.quantity
            .checked_mul(self.rate)
            .unwrap_or(if self.quantity.is_sign_negative() != self.rate.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}

/// A bill from one party to another. Wire names follow the backup format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub from_phone: String,
    #[serde(default)]
    pub to_name: String,
    #[serde(default)]
    pub to_email: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub to_phone: String,
    #[serde(default, with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    /// Percentage applied to the subtotal.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn subtotal(&self) -> Decimal {
        saturating_sum(self.items.iter().map(InvoiceItem::amount))
    }

    /// `subtotal × tax_rate / 100`.
    pub fn tax(&self) -> Decimal {
        let base = capped_ratio(self.subtotal(), Decimal::ONE_HUNDRED);
        base.checked_mul(self.tax_rate)
            .unwrap_or(if base.is_sign_negative() != self.tax_rate.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }

    pub fn total(&self) -> Decimal {
        self.subtotal().saturating_add(self.tax())
    }

    /// Books the invoice total as an income or expense dated `on`.
    pub fn to_transaction(&self, kind: TxnKind, on: NaiveDate) -> Transaction {
        let category = match kind {
            TxnKind::Income => "invoice payment",
            TxnKind::Expense => "invoice expense",
        };
        let mut t = Transaction::new(kind, self.total(), category, on);
        t.description = format!("Invoice {} - {}", self.invoice_number, self.to_name);
        t.payment_source = "invoice".to_string();
        t
    }
}
