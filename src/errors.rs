// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by the record collections in [`crate::store`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: i64 },
    #[error("Invalid backup data format: {0}")]
    InvalidBackup(String),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Unknown period '{0}', expected monthly, quarterly or yearly")]
    Unknown(String),
    #[error("Report range requires both a start and an end date")]
    HalfOpenRange,
    #[error("Report range start {start} is after end {end}")]
    Inverted { start: String, end: String },
}
