// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record collections backed by the SQLite connection opened in `main`.
//!
//! Every function borrows the connection it works on; nothing here holds
//! process-wide state.

pub mod funds;
pub mod invoices;
pub mod profile;
pub mod transactions;

pub use crate::errors::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

fn text_conversion_error(idx: usize, err: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, err.into())
}
