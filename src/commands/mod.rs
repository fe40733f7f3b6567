// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod backup;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod funds;
pub mod health;
pub mod invoices;
pub mod profile;
pub mod reports;
pub mod rollover;
pub mod transactions;
