// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the ledger. `transaction_time` is the unique key; the store
/// enforces uniqueness at the boundary, the engine assumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_time: NaiveDateTime,
    pub description: String,
    pub amount_gbp: Decimal,
    pub amount_charged_ccy: Decimal,
    pub currency: String,
    pub category: String,
    pub debit_or_credit: String,
    pub postcode: Option<String>,
}

/// Calendar bucketing frequency: ISO weeks starting Monday, or calendar
/// months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Weekly,
    Monthly,
}

impl Frequency {
    /// First day of the bucket containing `date`.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            Frequency::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// First day of the bucket after the one starting at `start`.
    pub fn next_bucket(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => start + Duration::days(7),
            Frequency::Monthly => {
                let (y, m) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(start)
            }
        }
    }
}

/// Bundled result of one analytics pass over a chosen period, handed to the
/// presentation layer. Constructed whole or not at all.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub average_expense: Decimal,
    pub total_expense: Decimal,
    pub top_expense_amount: Decimal,
    pub top_expense_description: String,
    pub diff_between_two_periods: Decimal,
    pub top_expense_categories: Vec<(String, String)>,
}

/// Dense (period, category) spend table for charting. `rows` are
/// chronological; each row's `amounts` are parallel to `categories`, with
/// zero cells for category/period combinations without transactions.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingGrid {
    pub categories: Vec<String>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub period_start: NaiveDate,
    pub amounts: Vec<Decimal>,
}
