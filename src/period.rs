// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::errors::AnalysisError;
use crate::models::{Frequency, GridRow, SpendingGrid, Transaction};

/// Time-indexed view over one snapshot of the ledger. Owns its rows, keeps
/// them sorted by `transaction_time`, and never mutates them: every window
/// is a fresh read-only subset. Callers supply anchor times; this layer
/// never reads a clock.
#[derive(Debug, Clone)]
pub struct PeriodIndex {
    rows: Vec<Transaction>,
}

impl PeriodIndex {
    pub fn new(mut rows: Vec<Transaction>) -> Self {
        rows.sort_by_key(|t| t.transaction_time);
        PeriodIndex { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All transactions whose ISO calendar (year, week) matches exactly.
    /// ISO weeks start Monday; week 1 contains the year's first Thursday.
    pub fn week(&self, year: i32, week: u32) -> Result<Vec<&Transaction>, AnalysisError> {
        let subset: Vec<&Transaction> = self
            .rows
            .iter()
            .filter(|t| {
                let iso = t.transaction_time.date().iso_week();
                iso.year() == year && iso.week() == week
            })
            .collect();
        if subset.is_empty() {
            return Err(AnalysisError::EmptyPeriod(format!("{}-W{:02}", year, week)));
        }
        Ok(subset)
    }

    /// All transactions falling in the calendar month named by a "YYYY-MM"
    /// key.
    pub fn month(&self, year_month: &str) -> Result<Vec<&Transaction>, AnalysisError> {
        let (year, month) = parse_month_key(year_month)?;
        let subset: Vec<&Transaction> = self
            .rows
            .iter()
            .filter(|t| {
                let d = t.transaction_time.date();
                d.year() == year && d.month() == month
            })
            .collect();
        if subset.is_empty() {
            return Err(AnalysisError::EmptyPeriod(year_month.to_string()));
        }
        Ok(subset)
    }

    /// A copy of this index with every transaction in `category` removed.
    /// This is the one place category exclusion happens; statistics
    /// downstream see only the filtered rows.
    pub fn without_category(&self, category: &str) -> PeriodIndex {
        PeriodIndex {
            rows: self
                .rows
                .iter()
                .filter(|t| t.category != category)
                .cloned()
                .collect(),
        }
    }

    /// Dense (period, category) spend grid for charting. Periods run
    /// chronologically from the first to the last bucket observed in the
    /// data, including gap periods with no transactions; unobserved
    /// category/period cells are zero, not absent.
    pub fn periodic_category_spending(&self, frequency: Frequency) -> SpendingGrid {
        let mut categories: BTreeSet<String> = BTreeSet::new();
        let mut sums: BTreeMap<NaiveDate, BTreeMap<&str, Decimal>> = BTreeMap::new();
        for t in &self.rows {
            categories.insert(t.category.clone());
            let start = frequency.bucket_start(t.transaction_time.date());
            *sums
                .entry(start)
                .or_default()
                .entry(t.category.as_str())
                .or_insert(Decimal::ZERO) += t.amount_gbp;
        }

        let categories: Vec<String> = categories.into_iter().collect();
        let mut rows = Vec::new();
        if let (Some(first), Some(last)) = (self.rows.first(), self.rows.last()) {
            let mut period = frequency.bucket_start(first.transaction_time.date());
            let end = frequency.bucket_start(last.transaction_time.date());
            while period <= end {
                let bucket = sums.get(&period);
                let amounts = categories
                    .iter()
                    .map(|c| {
                        bucket
                            .and_then(|b| b.get(c.as_str()).copied())
                            .unwrap_or(Decimal::ZERO)
                    })
                    .collect();
                rows.push(GridRow {
                    period_start: period,
                    amounts,
                });
                period = frequency.next_bucket(period);
            }
        }
        SpendingGrid { categories, rows }
    }

    /// Per-bucket `amount_gbp` sums over the whole data range, dense: a
    /// bucket with no transactions contributes an explicit zero. Buckets at
    /// the edges of the range may be partial.
    pub fn bucket_totals(&self, frequency: Frequency) -> Vec<(NaiveDate, Decimal)> {
        let mut sums: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for t in &self.rows {
            let start = frequency.bucket_start(t.transaction_time.date());
            *sums.entry(start).or_insert(Decimal::ZERO) += t.amount_gbp;
        }

        let mut totals = Vec::new();
        if let (Some(first), Some(last)) = (self.rows.first(), self.rows.last()) {
            let mut period = frequency.bucket_start(first.transaction_time.date());
            let end = frequency.bucket_start(last.transaction_time.date());
            while period <= end {
                totals.push((period, sums.get(&period).copied().unwrap_or(Decimal::ZERO)));
                period = frequency.next_bucket(period);
            }
        }
        totals
    }
}

/// Split a "YYYY-MM" key into (year, month), rejecting anything that is not
/// a real calendar month.
pub(crate) fn parse_month_key(s: &str) -> Result<(i32, u32), AnalysisError> {
    let bad = || AnalysisError::InvalidPeriod(s.to_string());
    let (y, m) = s.split_once('-').ok_or_else(bad)?;
    let year: i32 = y.parse().map_err(|_| bad())?;
    let month: u32 = m.parse().map_err(|_| bad())?;
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(bad());
    }
    Ok((year, month))
}
