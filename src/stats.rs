// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stats assembly: the one entry point the presentation layer calls. Given
//! an explicit anchor time and a granularity, slice the current and prior
//! windows, run the analyses, and bundle a `Stats`. "Now" never enters
//! here; callers pass the anchor in.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::analysis::{
    self, DEFAULT_CATEGORY_LIMIT, diff_between_periods, top_categories, top_expense,
    total_expense,
};
use crate::errors::AnalysisError;
use crate::models::{Frequency, Stats, Transaction};
use crate::period::PeriodIndex;

/// "YYYY-MM" key for the calendar month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// First day of the month `n` months before the one containing `date`.
pub fn months_ago(date: NaiveDate, n: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 - n as i32;
    let (y, m) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date)
}

/// A date inside the ISO week `n` weeks before the one containing `date`.
pub fn weeks_ago(date: NaiveDate, n: u32) -> NaiveDate {
    date - Duration::weeks(n as i64)
}

/// Compute the full statistics bundle for the window containing `anchor`.
///
/// The prior window (same granularity, one period back) feeds the absolute
/// diff; a prior window with no transactions counts as an empty subset, so
/// the diff degrades to the current total. An empty *current* window is an
/// error the caller must turn into a placeholder or a failed render. When
/// `exclude_category` is set, the exclusion is applied once, up front, and
/// every statistic sees only the filtered rows.
pub fn period_stats(
    index: &PeriodIndex,
    anchor: NaiveDateTime,
    frequency: Frequency,
    exclude_category: Option<&str>,
) -> Result<Stats, AnalysisError> {
    let filtered;
    let index = match exclude_category {
        Some(cat) => {
            filtered = index.without_category(cat);
            &filtered
        }
        None => index,
    };

    let (current, prior) = match frequency {
        Frequency::Weekly => {
            let iso = anchor.date().iso_week();
            let current = index.week(iso.year(), iso.week())?;
            let prior_iso = weeks_ago(anchor.date(), 1).iso_week();
            let prior = or_empty(index.week(prior_iso.year(), prior_iso.week()))?;
            (current, prior)
        }
        Frequency::Monthly => {
            let current = index.month(&month_key(anchor.date()))?;
            let prior = or_empty(index.month(&month_key(months_ago(anchor.date(), 1))))?;
            (current, prior)
        }
    };

    // Trim partial edge buckets from the trailing average when the data
    // range is long enough to afford it; otherwise average everything.
    let average_expense = match analysis::average_expense(index, frequency, true) {
        Ok(avg) => avg,
        Err(AnalysisError::EmptyPeriod(_)) => analysis::average_expense(index, frequency, false)?,
        Err(e) => return Err(e),
    };

    let (top_expense_amount, top_expense_description) = top_expense(&current)?;
    Ok(Stats {
        average_expense,
        total_expense: total_expense(&current),
        top_expense_amount,
        top_expense_description: top_expense_description.to_string(),
        diff_between_two_periods: diff_between_periods(&current, &prior),
        top_expense_categories: top_categories(&current, DEFAULT_CATEGORY_LIMIT)?,
    })
}

fn or_empty(
    window: Result<Vec<&Transaction>, AnalysisError>,
) -> Result<Vec<&Transaction>, AnalysisError> {
    match window {
        Ok(rows) => Ok(rows),
        Err(AnalysisError::EmptyPeriod(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
