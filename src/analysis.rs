// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stateless spending statistics. Every function is a pure function of its
//! inputs; subsets come from `PeriodIndex` windows (or the whole
//! collection) and are expected in chronological order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::errors::AnalysisError;
use crate::models::{Frequency, Transaction};
use crate::period::PeriodIndex;
use crate::utils::fmt_gbp;

/// How many categories `top_categories` keeps by default.
pub const DEFAULT_CATEGORY_LIMIT: usize = 5;

/// Sum of `amount_gbp` over the subset. The total of nothing is zero, not
/// an error.
pub fn total_expense(subset: &[&Transaction]) -> Decimal {
    subset.iter().map(|t| t.amount_gbp).sum()
}

/// The single largest expense and its description. Ties go to the first
/// occurrence in the subset's chronological order. There is no defined
/// maximum over an empty subset.
pub fn top_expense<'a>(subset: &[&'a Transaction]) -> Result<(Decimal, &'a str), AnalysisError> {
    let mut best: Option<&Transaction> = None;
    for &t in subset {
        match best {
            Some(b) if t.amount_gbp <= b.amount_gbp => {}
            _ => best = Some(t),
        }
    }
    best.map(|t| (t.amount_gbp, t.description.as_str()))
        .ok_or_else(|| AnalysisError::EmptyPeriod("top expense".to_string()))
}

/// Per-category spend totals, largest first, capped at `limit`, each amount
/// formatted with the £ prefix. Categories with equal totals sort by label.
pub fn top_categories(
    subset: &[&Transaction],
    limit: usize,
) -> Result<Vec<(String, String)>, AnalysisError> {
    if subset.is_empty() {
        return Err(AnalysisError::EmptyPeriod("top categories".to_string()));
    }
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in subset {
        *sums.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.amount_gbp;
    }
    // BTreeMap iteration is label-ascending; the stable sort keeps that
    // order for equal totals.
    let mut ranked: Vec<(&str, Decimal)> = sums.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    Ok(ranked
        .into_iter()
        .map(|(cat, amount)| (cat.to_string(), fmt_gbp(&amount)))
        .collect())
}

/// Mean of the dense per-bucket sums over the whole collection.
/// `trim_edges` drops the first and last bucket, which are usually partial
/// periods at the edges of the data range; with it set, fewer than three
/// buckets leave nothing to average.
pub fn average_expense(
    index: &PeriodIndex,
    frequency: Frequency,
    trim_edges: bool,
) -> Result<Decimal, AnalysisError> {
    let totals = index.bucket_totals(frequency);
    let window: &[(chrono::NaiveDate, Decimal)] = if trim_edges {
        if totals.len() > 2 {
            &totals[1..totals.len() - 1]
        } else {
            &[]
        }
    } else {
        &totals
    };
    if window.is_empty() {
        return Err(AnalysisError::EmptyPeriod("trailing average".to_string()));
    }
    let sum: Decimal = window.iter().map(|(_, v)| *v).sum();
    Ok(sum / Decimal::from(window.len() as u64))
}

/// Absolute spend change: recent total minus older total. Well-defined for
/// empty subsets on either side, since an empty total is zero.
pub fn diff_between_periods(recent: &[&Transaction], older: &[&Transaction]) -> Decimal {
    total_expense(recent) - total_expense(older)
}

/// Percentage spend change against the older period. Undefined when the
/// older total is zero; callers should fall back to
/// `diff_between_periods`, which stays valid.
pub fn pct_change_between_periods(
    recent: &[&Transaction],
    older: &[&Transaction],
) -> Result<Decimal, AnalysisError> {
    let older_total = total_expense(older);
    if older_total.is_zero() {
        return Err(AnalysisError::UndefinedPercentage);
    }
    Ok((total_expense(recent) - older_total) / older_total * Decimal::ONE_HUNDRED)
}
